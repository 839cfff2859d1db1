//! Search-list expansion of a requested name into ordered query candidates.
//!
//! Relative names are compared against `ndots` by counting the dots they
//! contain. A name with at least `ndots` dots is tried as given first and
//! then with each search suffix; a shorter name is tried with every suffix
//! first and as given last. Absolute names (trailing dot) are only ever
//! tried as given.

use super::message_builder::{CandidateMessage, MessageBuilder};
use ferrous_lookup_domain::{DomainError, Question, SearchList};
use tracing::debug;

/// Expands `question` into the candidates a lookup sends, in order.
///
/// Always yields at least one candidate, the name as given. A search
/// candidate the codec refuses (a suffix pushing it past 255 octets) is
/// skipped; only the name as given can fail the expansion. Deterministic
/// apart from the random query ids carried by each message.
pub fn expand(
    question: &Question,
    ndots: usize,
    search: &SearchList,
) -> Result<Vec<CandidateMessage>, DomainError> {
    let names = candidate_names(&question.name, ndots, search)?;
    let bare = format!("{}.", validate_name(&question.name)?);

    let mut candidates = Vec::with_capacity(names.len());
    for fqdn in names {
        let is_bare = fqdn == bare;
        let candidate = Question {
            name: fqdn.into(),
            record_type: question.record_type,
            class: question.class,
        };
        match MessageBuilder::build_query(candidate) {
            Ok(message) => candidates.push(message),
            Err(e) if !is_bare => {
                debug!(error = %e, "Skipping search candidate");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(candidates)
}

/// Fully qualified candidate names for `name`, in send order.
pub fn candidate_names(
    name: &str,
    ndots: usize,
    search: &SearchList,
) -> Result<Vec<String>, DomainError> {
    let relative = validate_name(name)?;

    if name.ends_with('.') {
        return Ok(vec![format!("{}.", relative)]);
    }

    let bare = format!("{}.", relative);
    let searched = search
        .iter()
        .map(|suffix| format!("{}.{}.", relative, suffix));

    let mut names = Vec::with_capacity(search.len() + 1);
    if relative.matches('.').count() >= ndots {
        names.push(bare);
        names.extend(searched);
    } else {
        names.extend(searched);
        names.push(bare);
    }

    Ok(names)
}

/// Returns the name without its trailing dot, rejecting empty labels.
fn validate_name(name: &str) -> Result<&str, DomainError> {
    let relative = name.strip_suffix('.').unwrap_or(name);

    if relative.is_empty() {
        return Err(DomainError::InvalidQuestion(format!(
            "name '{}' has no labels",
            name
        )));
    }

    if relative.split('.').any(str::is_empty) {
        return Err(DomainError::InvalidQuestion(format!(
            "name '{}' contains an empty label",
            name
        )));
    }

    Ok(relative)
}
