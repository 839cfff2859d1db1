use std::ops;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_NDOTS: usize = 1;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Ordered list of domain suffixes tried against relative names.
///
/// Suffixes are stored without leading or trailing dots. The root and
/// duplicates are never added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchList {
    search: Vec<Arc<str>>,
}

impl SearchList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, suffix: &str) {
        let suffix = suffix.trim().trim_matches('.');
        if suffix.is_empty() || self.search.iter().any(|s| s.eq_ignore_ascii_case(suffix)) {
            return;
        }
        self.search.push(suffix.into());
    }

    pub fn as_slice(&self) -> &[Arc<str>] {
        &self.search
    }
}

impl<S: AsRef<str>> FromIterator<S> for SearchList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for suffix in iter {
            list.push(suffix.as_ref());
        }
        list
    }
}

impl ops::Deref for SearchList {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.search
    }
}

/// Per-resolver lookup settings. A resolver takes its own copy at
/// construction and never changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    pub ndots: usize,
    pub search_list: SearchList,
    pub timeout: Duration,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            ndots: DEFAULT_NDOTS,
            search_list: SearchList::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ResolverOptions {
    /// Negative thresholds behave like zero.
    pub fn with_ndots(mut self, ndots: i64) -> Self {
        self.ndots = ndots.max(0) as usize;
        self
    }

    pub fn with_search_list(mut self, search_list: SearchList) -> Self {
        self.search_list = search_list;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
