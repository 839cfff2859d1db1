use crate::dns_record::{Answer, Authority};
use crate::question::Question;
use serde::Serialize;

/// Result of one lookup.
///
/// `questions` grows with every candidate that was sent. `answers` and
/// `authorities` only ever hold what the last evaluated candidate returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
    pub authorities: Vec<Authority>,
}

impl Response {
    pub fn has_answers(&self) -> bool {
        !self.answers.is_empty()
    }
}
