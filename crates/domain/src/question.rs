use crate::dns_record::{DnsClass, RecordType};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A single resolution request as the caller states it.
///
/// `name` may be relative (`"www"`) or absolute (`"www.example.com."`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Question {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: DnsClass,
}

impl Question {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: DnsClass::IN,
        }
    }

    pub fn with_class(mut self, class: DnsClass) -> Self {
        self.class = class;
        self
    }

    pub fn is_fqdn(&self) -> bool {
        self.name.ends_with('.')
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.class, self.record_type)
    }
}
