use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// A resource record from the answer or authority section of a response,
/// tagged with the server that supplied it and the round trip it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
    pub name: String,

    pub record_type: String,

    pub class: String,

    pub ttl: u32,

    pub rdata: String,

    pub server: Arc<str>,

    pub rtt: Duration,
}

pub type Answer = ResourceRecord;
pub type Authority = ResourceRecord;

