use ferrous_lookup_domain::{Answer, Authority, DomainError, ResourceRecord};
use hickory_proto::op::Message;
use hickory_proto::rr::Record;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Answer and authority sections of one exchange in the uniform shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRecords {
    pub answers: Vec<Answer>,
    pub authorities: Vec<Authority>,
}

pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn decode(response_bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })
    }

    /// Converts every answer and authority record, preserving order, and
    /// stamps each with `server` and `rtt`.
    pub fn normalize(message: &Message, rtt: Duration, server: &Arc<str>) -> NormalizedRecords {
        let answers: Vec<Answer> = message
            .answers()
            .iter()
            .map(|record| Self::to_resource_record(record, rtt, server))
            .collect();

        let authorities: Vec<Authority> = message
            .name_servers()
            .iter()
            .map(|record| Self::to_resource_record(record, rtt, server))
            .collect();

        debug!(
            server = %server,
            rcode = ?message.response_code(),
            answers = answers.len(),
            authorities = authorities.len(),
            "DNS response normalized"
        );

        NormalizedRecords {
            answers,
            authorities,
        }
    }

    pub fn parse(
        response_bytes: &[u8],
        rtt: Duration,
        server: &Arc<str>,
    ) -> Result<NormalizedRecords, DomainError> {
        let message = Self::decode(response_bytes)?;
        Ok(Self::normalize(&message, rtt, server))
    }

    fn to_resource_record(record: &Record, rtt: Duration, server: &Arc<str>) -> ResourceRecord {
        ResourceRecord {
            name: record.name().to_string(),
            record_type: record.record_type().to_string(),
            class: record.dns_class().to_string(),
            ttl: record.ttl(),
            rdata: record.data().to_string(),
            server: Arc::clone(server),
            rtt,
        }
    }
}
