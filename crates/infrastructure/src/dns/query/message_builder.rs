//! Builds the wire form of one query candidate with `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use ferrous_lookup_domain::{DomainError, Question};
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// One fully qualified query attempt, ready for a transport.
#[derive(Debug, Clone)]
pub struct CandidateMessage {
    pub id: u16,
    pub question: Question,
    pub bytes: Vec<u8>,
}

/// UDP payload size advertised through EDNS(0).
pub const EDNS_UDP_PAYLOAD: u16 = 4096;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Encodes a recursive query with a random id and a single question,
    /// advertising an EDNS(0) payload of [`EDNS_UDP_PAYLOAD`] bytes.
    ///
    /// Names the codec refuses (oversized labels or names) are reported as
    /// `InvalidQuestion`.
    pub fn build_query(question: Question) -> Result<CandidateMessage, DomainError> {
        let name = Name::from_str(&question.name).map_err(|e| {
            DomainError::InvalidQuestion(format!("Invalid name '{}': {}", question.name, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(&question.record_type));
        query.set_query_class(RecordTypeMapper::class_to_hickory(&question.class));

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);
        message
            .extensions_mut()
            .get_or_insert_with(Edns::new)
            .set_max_payload(EDNS_UDP_PAYLOAD);

        let bytes = Self::serialize_message(&message)?;
        Ok(CandidateMessage {
            id,
            question,
            bytes,
        })
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::MessageEncoding(e.to_string()))?;

        Ok(buf)
    }
}
