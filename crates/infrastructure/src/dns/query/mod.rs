pub mod expander;
pub mod message_builder;
pub mod normalizer;
pub mod record_type_map;

pub use expander::{candidate_names, expand};
pub use message_builder::{CandidateMessage, MessageBuilder};
pub use normalizer::{NormalizedRecords, ResponseNormalizer};
pub use record_type_map::RecordTypeMapper;
