pub mod query;
pub mod resolver;
pub mod transport;

pub use query::{expand, CandidateMessage, MessageBuilder, ResponseNormalizer};
pub use resolver::{CachedResolver, LookupResolver, ResolverBuilder};
