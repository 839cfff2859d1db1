//! Ferrous Lookup Domain Layer
pub mod config;
pub mod dns_protocol;
pub mod dns_record;
pub mod errors;
pub mod options;
pub mod question;
pub mod response;

pub use config::{CliOverrides, Config};
pub use dns_protocol::{DnsProtocol, UpstreamAddr};
pub use dns_record::{Answer, Authority, DnsClass, RecordType, ResourceRecord};
pub use errors::{DomainError, LookupError};
pub use options::{ResolverOptions, SearchList};
pub use question::Question;
pub use response::Response;
