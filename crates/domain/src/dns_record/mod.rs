mod dns_class;
mod record;
mod record_type;

pub use dns_class::DnsClass;
pub use record::{Answer, Authority, ResourceRecord};
pub use record_type::RecordType;
