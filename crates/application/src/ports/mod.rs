mod lookup_logger;
mod resolver;
mod response_cache;

pub use lookup_logger::{LookupLogger, NoopLogger};
pub use resolver::Resolver;
pub use response_cache::ResponseCache;

// Re-export for convenience
pub use ferrous_lookup_domain::{LookupError, Question, Response};
