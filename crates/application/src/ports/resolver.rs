use async_trait::async_trait;
use ferrous_lookup_domain::{LookupError, Question, Response};

/// Uniform lookup interface over every transport.
///
/// Implementations hold no per-call mutable state, so one instance can serve
/// concurrent callers.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn lookup(&self, question: &Question) -> Result<Response, LookupError>;

    /// Human-readable name of the server this resolver talks to.
    fn server(&self) -> &str;
}
