use async_trait::async_trait;
use ferrous_lookup_application::ports::{Resolver, ResponseCache};
use ferrous_lookup_domain::{LookupError, Question, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Serves repeated questions from a [`ResponseCache`].
///
/// Only responses with at least one answer are stored. Errors and empty
/// responses always go back to the inner resolver.
pub struct CachedResolver {
    inner: Arc<dyn Resolver>,
    cache: Arc<dyn ResponseCache>,
    ttl: Duration,
}

impl CachedResolver {
    pub fn new(inner: Arc<dyn Resolver>, cache: Arc<dyn ResponseCache>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    /// `name|type|class`, lower-cased, with the name fully qualified.
    pub fn cache_key(question: &Question) -> String {
        let dot = if question.is_fqdn() { "" } else { "." };
        format!(
            "{}{}|{}|{}",
            question.name, dot, question.record_type, question.class
        )
        .to_ascii_lowercase()
    }
}

#[async_trait]
impl Resolver for CachedResolver {
    async fn lookup(&self, question: &Question) -> Result<Response, LookupError> {
        let key = Self::cache_key(question);

        if let Some(response) = self.cache.get(&key) {
            debug!(question = %question, "Cache HIT");
            return Ok(response);
        }

        debug!(question = %question, "Cache MISS");
        let response = self.inner.lookup(question).await?;

        if response.has_answers() {
            self.cache.set(key, response.clone(), self.ttl);
        }

        Ok(response)
    }

    fn server(&self) -> &str {
        self.inner.server()
    }
}
