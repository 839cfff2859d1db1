use ferrous_lookup_domain::Response;
use std::time::Duration;

/// Key/value store for whole lookup responses. Expiry is enforced by the
/// implementation: `get` never returns an entry older than its `ttl`.
pub trait ResponseCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Response>;

    fn set(&self, key: String, value: Response, ttl: Duration);
}
