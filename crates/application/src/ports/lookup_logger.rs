/// Observational sink for per-attempt traces. Never affects control flow.
pub trait LookupLogger: Send + Sync {
    fn debug(&self, message: &str);

    fn error(&self, message: &str);
}

/// Discards everything. Used when a resolver is built without a logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl LookupLogger for NoopLogger {
    fn debug(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
