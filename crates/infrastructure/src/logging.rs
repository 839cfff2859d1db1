use ferrous_lookup_application::ports::LookupLogger;
use tracing::{debug, error};

/// Forwards lookup traces to `tracing` under the `ferrous_lookup::lookup`
/// target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl LookupLogger for TracingLogger {
    fn debug(&self, message: &str) {
        debug!(target: "ferrous_lookup::lookup", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: "ferrous_lookup::lookup", "{}", message);
    }
}

pub use ferrous_lookup_application::ports::NoopLogger;
