use crate::question::Question;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Failed to resolve endpoint {server}: {reason}")]
    EndpointResolution { server: String, reason: String },

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Transport error with {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("Failed to encode DNS message: {0}")]
    MessageEncoding(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),
}

impl DomainError {
    /// Maps an I/O error from a socket operation onto the transport family.
    pub fn from_io(server: impl Into<String>, err: &std::io::Error) -> Self {
        let server = server.into();
        match err.kind() {
            std::io::ErrorKind::TimedOut => DomainError::TransportTimeout { server },
            std::io::ErrorKind::ConnectionRefused => {
                DomainError::TransportConnectionRefused { server }
            }
            std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::ConnectionAborted => {
                DomainError::TransportConnectionReset { server }
            }
            _ => DomainError::Transport {
                server,
                reason: err.to_string(),
            },
        }
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::Transport { .. }
        )
    }
}

/// Failure of a single lookup.
///
/// Displays as the underlying error. `attempted` lists every question that
/// was put on the wire before the lookup stopped, the failing one last.
#[derive(Error, Debug, Clone)]
#[error("{source}")]
pub struct LookupError {
    #[source]
    pub source: DomainError,
    pub attempted: Vec<Question>,
}

impl LookupError {
    pub fn new(source: DomainError, attempted: Vec<Question>) -> Self {
        Self { source, attempted }
    }

    pub fn error(&self) -> &DomainError {
        &self.source
    }
}

impl From<DomainError> for LookupError {
    fn from(source: DomainError) -> Self {
        Self {
            source,
            attempted: Vec::new(),
        }
    }
}
