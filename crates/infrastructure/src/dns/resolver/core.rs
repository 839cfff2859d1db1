use super::super::query::{expand, CandidateMessage, NormalizedRecords, ResponseNormalizer};
use super::super::transport::DnsTransport;
use crate::logging::TracingLogger;
use async_trait::async_trait;
use ferrous_lookup_application::ports::{LookupLogger, Resolver};
use ferrous_lookup_domain::{DomainError, LookupError, Question, ResolverOptions, Response};
use std::sync::Arc;
use std::time::Instant;

/// Walks the expanded candidates of a question one at a time over a single
/// transport.
///
/// The first candidate with at least one answer ends the lookup. Candidates
/// that come back empty move on to the next one. Any error ends the lookup
/// at once, carrying every candidate sent so far.
pub struct LookupResolver {
    transport: Arc<dyn DnsTransport>,
    options: ResolverOptions,
    logger: Arc<dyn LookupLogger>,
    server: Arc<str>,
}

impl LookupResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, options: ResolverOptions) -> Self {
        let server: Arc<str> = Arc::from(transport.endpoint());
        Self {
            transport,
            options,
            logger: Arc::new(TracingLogger),
            server,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn LookupLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// One round trip, bounded by `options.timeout` as a whole however many
    /// network steps the transport takes.
    async fn exchange(&self, candidate: &CandidateMessage) -> Result<NormalizedRecords, DomainError> {
        let start = Instant::now();
        let response = tokio::time::timeout(
            self.options.timeout,
            self.transport.send(&candidate.bytes, self.options.timeout),
        )
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: self.server.to_string(),
        })??;
        let rtt = start.elapsed();

        let message = ResponseNormalizer::decode(&response.bytes)?;
        if message.id() != candidate.id {
            return Err(DomainError::Transport {
                server: self.server.to_string(),
                reason: format!(
                    "response id mismatch: sent {:#06x}, received {:#06x}",
                    candidate.id,
                    message.id()
                ),
            });
        }

        Ok(ResponseNormalizer::normalize(&message, rtt, &self.server))
    }
}

#[async_trait]
impl Resolver for LookupResolver {
    async fn lookup(&self, question: &Question) -> Result<Response, LookupError> {
        let candidates = expand(question, self.options.ndots, &self.options.search_list)?;
        let mut response = Response::default();

        for candidate in candidates {
            self.logger.debug(&format!(
                "attempting to resolve {}, ns: {}, ndots: {}",
                candidate.question.name, self.server, self.options.ndots
            ));

            response.questions.push(candidate.question.clone());

            let records = match self.exchange(&candidate).await {
                Ok(records) => records,
                Err(e) => {
                    self.logger.error(&format!(
                        "failed to resolve {}, ns: {}: {}",
                        candidate.question.name, self.server, e
                    ));
                    return Err(LookupError::new(e, response.questions));
                }
            };

            response.answers = records.answers;
            response.authorities = records.authorities;

            if response.has_answers() {
                break;
            }
        }

        Ok(response)
    }

    fn server(&self) -> &str {
        &self.server
    }
}
