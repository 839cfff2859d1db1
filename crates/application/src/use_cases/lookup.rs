use crate::ports::Resolver;
use ferrous_lookup_domain::{LookupError, Question, Response};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result of looking up one input question.
#[derive(Debug)]
pub struct LookupOutcome {
    pub question: Question,
    pub result: Result<Response, LookupError>,
    pub elapsed: Duration,
}

impl LookupOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs independent lookups concurrently against one resolver.
pub struct LookupUseCase {
    resolver: Arc<dyn Resolver>,
}

impl LookupUseCase {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self { resolver }
    }

    /// Outcomes come back in the same order as `questions`.
    pub async fn execute(&self, questions: &[Question]) -> Vec<LookupOutcome> {
        let lookups = questions.iter().map(|question| self.lookup_one(question));
        join_all(lookups).await
    }

    async fn lookup_one(&self, question: &Question) -> LookupOutcome {
        let start = Instant::now();
        let result = self.resolver.lookup(question).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) => debug!(
                question = %question,
                server = %self.resolver.server(),
                answers = response.answers.len(),
                authorities = response.authorities.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Lookup finished"
            ),
            Err(e) => warn!(
                question = %question,
                server = %self.resolver.server(),
                attempted = e.attempted.len(),
                error = %e,
                "Lookup failed"
            ),
        }

        LookupOutcome {
            question: question.clone(),
            result,
            elapsed,
        }
    }
}
