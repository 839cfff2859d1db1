use async_trait::async_trait;
use ferrous_lookup_application::ports::Resolver;
use ferrous_lookup_domain::{DomainError, LookupError, Question, Response, ResourceRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockResolver {
    responses: Arc<RwLock<HashMap<String, Response>>>,
    errors: Arc<RwLock<HashMap<String, DomainError>>>,
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    calls: Arc<AtomicUsize>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_response(&self, name: &str, response: Response) {
        self.responses
            .write()
            .await
            .insert(name.to_string(), response);
    }

    pub async fn set_error(&self, name: &str, error: DomainError) {
        self.errors.write().await.insert(name.to_string(), error);
    }

    pub async fn set_delay(&self, name: &str, delay: Duration) {
        self.delays.write().await.insert(name.to_string(), delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resolver for MockResolver {
    async fn lookup(&self, question: &Question) -> Result<Response, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays.read().await.get(&*question.name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.errors.read().await.get(&*question.name) {
            return Err(LookupError::new(error.clone(), vec![question.clone()]));
        }

        let response = self
            .responses
            .read()
            .await
            .get(&*question.name)
            .cloned()
            .unwrap_or_default();

        Ok(Response {
            questions: vec![question.clone()],
            ..response
        })
    }

    fn server(&self) -> &str {
        "mock://resolver"
    }
}

pub fn answer(name: &str, rdata: &str) -> ResourceRecord {
    ResourceRecord {
        name: name.to_string(),
        record_type: "A".to_string(),
        class: "IN".to_string(),
        ttl: 300,
        rdata: rdata.to_string(),
        server: Arc::from("mock://resolver"),
        rtt: Duration::from_millis(1),
    }
}

pub fn response_with(name: &str, rdata: &str) -> Response {
    Response {
        questions: Vec::new(),
        answers: vec![answer(name, rdata)],
        authorities: Vec::new(),
    }
}
