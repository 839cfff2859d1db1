use super::messages::{a_record, response_for, response_with_id, soa_record};
use async_trait::async_trait;
use ferrous_lookup_domain::DomainError;
use ferrous_lookup_infrastructure::dns::transport::{DnsTransport, TransportResponse};
use hickory_proto::op::Message;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const MOCK_SERVER: &str = "udp://192.0.2.53:53";

/// What the mock server does for one fully qualified name.
#[derive(Clone)]
pub enum Reply {
    Answer(Vec<Ipv4Addr>),
    /// No answers, SOA of the given zone in the authority section.
    NoData(&'static str),
    Fail(DomainError),
    WrongId,
    Garbage,
    Hang,
    /// Sleeps far past the timeout it was given.
    Stall,
}

/// Scripted transport. Names without a script get an empty NOERROR reply.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, Reply>>,
    sent: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, name: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(name.to_string(), reply);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent_names(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsTransport for MockTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let request = Message::from_vec(message_bytes).unwrap();
        let name = request.queries()[0].name().to_string();
        self.sent.lock().unwrap().push(name.clone());

        let reply = self.replies.lock().unwrap().get(&name).cloned();
        let bytes = match reply {
            None => response_for(message_bytes, Vec::new(), Vec::new()),
            Some(Reply::Answer(ips)) => {
                let answers = ips.into_iter().map(|ip| a_record(&name, ip, 300)).collect();
                response_for(message_bytes, answers, Vec::new())
            }
            Some(Reply::NoData(zone)) => {
                response_for(message_bytes, Vec::new(), vec![soa_record(zone, 60)])
            }
            Some(Reply::Fail(error)) => return Err(error),
            Some(Reply::WrongId) => response_with_id(
                &request,
                request.id().wrapping_add(1),
                vec![a_record(&name, Ipv4Addr::LOCALHOST, 300)],
                Vec::new(),
            ),
            Some(Reply::Garbage) => vec![0xde, 0xad],
            Some(Reply::Hang) => {
                tokio::time::sleep(timeout).await;
                return Err(DomainError::TransportTimeout {
                    server: MOCK_SERVER.to_string(),
                });
            }
            Some(Reply::Stall) => {
                tokio::time::sleep(timeout * 50).await;
                return Err(DomainError::TransportTimeout {
                    server: MOCK_SERVER.to_string(),
                });
            }
        };

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }

    fn endpoint(&self) -> &str {
        MOCK_SERVER
    }
}
