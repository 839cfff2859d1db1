//! HTTPS Transport for DNS queries, DNS-over-HTTPS (RFC 8484)
//!
//! Queries are POSTed with `application/dns-message`; the body of a
//! successful reply is the raw DNS response.

use super::{DnsTransport, TransportOptions, TransportResponse};
use async_trait::async_trait;
use ferrous_lookup_domain::DomainError;
use std::time::Duration;
use tracing::debug;

const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// HTTP client for one DoH transport.
pub fn http_client(options: &TransportOptions) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(options.https_pool_max_idle_per_host)
        .build()
        .map_err(|e| DomainError::EndpointResolution {
            server: "https".to_string(),
            reason: format!("failed to build HTTP client: {}", e),
        })
}

pub struct HttpsTransport {
    url: String,
    client: reqwest::Client,
}

impl HttpsTransport {
    pub fn new(url: String, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    fn map_request_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::TransportTimeout {
                server: self.url.clone(),
            }
        } else if e.is_connect() {
            DomainError::TransportConnectionRefused {
                server: self.url.clone(),
            }
        } else {
            DomainError::Transport {
                server: self.url.clone(),
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl DnsTransport for HttpsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        debug!(url = %self.url, message_len = message_bytes.len(), "Sending DoH query");

        let response = tokio::time::timeout(
            timeout,
            self.client
                .post(&self.url)
                .header("Content-Type", DNS_MESSAGE_CONTENT_TYPE)
                .header("Accept", DNS_MESSAGE_CONTENT_TYPE)
                .body(message_bytes.to_vec())
                .send(),
        )
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: self.url.clone(),
        })?
        .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Transport {
                server: self.url.clone(),
                reason: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        let response_bytes: bytes::Bytes = tokio::time::timeout(timeout, response.bytes())
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.url.clone(),
            })?
            .map_err(|e| self.map_request_error(e))?;

        debug!(url = %self.url, response_len = response_bytes.len(), "DoH response received");

        Ok(TransportResponse {
            bytes: response_bytes.to_vec(),
            protocol_used: "HTTPS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
