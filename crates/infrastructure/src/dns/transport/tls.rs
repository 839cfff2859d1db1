//! TLS Transport for DNS queries, DNS-over-TLS (RFC 7858)
//!
//! TCP framing inside a rustls session. The client config is handed in by
//! the caller, normally from [`client_config`].

use super::tcp::{read_with_length_prefix, send_with_length_prefix};
use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_lookup_domain::DomainError;
use rustls::pki_types::ServerName;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tracing::debug;

/// Client config trusting the bundled webpki roots, built on the aws-lc-rs
/// provider.
pub fn client_config() -> Result<Arc<rustls::ClientConfig>, DomainError> {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let config = rustls::ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| DomainError::EndpointResolution {
            server: "tls".to_string(),
            reason: format!("failed to build TLS config: {}", e),
        })?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(Arc::new(config))
}

pub struct TlsTransport {
    server_addr: SocketAddr,
    hostname: String,
    config: Arc<rustls::ClientConfig>,
    endpoint: String,
}

impl TlsTransport {
    pub fn new(server_addr: SocketAddr, hostname: String, config: Arc<rustls::ClientConfig>) -> Self {
        let endpoint = format!("tls://{}:{}", hostname, server_addr.port());
        Self {
            server_addr,
            hostname,
            config,
            endpoint,
        }
    }

    async fn connect(&self, timeout: Duration) -> Result<TlsStream<TcpStream>, DomainError> {
        let connector = tokio_rustls::TlsConnector::from(Arc::clone(&self.config));

        let server_name = ServerName::try_from(self.hostname.clone()).map_err(|e| {
            DomainError::EndpointResolution {
                server: self.endpoint.clone(),
                reason: format!("invalid TLS hostname '{}': {}", self.hostname, e),
            }
        })?;

        let tcp_stream = tokio::time::timeout(timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.endpoint.clone(),
            })?
            .map_err(|e| DomainError::from_io(&self.endpoint, &e))?;

        let tls_stream = tokio::time::timeout(timeout, connector.connect(server_name, tcp_stream))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.endpoint.clone(),
            })?
            .map_err(|e| DomainError::Transport {
                server: self.endpoint.clone(),
                reason: format!("TLS handshake failed: {}", e),
            })?;

        debug!(server = %self.server_addr, hostname = %self.hostname, "TLS connection established");
        Ok(tls_stream)
    }
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let mut stream = self.connect(timeout).await?;

        tokio::time::timeout(
            timeout,
            send_with_length_prefix(&mut stream, message_bytes, &self.endpoint),
        )
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: self.endpoint.clone(),
        })??;

        let response_bytes = tokio::time::timeout(
            timeout,
            read_with_length_prefix(&mut stream, &self.endpoint),
        )
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: self.endpoint.clone(),
        })??;

        debug!(
            server = %self.server_addr,
            response_len = response_bytes.len(),
            "TLS response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TLS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
