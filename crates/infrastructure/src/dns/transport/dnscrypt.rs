//! DNSCrypt transport over an injected encrypted channel.
//!
//! Certificate discovery, key agreement and framing belong to the
//! [`EncryptedChannel`]. This transport only dials the channel once at
//! construction and then forwards plaintext queries through it.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use ferrous_lookup_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DnsCryptOptions {
    pub use_tcp: bool,
}

impl DnsCryptOptions {
    pub fn network(&self) -> &'static str {
        if self.use_tcp {
            "tcp"
        } else {
            "udp"
        }
    }
}

/// Resolved DNSCrypt server, produced once by [`EncryptedChannel::dial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsCryptEndpoint {
    pub stamp: Arc<str>,
    /// Address answers are attributed to.
    pub server_address: String,
    pub provider_name: String,
    /// Opaque certificate material the channel needs for each exchange.
    pub certificate: Bytes,
}

#[async_trait]
pub trait EncryptedChannel: Send + Sync {
    /// Decodes `stamp` and fetches the resolver certificate.
    async fn dial(
        &self,
        stamp: &str,
        options: DnsCryptOptions,
        timeout: Duration,
    ) -> Result<DnsCryptEndpoint, DomainError>;

    /// Encrypts `query`, sends it and returns the decrypted reply.
    async fn exchange(
        &self,
        query: &[u8],
        endpoint: &DnsCryptEndpoint,
        options: DnsCryptOptions,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError>;
}

pub struct DnsCryptTransport {
    channel: Arc<dyn EncryptedChannel>,
    endpoint: DnsCryptEndpoint,
    options: DnsCryptOptions,
}

impl DnsCryptTransport {
    /// Dials the channel for `stamp`. Any failure is reported as
    /// `EndpointResolution` and leaves no transport behind.
    pub async fn connect(
        stamp: &str,
        channel: Arc<dyn EncryptedChannel>,
        options: DnsCryptOptions,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let endpoint = channel
            .dial(stamp, options, timeout)
            .await
            .map_err(|e| match e {
                DomainError::EndpointResolution { .. } => e,
                other => DomainError::EndpointResolution {
                    server: stamp.to_string(),
                    reason: other.to_string(),
                },
            })?;

        info!(
            server = %endpoint.server_address,
            provider = %endpoint.provider_name,
            net = options.network(),
            "DNSCrypt endpoint resolved"
        );

        Ok(Self {
            channel,
            endpoint,
            options,
        })
    }
}

#[async_trait]
impl DnsTransport for DnsCryptTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(
            timeout,
            self.channel
                .exchange(message_bytes, &self.endpoint, self.options, timeout),
        )
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: self.endpoint.server_address.clone(),
        })??;

        debug!(
            server = %self.endpoint.server_address,
            response_len = bytes.len(),
            "DNSCrypt response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "DNSCrypt",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "DNSCrypt"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint.server_address
    }
}
