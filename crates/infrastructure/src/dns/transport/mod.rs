pub mod dnscrypt;
#[cfg(feature = "dns-over-https")]
pub mod https;
pub mod resolver;
pub mod tcp;
#[cfg(feature = "dns-over-rustls")]
pub mod tls;
pub mod udp;

use async_trait::async_trait;
use ferrous_lookup_domain::{DnsProtocol, DomainError};
use std::time::Duration;

pub use dnscrypt::{DnsCryptEndpoint, DnsCryptOptions, DnsCryptTransport, EncryptedChannel};

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One encoded query in, one encoded response out.
///
/// Implementations are shared by concurrent lookups and must honour
/// `timeout` on every network operation.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;

    /// Descriptor of the server this transport talks to.
    fn endpoint(&self) -> &str;
}

/// Settings for the transports built by [`create_transport`].
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Idle HTTP connections kept per DoH host.
    pub https_pool_max_idle_per_host: usize,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            https_pool_max_idle_per_host: 4,
        }
    }
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
    #[cfg(feature = "dns-over-rustls")]
    Tls(tls::TlsTransport),
    #[cfg(feature = "dns-over-https")]
    Https(https::HttpsTransport),
    DnsCrypt(dnscrypt::DnsCryptTransport),
}

#[async_trait]
impl DnsTransport for Transport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => t.send(message_bytes, timeout).await,
            Self::Tcp(t) => t.send(message_bytes, timeout).await,
            #[cfg(feature = "dns-over-rustls")]
            Self::Tls(t) => t.send(message_bytes, timeout).await,
            #[cfg(feature = "dns-over-https")]
            Self::Https(t) => t.send(message_bytes, timeout).await,
            Self::DnsCrypt(t) => t.send(message_bytes, timeout).await,
        }
    }

    fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
            #[cfg(feature = "dns-over-rustls")]
            Self::Tls(_) => "TLS",
            #[cfg(feature = "dns-over-https")]
            Self::Https(_) => "HTTPS",
            Self::DnsCrypt(_) => "DNSCrypt",
        }
    }

    fn endpoint(&self) -> &str {
        match self {
            Self::Udp(t) => t.endpoint(),
            Self::Tcp(t) => t.endpoint(),
            #[cfg(feature = "dns-over-rustls")]
            Self::Tls(t) => t.endpoint(),
            #[cfg(feature = "dns-over-https")]
            Self::Https(t) => t.endpoint(),
            Self::DnsCrypt(t) => t.endpoint(),
        }
    }
}

/// Builds the transport for a plain, TLS or HTTPS descriptor.
///
/// Host names must already be resolved. DNSCrypt descriptors need an
/// encrypted channel and are connected with [`DnsCryptTransport::connect`].
pub fn create_transport(
    protocol: &DnsProtocol,
    options: &TransportOptions,
) -> Result<Transport, DomainError> {
    let resolved = |protocol: &DnsProtocol| {
        protocol
            .socket_addr()
            .ok_or_else(|| DomainError::EndpointResolution {
                server: protocol.to_string(),
                reason: "address is not resolved".to_string(),
            })
    };

    match protocol {
        DnsProtocol::Udp { .. } => Ok(Transport::Udp(udp::UdpTransport::new(resolved(
            protocol,
        )?))),
        DnsProtocol::Tcp { .. } => Ok(Transport::Tcp(tcp::TcpTransport::new(resolved(
            protocol,
        )?))),

        #[cfg(feature = "dns-over-rustls")]
        DnsProtocol::Tls { hostname, .. } => Ok(Transport::Tls(tls::TlsTransport::new(
            resolved(protocol)?,
            hostname.to_string(),
            tls::client_config()?,
        ))),

        #[cfg(not(feature = "dns-over-rustls"))]
        DnsProtocol::Tls { .. } => Err(DomainError::EndpointResolution {
            server: protocol.to_string(),
            reason: "TLS feature not enabled".to_string(),
        }),

        #[cfg(feature = "dns-over-https")]
        DnsProtocol::Https { url, .. } => {
            let client = https::http_client(options)?;
            Ok(Transport::Https(https::HttpsTransport::new(
                url.to_string(),
                client,
            )))
        }

        #[cfg(not(feature = "dns-over-https"))]
        DnsProtocol::Https { .. } => Err(DomainError::EndpointResolution {
            server: protocol.to_string(),
            reason: "HTTPS feature not enabled".to_string(),
        }),

        DnsProtocol::DnsCrypt { stamp } => Err(DomainError::EndpointResolution {
            server: stamp.to_string(),
            reason: "DNSCrypt requires an encrypted channel".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_udp_transport() {
        let protocol: DnsProtocol = "udp://192.0.2.53:53".parse().unwrap();
        let transport = create_transport(&protocol, &TransportOptions::default()).unwrap();
        assert_eq!(transport.protocol_name(), "UDP");
        assert_eq!(transport.endpoint(), "udp://192.0.2.53:53");
    }

    #[test]
    fn test_create_tcp_transport() {
        let protocol: DnsProtocol = "tcp://192.0.2.53:5353".parse().unwrap();
        let transport = create_transport(&protocol, &TransportOptions::default()).unwrap();
        assert_eq!(transport.protocol_name(), "TCP");
    }

    #[test]
    fn test_unresolved_hostname_is_rejected() {
        let protocol: DnsProtocol = "udp://dns.example:53".parse().unwrap();
        let result = create_transport(&protocol, &TransportOptions::default());
        assert!(matches!(
            result,
            Err(DomainError::EndpointResolution { .. })
        ));
    }

    #[test]
    fn test_dnscrypt_needs_channel() {
        let protocol: DnsProtocol = "sdns://AQcAAAAAAAAA".parse().unwrap();
        let result = create_transport(&protocol, &TransportOptions::default());
        assert!(matches!(
            result,
            Err(DomainError::EndpointResolution { .. })
        ));
    }
}
