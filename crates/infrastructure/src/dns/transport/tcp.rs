//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Each message is preceded by its length as a big-endian u16. One
//! connection per exchange.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_lookup_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
    endpoint: String,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            endpoint: format!("tcp://{}", server_addr),
        }
    }

    async fn connect(&self, timeout: Duration) -> Result<TcpStream, DomainError> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.endpoint.clone(),
            })?
            .map_err(|e| DomainError::from_io(&self.endpoint, &e))?;

        stream
            .set_nodelay(true)
            .map_err(|e| DomainError::from_io(&self.endpoint, &e))?;

        Ok(stream)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
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

        debug!(
            server = %self.server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

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
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
    server: &str,
) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        DomainError::MessageEncoding(format!(
            "message of {} bytes exceeds the TCP frame limit",
            message_bytes.len()
        ))
    })?;

    stream
        .write_all(&length.to_be_bytes())
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;
    stream
        .write_all(message_bytes)
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;

    Ok(())
}

pub(crate) async fn read_with_length_prefix<S>(
    stream: &mut S,
    server: &str,
) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;

    let response_len = u16::from_be_bytes(len_buf) as usize;
    let mut response = vec![0u8; response_len];
    stream
        .read_exact(&mut response)
        .await
        .map_err(|e| DomainError::from_io(server, &e))?;

    Ok(response)
}
