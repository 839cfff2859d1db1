use ferrous_lookup_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves a hostname to all its IP addresses (IPv4 + IPv6) through the
/// system resolver.
pub async fn resolve_all(
    hostname: &str,
    port: u16,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, DomainError> {
    let target = format!("{}:{}", hostname, port);

    let addrs_iter = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::EndpointResolution {
            server: target.clone(),
            reason: "timed out".to_string(),
        })?
        .map_err(|e| DomainError::EndpointResolution {
            server: target.clone(),
            reason: e.to_string(),
        })?;

    let addrs: Vec<SocketAddr> = addrs_iter.collect();

    if addrs.is_empty() {
        return Err(DomainError::EndpointResolution {
            server: target,
            reason: "no addresses found".to_string(),
        });
    }

    Ok(addrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_ip_literal() {
        let addrs = resolve_all("127.0.0.1", 5353, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(addrs, vec!["127.0.0.1:5353".parse::<SocketAddr>().unwrap()]);
    }
}
