use ferrous_lookup_application::ports::Resolver;
use ferrous_lookup_domain::{Config, DnsProtocol};
use ferrous_lookup_infrastructure::cache::ExpiringCache;
use ferrous_lookup_infrastructure::dns::ResolverBuilder;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub async fn build_resolver(config: &Config) -> anyhow::Result<Arc<dyn Resolver>> {
    let protocol = config.protocol()?;
    ensure_supported(&protocol)?;
    let options = config.resolver_options();

    info!(
        server = %protocol,
        ndots = options.ndots,
        search = ?options.search_list.as_slice(),
        timeout_ms = options.timeout.as_millis() as u64,
        "Resolver options"
    );

    let mut builder = ResolverBuilder::new(protocol).with_options(options);

    if config.cache.enabled {
        builder = builder.with_cache(
            Arc::new(ExpiringCache::new()),
            Duration::from_secs(config.cache.ttl_secs),
        );
    }

    Ok(builder.build().await?)
}

/// DNSCrypt needs an `EncryptedChannel` from the embedding program, which
/// the command line has no way to supply.
fn ensure_supported(protocol: &DnsProtocol) -> anyhow::Result<()> {
    if let DnsProtocol::DnsCrypt { .. } = protocol {
        anyhow::bail!(
            "{} is a DNSCrypt server; DNSCrypt is only available through the library API",
            protocol
        );
    }
    Ok(())
}
