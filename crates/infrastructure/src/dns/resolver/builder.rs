use super::super::transport::resolver::resolve_all;
use super::super::transport::{
    create_transport, DnsCryptOptions, DnsCryptTransport, DnsTransport, EncryptedChannel,
    Transport, TransportOptions,
};
use super::cache_layer::CachedResolver;
use super::core::LookupResolver;
use crate::logging::TracingLogger;
use ferrous_lookup_application::ports::{LookupLogger, NoopLogger, Resolver, ResponseCache};
use ferrous_lookup_domain::{DnsProtocol, DomainError, ResolverOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builds a ready [`Resolver`] for one server descriptor.
///
/// Endpoint discovery happens once, in [`ResolverBuilder::build`]. The
/// logger defaults to [`TracingLogger`]; the cache is off unless set.
pub struct ResolverBuilder {
    protocol: DnsProtocol,
    options: ResolverOptions,
    logger: Arc<dyn LookupLogger>,
    cache: Option<(Arc<dyn ResponseCache>, Duration)>,
    channel: Option<Arc<dyn EncryptedChannel>>,
    dnscrypt_options: DnsCryptOptions,
    transport_options: TransportOptions,
}

impl ResolverBuilder {
    pub fn new(protocol: DnsProtocol) -> Self {
        Self {
            protocol,
            options: ResolverOptions::default(),
            logger: Arc::new(TracingLogger),
            cache: None,
            channel: None,
            dnscrypt_options: DnsCryptOptions::default(),
            transport_options: TransportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn LookupLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn without_logger(mut self) -> Self {
        self.logger = Arc::new(NoopLogger);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResponseCache>, ttl: Duration) -> Self {
        self.cache = Some((cache, ttl));
        self
    }

    pub fn with_encrypted_channel(mut self, channel: Arc<dyn EncryptedChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_dnscrypt_options(mut self, options: DnsCryptOptions) -> Self {
        self.dnscrypt_options = options;
        self
    }

    pub fn with_transport_options(mut self, options: TransportOptions) -> Self {
        self.transport_options = options;
        self
    }

    pub async fn build(self) -> Result<Arc<dyn Resolver>, DomainError> {
        info!(
            server = %self.protocol,
            protocol = self.protocol.protocol_name(),
            ndots = self.options.ndots,
            search = self.options.search_list.len(),
            cache = self.cache.is_some(),
            "Building DNS resolver"
        );

        let transport = self.connect_transport().await?;
        let core = LookupResolver::new(transport, self.options).with_logger(self.logger);

        let mut resolver: Arc<dyn Resolver> = Arc::new(core);

        if let Some((cache, ttl)) = self.cache {
            resolver = Arc::new(CachedResolver::new(resolver, cache, ttl));
        }

        info!(server = %resolver.server(), "DNS resolver built successfully");
        Ok(resolver)
    }

    async fn connect_transport(&self) -> Result<Arc<dyn DnsTransport>, DomainError> {
        if let DnsProtocol::DnsCrypt { stamp } = &self.protocol {
            let channel = self.channel.clone().ok_or_else(|| DomainError::EndpointResolution {
                server: stamp.to_string(),
                reason: "no encrypted channel configured for DNSCrypt".to_string(),
            })?;
            let transport = DnsCryptTransport::connect(
                stamp,
                channel,
                self.dnscrypt_options,
                self.options.timeout,
            )
            .await?;
            return Ok(Arc::new(Transport::DnsCrypt(transport)));
        }

        let protocol = self.resolve_endpoint().await?;
        let transport = create_transport(&protocol, &self.transport_options)?;
        Ok(Arc::new(transport))
    }

    /// Pins a hostname descriptor to the first address the system resolver
    /// returns.
    async fn resolve_endpoint(&self) -> Result<DnsProtocol, DomainError> {
        let Some((hostname, port)) = self.protocol.unresolved_host() else {
            return Ok(self.protocol.clone());
        };

        let addrs = resolve_all(hostname, port, self.options.timeout).await?;
        let addr = addrs[0];
        info!(hostname = %hostname, resolved = %addr, "Resolved server hostname");
        Ok(self.protocol.with_resolved_addr(addr))
    }
}
