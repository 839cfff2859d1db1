use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolv_conf::ResolvConf;
use super::resolver::ResolverConfig;
use crate::dns_protocol::DnsProtocol;
use crate::options::{ResolverOptions, SearchList, DEFAULT_NDOTS};

pub const DEFAULT_SERVER: &str = "udp://1.1.1.1:53";

/// Main configuration structure for Ferrous Lookup
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server descriptor. Unset means the first resolv.conf nameserver,
    /// else `DEFAULT_SERVER`.
    #[serde(default)]
    pub server: Option<String>,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-lookup.toml in current directory
    /// 3. /etc/ferrous-lookup/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("ferrous-lookup.toml").exists() {
            Self::from_file("ferrous-lookup.toml")?
        } else if std::path::Path::new("/etc/ferrous-lookup/config.toml").exists() {
            Self::from_file("/etc/ferrous-lookup/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.server {
            self.server = Some(server);
        }
        if let Some(ndots) = overrides.ndots {
            self.resolver.ndots = Some(ndots);
        }
        if let Some(search) = overrides.search {
            self.resolver.search = Some(search);
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout_ms;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout cannot be 0".to_string(),
            ));
        }

        if let Some(server) = &self.server {
            server
                .parse::<DnsProtocol>()
                .map_err(ConfigError::Validation)?;
        }

        Ok(())
    }

    fn system_conf(&self) -> Option<ResolvConf> {
        if self.resolver.use_system {
            ResolvConf::system()
        } else {
            None
        }
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        self.resolver_options_with(self.system_conf().as_ref())
    }

    /// Builds resolver options, filling unset values from `system`.
    pub fn resolver_options_with(&self, system: Option<&ResolvConf>) -> ResolverOptions {
        let ndots = match (self.resolver.ndots, system.and_then(|s| s.ndots)) {
            (Some(ndots), _) => ndots,
            (None, Some(ndots)) => ndots as i64,
            (None, None) => DEFAULT_NDOTS as i64,
        };

        let search_list = match (&self.resolver.search, system) {
            (Some(search), _) => search.iter().collect::<SearchList>(),
            (None, Some(system)) => system.search.clone(),
            (None, None) => SearchList::new(),
        };

        ResolverOptions::default()
            .with_ndots(ndots)
            .with_search_list(search_list)
            .with_timeout(Duration::from_millis(self.resolver.timeout_ms))
    }

    pub fn protocol(&self) -> Result<DnsProtocol, ConfigError> {
        self.protocol_with(self.system_conf().as_ref())
    }

    pub fn protocol_with(&self, system: Option<&ResolvConf>) -> Result<DnsProtocol, ConfigError> {
        let descriptor = match (&self.server, system.and_then(|s| s.nameservers.first())) {
            (Some(server), _) => server.clone(),
            (None, Some(nameserver)) => nameserver.to_string(),
            (None, None) => DEFAULT_SERVER.to_string(),
        };
        descriptor.parse().map_err(ConfigError::Validation)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server: Option<String>,
    pub ndots: Option<i64>,
    pub search: Option<Vec<String>>,
    pub timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}
