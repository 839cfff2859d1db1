//! Reader for the `/etc/resolv.conf` format.
//!
//! Only the settings that shape a lookup are kept: name servers, the search
//! list, `ndots` and `timeout`. Unknown keywords and options are skipped so
//! that distribution-specific extensions do not break parsing.

use super::errors::ConfigError;
use crate::options::SearchList;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const SYSTEM_RESOLV_CONF: &str = "/etc/resolv.conf";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvConf {
    pub nameservers: Vec<SocketAddr>,
    pub search: SearchList,
    pub ndots: Option<usize>,
    pub timeout: Option<Duration>,
}

impl ResolvConf {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Ok(Self::parse(&contents))
    }

    /// Reads the system file, returning `None` if it is missing or unreadable.
    pub fn system() -> Option<Self> {
        Self::from_file(SYSTEM_RESOLV_CONF).ok()
    }

    pub fn parse(contents: &str) -> Self {
        let mut conf = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            let mut words = line.split_whitespace();
            match words.next() {
                Some("nameserver") => {
                    if let Some(ip) = words.next().and_then(|w| w.parse::<IpAddr>().ok()) {
                        conf.nameservers.push(SocketAddr::new(ip, 53));
                    }
                }
                // `domain` and `search` override each other; the last one wins.
                Some("domain") => {
                    conf.search = words.next().into_iter().collect();
                }
                Some("search") => {
                    conf.search = words.collect();
                }
                Some("options") => conf.parse_options(words),
                _ => {}
            }
        }

        conf
    }

    fn parse_options<'a>(&mut self, words: impl Iterator<Item = &'a str>) {
        for word in words {
            match word.split_once(':') {
                Some(("ndots", n)) => {
                    if let Ok(n) = n.parse() {
                        self.ndots = Some(n);
                    }
                }
                Some(("timeout", n)) => {
                    if let Ok(n) = n.parse() {
                        self.timeout = Some(Duration::from_secs(n));
                    }
                }
                _ => {}
            }
        }
    }
}
