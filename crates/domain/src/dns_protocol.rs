use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Server address from a descriptor. Host names stay unresolved until the
/// resolver is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl UpstreamAddr {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            UpstreamAddr::Resolved(addr) => Some(*addr),
            UpstreamAddr::Unresolved { .. } => None,
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            UpstreamAddr::Resolved(addr) => addr.port(),
            UpstreamAddr::Unresolved { port, .. } => *port,
        }
    }

    fn host(&self) -> Arc<str> {
        match self {
            UpstreamAddr::Resolved(addr) => addr.ip().to_string().into(),
            UpstreamAddr::Unresolved { hostname, .. } => hostname.clone(),
        }
    }
}

impl FromStr for UpstreamAddr {
    type Err = String;

    /// Accepts `IP:PORT`, `[IPv6]:PORT` and `HOST:PORT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(UpstreamAddr::Resolved(addr));
        }

        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("Address '{}' has no port", s))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| format!("Invalid port in address '{}'", s))?;

        if host.is_empty() || host.contains(['[', ']', ':', '/']) {
            return Err(format!("Invalid host in address '{}'", s));
        }

        Ok(UpstreamAddr::Unresolved {
            hostname: host.into(),
            port,
        })
    }
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

/// Where and how to reach one DNS server.
///
/// Parsed from `udp://ADDR`, `tcp://ADDR`, `tls://ADDR`, `https://URL`,
/// `sdns://STAMP`, or a bare `IP[:PORT]` meaning UDP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DnsProtocol {
    Udp {
        addr: UpstreamAddr,
    },
    Tcp {
        addr: UpstreamAddr,
    },
    /// `hostname` is the name the server certificate is checked against.
    Tls {
        addr: UpstreamAddr,
        hostname: Arc<str>,
    },
    Https {
        url: Arc<str>,
    },
    /// Certificate material is fetched when the resolver is built.
    DnsCrypt {
        stamp: Arc<str>,
    },
}

impl DnsProtocol {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.upstream_addr().and_then(UpstreamAddr::socket_addr)
    }

    /// Host and port still waiting for the system resolver.
    pub fn unresolved_host(&self) -> Option<(&str, u16)> {
        match self.upstream_addr()? {
            UpstreamAddr::Unresolved { hostname, port } => Some((hostname, *port)),
            UpstreamAddr::Resolved(_) => None,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            DnsProtocol::Udp { .. } => "UDP",
            DnsProtocol::Tcp { .. } => "TCP",
            DnsProtocol::Tls { .. } => "TLS",
            DnsProtocol::Https { .. } => "HTTPS",
            DnsProtocol::DnsCrypt { .. } => "DNSCrypt",
        }
    }

    /// Pins the address to `resolved`. TLS keeps its certificate name;
    /// HTTPS and DNSCrypt carry no address and come back unchanged.
    pub fn with_resolved_addr(&self, resolved: SocketAddr) -> Self {
        let addr = UpstreamAddr::Resolved(resolved);
        match self {
            DnsProtocol::Udp { .. } => DnsProtocol::Udp { addr },
            DnsProtocol::Tcp { .. } => DnsProtocol::Tcp { addr },
            DnsProtocol::Tls { hostname, .. } => DnsProtocol::Tls {
                addr,
                hostname: hostname.clone(),
            },
            DnsProtocol::Https { .. } | DnsProtocol::DnsCrypt { .. } => self.clone(),
        }
    }

    fn upstream_addr(&self) -> Option<&UpstreamAddr> {
        match self {
            DnsProtocol::Udp { addr } | DnsProtocol::Tcp { addr } | DnsProtocol::Tls { addr, .. } => {
                Some(addr)
            }
            DnsProtocol::Https { .. } | DnsProtocol::DnsCrypt { .. } => None,
        }
    }
}

impl FromStr for DnsProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((scheme, rest)) = s.split_once("://") else {
            return parse_bare(s);
        };

        if rest.is_empty() {
            return Err(format!("Missing server after '{}://'", scheme));
        }

        match scheme {
            "udp" => Ok(DnsProtocol::Udp { addr: rest.parse()? }),
            "tcp" => Ok(DnsProtocol::Tcp { addr: rest.parse()? }),
            "tls" => {
                let addr: UpstreamAddr = rest.parse()?;
                let hostname = addr.host();
                Ok(DnsProtocol::Tls { addr, hostname })
            }
            "https" => {
                if rest.split('/').next().map_or(true, str::is_empty) {
                    return Err(format!("HTTPS URL '{}' has no host", s));
                }
                Ok(DnsProtocol::Https { url: s.into() })
            }
            "sdns" => Ok(DnsProtocol::DnsCrypt { stamp: s.into() }),
            other => Err(format!(
                "Unsupported scheme '{}' in '{}'. Expected udp, tcp, tls, https or sdns",
                other, s
            )),
        }
    }
}

fn parse_bare(s: &str) -> Result<DnsProtocol, String> {
    let addr = s
        .parse::<SocketAddr>()
        .or_else(|_| {
            s.parse::<IpAddr>()
                .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        })
        .map_err(|_| format!("Invalid DNS server '{}'", s))?;

    Ok(DnsProtocol::Udp {
        addr: UpstreamAddr::Resolved(addr),
    })
}

impl fmt::Display for DnsProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsProtocol::Udp { addr } => write!(f, "udp://{}", addr),
            DnsProtocol::Tcp { addr } => write!(f, "tcp://{}", addr),
            DnsProtocol::Tls { addr, hostname } => match hostname.parse::<IpAddr>() {
                Ok(ip) => write!(f, "tls://{}", SocketAddr::new(ip, addr.port())),
                Err(_) => write!(f, "tls://{}:{}", hostname, addr.port()),
            },
            DnsProtocol::Https { url } => write!(f, "{}", url),
            DnsProtocol::DnsCrypt { stamp } => write!(f, "{}", stamp),
        }
    }
}
