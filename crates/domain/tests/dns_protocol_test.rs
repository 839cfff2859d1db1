use ferrous_lookup_domain::{DnsProtocol, UpstreamAddr};
use std::net::SocketAddr;

fn parse(s: &str) -> DnsProtocol {
    s.parse()
        .unwrap_or_else(|e| panic!("{s:?} should parse: {e}"))
}

fn sock(s: &str) -> SocketAddr {
    s.parse().unwrap()
}

#[test]
fn test_accepted_descriptors() {
    let cases = [
        ("udp://8.8.8.8:53", "UDP", "udp://8.8.8.8:53"),
        ("tcp://[2606:4700:4700::1111]:53", "TCP", "tcp://[2606:4700:4700::1111]:53"),
        ("tls://dns.google:853", "TLS", "tls://dns.google:853"),
        ("tls://[2620:fe::fe]:853", "TLS", "tls://[2620:fe::fe]:853"),
        ("https://dns.google/dns-query", "HTTPS", "https://dns.google/dns-query"),
        ("sdns://AQcAAAAAAAAADjIwOC42Ny4yMjAuMjIw", "DNSCrypt", "sdns://AQcAAAAAAAAADjIwOC42Ny4yMjAuMjIw"),
        ("9.9.9.9:5353", "UDP", "udp://9.9.9.9:5353"),
        ("9.9.9.9", "UDP", "udp://9.9.9.9:53"),
        ("2620:fe::fe", "UDP", "udp://[2620:fe::fe]:53"),
    ];

    for (input, name, display) in cases {
        let protocol = parse(input);
        assert_eq!(protocol.protocol_name(), name, "{input}");
        assert_eq!(protocol.to_string(), display, "{input}");
        assert_eq!(parse(display), protocol, "{input} should survive display");
    }
}

#[test]
fn test_rejected_descriptors() {
    for input in [
        "",
        "not-a-server",
        "quic://1.1.1.1:853",
        "udp://",
        "sdns://",
        "udp://1.1.1.1",
        "tcp://dns.google:port",
        "tls://:853",
        "https:///dns-query",
    ] {
        assert!(input.parse::<DnsProtocol>().is_err(), "{input:?} should be rejected");
    }
}

#[test]
fn test_hostnames_stay_unresolved() {
    let udp = parse("udp://dns.google:53");
    assert_eq!(udp.socket_addr(), None);
    assert_eq!(udp.unresolved_host(), Some(("dns.google", 53)));

    let tls = parse("tls://dns.quad9.net:853");
    assert_eq!(tls.unresolved_host(), Some(("dns.quad9.net", 853)));

    assert_eq!(parse("udp://1.1.1.1:53").unresolved_host(), None);
    assert_eq!(parse("https://dns.google/dns-query").unresolved_host(), None);
    assert_eq!(parse("sdns://AQcAAAAAAAAA").unresolved_host(), None);
}

#[test]
fn test_tls_certificate_name() {
    let DnsProtocol::Tls { hostname, .. } = parse("tls://dns.google:853") else {
        panic!("expected TLS");
    };
    assert_eq!(&*hostname, "dns.google");

    let DnsProtocol::Tls { hostname, addr } = parse("tls://1.1.1.1:853") else {
        panic!("expected TLS");
    };
    assert_eq!(&*hostname, "1.1.1.1");
    assert_eq!(addr.socket_addr(), Some(sock("1.1.1.1:853")));
}

#[test]
fn test_with_resolved_addr_pins_address() {
    let tls = parse("tls://dns.google:853").with_resolved_addr(sock("8.8.8.8:853"));
    assert_eq!(tls.socket_addr(), Some(sock("8.8.8.8:853")));
    assert_eq!(tls.unresolved_host(), None);
    assert_eq!(tls.to_string(), "tls://dns.google:853");

    let udp = parse("udp://dns.google:53").with_resolved_addr(sock("8.8.4.4:53"));
    assert_eq!(udp, parse("udp://8.8.4.4:53"));

    let https = parse("https://dns.google/dns-query");
    assert_eq!(https.with_resolved_addr(sock("8.8.8.8:443")), https);
}

#[test]
fn test_upstream_addr_parsing() {
    assert_eq!(
        "127.0.0.1:53".parse::<UpstreamAddr>(),
        Ok(UpstreamAddr::Resolved(sock("127.0.0.1:53")))
    );

    let unresolved: UpstreamAddr = "resolver.lan:5353".parse().unwrap();
    assert_eq!(unresolved.port(), 5353);
    assert_eq!(unresolved.to_string(), "resolver.lan:5353");

    assert!("resolver.lan".parse::<UpstreamAddr>().is_err());
    assert!("::1:53".parse::<UpstreamAddr>().is_err());
}
