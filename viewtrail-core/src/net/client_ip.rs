use crate::conf::ProxyTrust;
use http::HeaderMap;
use std::net::IpAddr;

const MAX_X_FORWARDED_FOR_LENGTH: usize = 1024;

/// Resolve the true client IP using X-Forwarded-For and the proxy trust settings.
///
/// Returns:
/// - client_ip: the resolved client IP
/// - proxy_chain: ordered list of proxy IPs (closest first)
///
/// Rules:
/// - Trust disabled, or the peer itself untrusted: the peer IP is used verbatim
/// - Walk XFF from right → left
/// - Stop at first IP not trusted
/// - If every hop is trusted, the farthest hop is the client
pub fn resolve_client_ip(
    headers: &HeaderMap,
    peer_ip: IpAddr,
    trust: &ProxyTrust,
) -> (IpAddr, Vec<IpAddr>) {
    if !trust.trusts(&peer_ip) {
        return (peer_ip, Vec::new());
    }

    let xff = match headers.get("x-forwarded-for").and_then(|h| h.to_str().ok()) {
        Some(v) => v,
        None => return (peer_ip, Vec::new()),
    };

    // Guard against overly long XFF headers to prevent potential abuse.
    if xff.len() > MAX_X_FORWARDED_FOR_LENGTH {
        return (peer_ip, Vec::new());
    }

    let ips: Vec<IpAddr> = xff
        .split(',')
        .map(|s| s.trim())
        .filter_map(|s| s.parse::<IpAddr>().ok())
        .collect();

    let mut proxy_chain = Vec::with_capacity(ips.len());

    for ip in ips.iter().rev() {
        if trust.trusts(ip) {
            proxy_chain.push(*ip);
            continue;
        }

        return (*ip, proxy_chain);
    }

    match proxy_chain.pop() {
        Some(farthest) => (farthest, proxy_chain),
        None => (peer_ip, proxy_chain),
    }
}

/// Host the client asked for, without the port.
///
/// `x-forwarded-host` is honoured only when the peer is a trusted proxy.
pub fn resolve_hostname(
    headers: &HeaderMap,
    authority: Option<&str>,
    peer_trusted: bool,
) -> String {
    let forwarded = peer_trusted
        .then(|| {
            headers
                .get("x-forwarded-host")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.split(',').next())
        })
        .flatten();

    let raw = forwarded
        .or_else(|| headers.get(http::header::HOST).and_then(|h| h.to_str().ok()))
        .or(authority)
        .unwrap_or_default()
        .trim();

    strip_port(raw).to_string()
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 literal, keep the brackets.
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.split_once(':') {
        Some((name, _)) => name,
        None => host,
    }
}
