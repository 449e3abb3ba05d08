mod flag;
mod ip_api;
mod location;

#[cfg(test)]
mod tests;

pub use flag::flag_emoji;
pub use ip_api::IpApiResolver;
pub use location::*;

use async_trait::async_trait;
use ipnet::IpNet;
use once_cell::sync::Lazy;
use std::net::IpAddr;

/// Translates a client address into a coarse location.
///
/// Implementations never fail from the outside: every error degrades to a
/// fallback `LocationResult`.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    async fn resolve(&self, address: Option<&str>) -> LocationResult;
}

/// Ranges no public geolocation service can place.
static NON_ROUTABLE: Lazy<Vec<IpNet>> = Lazy::new(|| {
    [
        "0.0.0.0/8",
        "10.0.0.0/8",
        "100.64.0.0/10",
        "127.0.0.0/8",
        "169.254.0.0/16",
        "172.16.0.0/12",
        "192.168.0.0/16",
        "255.255.255.255/32",
        "::/128",
        "::1/128",
        "fc00::/7",
        "fe80::/10",
    ]
    .iter()
    .filter_map(|net| net.parse().ok())
    .collect()
});

/// The address worth sending to a lookup service, if any.
///
/// Absent, empty, non-IP and non-routable addresses yield `None`.
pub fn routable_address(address: Option<&str>) -> Option<IpAddr> {
    let ip = address?.trim().parse::<IpAddr>().ok()?.to_canonical();

    if NON_ROUTABLE.iter().any(|net| net.contains(&ip)) {
        return None;
    }

    Some(ip)
}
