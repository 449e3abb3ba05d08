use crate::conf::ProxyTrust;
use crate::ctx::{RequestId, RequestSummary};
use crate::net::{resolve_client_ip, resolve_hostname};
use http::{HeaderMap, Method, Uri, Version};
use pingora::prelude::Session;
use pingora::protocols::l4::socket::SocketAddr as PingoraSocketAddr;
use std::net::IpAddr;
use std::time::Instant;

/// Per-exchange context carried through the gateway hooks.
#[derive(Debug)]
pub struct ExchangeCtx {
    /// Lifecycle flag to determine if the context has already been hydrated from a session.
    pub hydrated: bool,

    pub started_at: Instant,

    pub request: RequestSummary,
}

impl Default for ExchangeCtx {
    fn default() -> Self {
        Self::empty()
    }
}

/// Hydration API
impl ExchangeCtx {
    pub fn empty() -> Self {
        Self {
            hydrated: false,
            started_at: Instant::now(),
            request: RequestSummary::default(),
        }
    }

    /// Create a boundary to decouple session from logic.
    pub fn hydrate_from_session(&mut self, session: &Session, trust: &ProxyTrust) {
        let request_header = session.req_header();
        let peer_ip = match session.client_addr() {
            Some(PingoraSocketAddr::Inet(addr)) => Some(addr.ip()),
            _ => None,
        };

        self.hydrate(
            &request_header.uri,
            &request_header.method,
            &request_header.headers,
            request_header.version,
            peer_ip,
            trust,
        );
    }

    pub(crate) fn hydrate(
        &mut self,
        uri: &Uri,
        method: &Method,
        headers: &HeaderMap,
        version: Version,
        peer_ip: Option<IpAddr>,
        trust: &ProxyTrust,
    ) {
        debug_assert!(!self.hydrated, "Already hydrated, cannot hydrate again");

        let (client_ip, proxy_chain) = match peer_ip {
            Some(peer) => {
                let (client, chain) = resolve_client_ip(headers, peer, trust);
                (Some(client), chain)
            }
            None => (None, Vec::new()),
        };

        let peer_trusted = peer_ip.is_some_and(|peer| trust.trusts(&peer));
        let hostname = resolve_hostname(
            headers,
            uri.authority().map(|a| a.as_str()),
            peer_trusted,
        );

        self.request = RequestSummary {
            request_id: Some(RequestId::from_headers(headers)),
            hostname,
            peer_ip,
            client_ip,
            proxy_chain,
            method: method.clone(),
            uri: uri.clone(),
            version,
            headers: headers.clone(),
            body: None,
        };

        self.hydrated = true;
    }
}

/// Request ID API
impl ExchangeCtx {
    pub fn request_id(&self) -> Option<&str> {
        self.request.request_id.as_ref().map(RequestId::as_str)
    }
}
