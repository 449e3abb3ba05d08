use crate::conf::ProxyTrust;
use crate::ctx::ExchangeCtx;
use http::{HeaderMap, HeaderValue, Method, Uri, Version};
use pingora::prelude::Session;
use pretty_assertions::assert_eq;
use std::net::IpAddr;
use tokio::io::{AsyncWriteExt, duplex};

//-----------------------------------------------------------------------------
// Test helpers
//-----------------------------------------------------------------------------
fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.append(*name, HeaderValue::from_str(value).unwrap());
    }
    map
}

fn hydrate(
    uri: &str,
    headers: &HeaderMap,
    peer_ip: Option<&str>,
    trust: &ProxyTrust,
) -> ExchangeCtx {
    let mut ctx = ExchangeCtx::empty();
    let uri: Uri = uri.parse().unwrap();
    let peer_ip = peer_ip.map(|ip| ip.parse::<IpAddr>().unwrap());
    ctx.hydrate(&uri, &Method::GET, headers, Version::HTTP_11, peer_ip, trust);
    ctx
}

async fn make_session(request: &[u8]) -> Session {
    let (mut client_side, server_side) = duplex(64 * 1024);
    // Build a real Session backed by memory IO.
    let mut session = Session::new_h1(Box::new(server_side));
    // Send synthetic HTTP request.
    client_side.write_all(request).await.unwrap();
    // Let pingora parse request.
    assert!(session.read_request().await.unwrap());
    session
}

//-----------------------------------------------------------------------------
// Hydration
//-----------------------------------------------------------------------------
#[test]
fn hydrate_captures_request_fields() {
    let h = headers(&[("host", "example.com:3000"), ("user-agent", "curl/8.0")]);

    let ctx = hydrate("/search?q=rust", &h, Some("203.0.113.5"), &ProxyTrust::disabled());

    assert!(ctx.hydrated);
    assert_eq!(ctx.request.hostname, "example.com");
    assert_eq!(ctx.request.uri.to_string(), "/search?q=rust");
    assert_eq!(ctx.request.client_ip, Some("203.0.113.5".parse().unwrap()));
    assert_eq!(ctx.request.peer_ip, ctx.request.client_ip);
    assert_eq!(ctx.request.body, None);
    assert!(ctx.request_id().is_some_and(|id| !id.is_empty()));
}

#[test]
fn hydrate_reuses_inbound_request_id() {
    let h = headers(&[("host", "example.com"), ("x-request-id", "abc-123")]);

    let ctx = hydrate("/", &h, Some("203.0.113.5"), &ProxyTrust::disabled());

    assert_eq!(ctx.request_id(), Some("abc-123"));
}

#[test]
fn generated_request_ids_are_unique() {
    let h = headers(&[("host", "example.com")]);

    let a = hydrate("/", &h, Some("203.0.113.5"), &ProxyTrust::disabled());
    let b = hydrate("/", &h, Some("203.0.113.5"), &ProxyTrust::disabled());

    assert_ne!(a.request_id(), b.request_id());
}

#[test]
fn hydrate_honours_forwarded_headers_when_trusted() {
    let h = headers(&[
        ("host", "internal:8080"),
        ("x-forwarded-for", "198.51.100.23"),
        ("x-forwarded-host", "public.example"),
    ]);

    let ctx = hydrate("/", &h, Some("127.0.0.1"), &ProxyTrust::trust_all());

    assert_eq!(ctx.request.client_ip, Some("198.51.100.23".parse().unwrap()));
    assert_eq!(ctx.request.peer_ip, Some("127.0.0.1".parse().unwrap()));
    assert_eq!(ctx.request.hostname, "public.example");
}

#[test]
fn hydrate_without_peer_leaves_address_absent() {
    let h = headers(&[("host", "example.com"), ("x-forwarded-for", "198.51.100.23")]);

    let ctx = hydrate("/", &h, None, &ProxyTrust::trust_all());

    assert_eq!(ctx.request.client_ip, None);
    assert!(ctx.request.proxy_chain.is_empty());
}

#[tokio::test]
async fn hydrate_from_session_basic() {
    let request = b"POST /admin/login?next=%2F HTTP/1.1\r\n\
Host: example.com\r\n\
Content-Type: application/x-www-form-urlencoded\r\n\
Content-Length: 7\r\n\
\r\n\
user=me";
    let session = make_session(request).await;
    let mut ctx = ExchangeCtx::empty();

    ctx.hydrate_from_session(&session, &ProxyTrust::disabled());

    assert_eq!(ctx.request.method, Method::POST);
    assert_eq!(ctx.request.uri.to_string(), "/admin/login?next=%2F");
    assert_eq!(ctx.request.hostname, "example.com");
    assert_eq!(ctx.request.version, Version::HTTP_11);
    assert!(ctx.request.has_defined_body_semantics());
    assert_eq!(
        ctx.request.content_type(),
        Some("application/x-www-form-urlencoded")
    );
}
