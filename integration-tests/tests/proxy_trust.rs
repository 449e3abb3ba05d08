use integration_tests::harness::{StubResolver, TestOptions, TestServer};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use viewtrail_core::conf::ProxyTrust;

fn remote_address(server: &TestServer, xff: &str, forwarded_host: Option<&str>) -> (String, String) {
    let mut req = server.get("/").header("x-forwarded-for", xff);
    if let Some(host) = forwarded_host {
        req = req.header("x-forwarded-host", host);
    }
    let res = req.send().expect("request failed");
    let id = res.headers()["x-request-id"].to_str().unwrap().to_string();

    let (_, fields) = server.wait_for_event(&id);
    (
        fields["remote-address"].as_str().unwrap().to_string(),
        fields["hostname"].as_str().unwrap().to_string(),
    )
}

#[test]
fn forwarded_headers_are_ignored_without_trust() {
    let server = TestServer::start();

    let (remote, hostname) = remote_address(&server, "8.8.8.8", Some("spoofed.example"));

    assert_eq!(remote, "127.0.0.1");
    assert_eq!(hostname, "127.0.0.1");
}

#[test]
fn trust_all_uses_leftmost_forwarded_address() {
    let server = TestServer::start_with(TestOptions {
        proxy: ProxyTrust::trust_all(),
        ..TestOptions::default()
    });

    let (remote, hostname) =
        remote_address(&server, "203.0.113.7, 10.0.0.2", Some("views.example"));

    assert_eq!(remote, "203.0.113.7");
    assert_eq!(hostname, "views.example");
}

#[test]
fn trusted_networks_stop_at_first_untrusted_hop() {
    let server = TestServer::start_with(TestOptions {
        proxy: ProxyTrust {
            enabled: true,
            trusted_proxies: vec!["127.0.0.0/8".parse().unwrap(), "10.0.0.0/8".parse().unwrap()],
        },
        ..TestOptions::default()
    });

    let (remote, _) = remote_address(&server, "198.51.100.1, 203.0.113.7, 10.0.0.2", None);

    assert_eq!(remote, "203.0.113.7");
}

#[test]
fn forwarded_address_reaches_the_resolver() {
    let resolver = Arc::new(StubResolver::default());
    let server = TestServer::start_with(TestOptions {
        proxy: ProxyTrust::trust_all(),
        resolver: resolver.clone(),
        ..TestOptions::default()
    });

    let res = server
        .get("/")
        .header("x-forwarded-for", "203.0.113.7")
        .send()
        .expect("request failed");
    let id = res.headers()["x-request-id"].to_str().unwrap().to_string();

    // The stub resolver only places loopback, other addresses degrade to the failure emoji.
    let (_, fields) = server.wait_for_event(&id);
    assert_eq!(fields["location"], json!({ "countryEmoji": "🕳️" }));
    assert_eq!(resolver.seen(), vec![Some("203.0.113.7".to_string())]);
}

#[test]
fn trusted_hops_are_reported_as_proxy_chain() {
    let server = TestServer::start_with(TestOptions {
        proxy: ProxyTrust::trust_all(),
        ..TestOptions::default()
    });

    let res = server
        .get("/")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.2")
        .send()
        .expect("request failed");
    let id = res.headers()["x-request-id"].to_str().unwrap().to_string();

    let (_, fields) = server.wait_for_event(&id);
    assert_eq!(fields["peer-address"], json!("127.0.0.1"));
    assert_eq!(fields["proxy-chain"], json!(["10.0.0.2"]));
}
