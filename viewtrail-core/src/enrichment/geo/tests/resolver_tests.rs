use super::payload_tests::success_payload;
use crate::conf::GeoConfig;
use crate::enrichment::geo::{FallbackReason, GeoResolver, IpApiResolver, routable_address};
use pretty_assertions::assert_eq;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver_for(server: &MockServer, timeout_ms: Option<u64>) -> IpApiResolver {
    let config = GeoConfig {
        endpoint: format!("{}/json/{{ip}}", server.uri()),
        timeout_ms,
    };
    IpApiResolver::new(&config).expect("failed to build resolver")
}

#[test]
fn routable_address_filters_local_ranges() {
    assert_eq!(routable_address(None), None);
    assert_eq!(routable_address(Some("")), None);
    assert_eq!(routable_address(Some("not-an-ip")), None);
    assert_eq!(routable_address(Some("127.0.0.1")), None);
    assert_eq!(routable_address(Some("10.1.2.3")), None);
    assert_eq!(routable_address(Some("192.168.1.20")), None);
    assert_eq!(routable_address(Some("::1")), None);
    assert_eq!(routable_address(Some("fd12:3456::1")), None);
    assert_eq!(routable_address(Some("::ffff:127.0.0.1")), None);
    assert_eq!(
        routable_address(Some("::ffff:8.8.8.8")),
        Some("8.8.8.8".parse().unwrap())
    );
    assert_eq!(
        routable_address(Some("2001:4860:4860::8888")),
        Some("2001:4860:4860::8888".parse().unwrap())
    );
}

#[tokio::test]
async fn success_payload_resolves_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/24.48.0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let location = resolver_for(&server, None).resolve(Some("24.48.0.1")).await;

    assert!(location.is_resolved());
    assert_eq!(location.country_emoji(), Some("🇨🇦"));
    let rendered = serde_json::to_value(&location).unwrap();
    assert_eq!(rendered.get("status"), None);
    assert_eq!(rendered.get("query"), None);
}

#[tokio::test]
async fn private_and_loopback_addresses_never_hit_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let resolver = resolver_for(&server, None);

    for address in [Some("127.0.0.1"), Some("192.168.0.10"), Some("::1"), None] {
        let location = resolver.resolve(address).await;
        assert_eq!(location.fallback_reason(), Some(FallbackReason::Local));
        assert_eq!(location.country_emoji(), Some("🏠"));
    }
}

#[tokio::test]
async fn fail_payload_is_local() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range",
            "query": "198.51.100.1"
        })))
        .mount(&server)
        .await;

    let location = resolver_for(&server, None).resolve(Some("198.51.100.1")).await;

    assert_eq!(location.country_emoji(), Some("🏠"));
}

#[tokio::test]
async fn server_error_degrades_to_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let location = resolver_for(&server, None).resolve(Some("8.8.8.8")).await;

    assert_eq!(location.fallback_reason(), Some(FallbackReason::Failure));
    assert_eq!(location.country_emoji(), Some("🕳️"));
}

#[tokio::test]
async fn malformed_body_degrades_to_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let location = resolver_for(&server, None).resolve(Some("8.8.8.8")).await;

    assert_eq!(location.fallback_reason(), Some(FallbackReason::Failure));
}

#[tokio::test]
async fn unreachable_service_degrades_to_failure() {
    let config = GeoConfig {
        // Port 9 (discard) is expected to refuse connections on loopback.
        endpoint: "http://127.0.0.1:9/json/{ip}".to_string(),
        timeout_ms: Some(2_000),
    };
    let resolver = IpApiResolver::new(&config).unwrap();

    let location = resolver.resolve(Some("8.8.8.8")).await;

    assert_eq!(location.fallback_reason(), Some(FallbackReason::Failure));
    assert_eq!(location.country_emoji(), Some("🕳️"));
}

#[tokio::test]
async fn configured_timeout_degrades_to_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_payload())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let location = resolver_for(&server, Some(50)).resolve(Some("8.8.8.8")).await;

    assert_eq!(location.fallback_reason(), Some(FallbackReason::Failure));
}
