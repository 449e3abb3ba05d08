use integration_tests::harness::{TestOptions, TestServer};
use pretty_assertions::assert_eq;
use serde_json::json;
use viewtrail_core::sink::SinkEvent;

#[test]
fn rejected_view_becomes_failed_logging_event() {
    let server = TestServer::start_with(TestOptions {
        reject_views: true,
        ..TestOptions::default()
    });

    let res = server
        .get("/robots.txt")
        .header("x-request-id", "doomed-1")
        .send()
        .expect("request failed");

    // The client never sees logging failures.
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().unwrap(), "User-agent: *\nAllow: /");

    let (name, fields) = server.wait_for_event("doomed-1");
    assert_eq!(name, SinkEvent::FailedLogging);
    assert_eq!(fields["data"]["request-id"], json!("doomed-1"));
    assert_eq!(fields["data"]["url"], json!("/robots.txt"));
    assert_eq!(
        fields["error"],
        json!("sink rejected event: views are rejected")
    );
}
