use integration_tests::harness::{CapturedEvent, TestOptions, TestServer, init_test_tracing};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use viewtrail_core::sink::TracingSink;

#[test]
fn views_are_written_through_tracing() {
    let events: Arc<Mutex<Vec<CapturedEvent>>> = Arc::default();
    init_test_tracing(events.clone());

    let server = TestServer::start_with(TestOptions {
        sink: Some(Arc::new(TracingSink::new())),
        ..TestOptions::default()
    });

    let res = server
        .get("/robots.txt")
        .header("x-request-id", "traced-1")
        .send()
        .expect("request failed");
    assert_eq!(res.status(), 200);

    let deadline = Instant::now() + Duration::from_secs(3);
    let view = loop {
        let found = events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.target == "viewtrail::views" && e.field("event") == Some("view"))
            .cloned();
        if let Some(view) = found {
            break view;
        }
        assert!(Instant::now() < deadline, "no view event was traced");
        thread::sleep(Duration::from_millis(10));
    };

    assert_eq!(view.level, tracing::Level::INFO);
    assert_eq!(view.field("service"), Some("views"));

    let fields: Value = serde_json::from_str(view.field("fields").unwrap()).unwrap();
    assert_eq!(fields["request-id"], "traced-1");
    assert_eq!(fields["url"], "/robots.txt");
    assert_eq!(fields["location"]["countryCode"], "CA");
}
