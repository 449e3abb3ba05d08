use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use viewtrail_core::enrichment::geo::{FallbackReason, GeoLocation, GeoResolver, LocationResult};
use viewtrail_core::sink::{EventSink, SinkError, SinkEvent};

/// Resolver that never leaves the process.
///
/// Loopback addresses resolve to a fixed location so the merge path is exercised end to end.
#[derive(Default)]
pub struct StubResolver {
    seen: Mutex<Vec<Option<String>>>,
}

impl StubResolver {
    pub fn location() -> GeoLocation {
        serde_json::from_value(json!({
            "country": "Canada",
            "countryCode": "CA",
            "region": "QC",
            "regionName": "Quebec",
            "city": "Montreal",
            "zip": "H1K",
            "lat": 45.6085,
            "lon": -73.5493,
            "timezone": "America/Toronto",
            "isp": "Le Groupe Videotron Ltee",
            "org": "Videotron Ltee",
            "as": "AS5769 Videotron Telecom Ltee",
            "countryEmoji": "🇨🇦",
        }))
        .expect("stub location is valid")
    }

    pub fn seen(&self) -> Vec<Option<String>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeoResolver for StubResolver {
    async fn resolve(&self, address: Option<&str>) -> LocationResult {
        self.seen.lock().unwrap().push(address.map(str::to_string));

        match address {
            Some("127.0.0.1") => LocationResult::Resolved(Self::location()),
            Some(_) => LocationResult::fallback(FallbackReason::Failure),
            None => LocationResult::fallback(FallbackReason::Local),
        }
    }
}

/// Sink that keeps every emitted event in memory.
#[derive(Default)]
pub struct CapturingSink {
    events: Mutex<Vec<(SinkEvent, Value)>>,
    reject_views: AtomicBool,
}

impl CapturingSink {
    pub fn rejecting_views() -> Self {
        let sink = Self::default();
        sink.reject_views.store(true, Ordering::SeqCst);
        sink
    }

    pub fn events(&self) -> Vec<(SinkEvent, Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for CapturingSink {
    fn emit(&self, event: SinkEvent, fields: &Value) -> Result<(), SinkError> {
        if event == SinkEvent::View && self.reject_views.load(Ordering::SeqCst) {
            return Err(SinkError::Rejected("views are rejected".to_string()));
        }

        self.events.lock().unwrap().push((event, fields.clone()));
        Ok(())
    }
}
