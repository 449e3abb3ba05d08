use crate::sink::{EventSink, SinkError, SinkEvent};
use serde_json::Value;

/// Writes events as structured `tracing` records on the `viewtrail::views` target.
///
/// The event document goes out as one compact JSON string in the `fields` field.
/// Consumers of the JSON log line decode that string a second time.
#[derive(Debug, Clone)]
pub struct TracingSink {
    service: &'static str,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self { service: "views" }
    }
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for TracingSink {
    fn emit(&self, event: SinkEvent, fields: &Value) -> Result<(), SinkError> {
        let fields = encode_fields(fields)?;

        match event {
            SinkEvent::View => tracing::info!(
                target: "viewtrail::views",
                service = self.service,
                event = event.as_str(),
                fields = %fields,
            ),
            SinkEvent::FailedLogging => tracing::error!(
                target: "viewtrail::views",
                service = self.service,
                event = event.as_str(),
                fields = %fields,
            ),
        }

        Ok(())
    }
}

/// Single-line JSON rendering of an event document.
pub(crate) fn encode_fields(fields: &Value) -> Result<String, SinkError> {
    Ok(serde_json::to_string(fields)?)
}
