mod tracing_sink;


pub use tracing_sink::TracingSink;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    View,
    FailedLogging,
}

impl SinkEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkEvent::View => "view",
            SinkEvent::FailedLogging => "failed logging",
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("sink rejected event: {0}")]
    Rejected(String),
}

/// Destination for emitted events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SinkEvent, fields: &Value) -> Result<(), SinkError>;
}
