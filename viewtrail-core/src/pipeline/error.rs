use crate::sink::SinkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to serialize enriched event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("enrichment task aborted: {0}")]
    Aborted(String),
}
