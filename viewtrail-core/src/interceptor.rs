use crate::ctx::{RequestSummary, ResponseSummary};
use crate::pipeline::EmissionPipeline;
use crate::view::RequestEvent;
use std::sync::Arc;

/// Hook run once per exchange, after the response has been flushed to the client.
///
/// Implementations must not block. Long work belongs on a spawned task.
pub trait ExchangeInterceptor: Send + Sync {
    fn on_exchange_complete(&self, request: &RequestSummary, response: &ResponseSummary);
}

/// Captures a view event and hands it to the emission pipeline.
pub struct ViewInterceptor {
    pipeline: Arc<EmissionPipeline>,
}

impl ViewInterceptor {
    pub fn new(pipeline: Arc<EmissionPipeline>) -> Self {
        Self { pipeline }
    }
}

impl ExchangeInterceptor for ViewInterceptor {
    fn on_exchange_complete(&self, request: &RequestSummary, response: &ResponseSummary) {
        let event = RequestEvent::extract(request, response);
        // Detached. The handle is dropped on purpose.
        let _ = self.pipeline.dispatch(event);
    }
}
