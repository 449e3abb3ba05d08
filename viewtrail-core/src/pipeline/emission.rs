use crate::enrichment::geo::GeoResolver;
use crate::enrichment::user_agent::UserAgentParser;
use crate::pipeline::PipelineError;
use crate::sink::{EventSink, SinkEvent};
use crate::view::{EnrichedEvent, RequestEvent, UserAgent};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Turns captured request events into emitted view events.
///
/// Shared immutably behind an `Arc`; every dispatched event is processed by its own task.
pub struct EmissionPipeline {
    resolver: Arc<dyn GeoResolver>,
    ua_parser: UserAgentParser,
    sink: Arc<dyn EventSink>,
    parse_user_agent: bool,
}

impl EmissionPipeline {
    pub fn new(
        resolver: Arc<dyn GeoResolver>,
        sink: Arc<dyn EventSink>,
        parse_user_agent: bool,
    ) -> Self {
        Self {
            resolver,
            ua_parser: UserAgentParser::new(),
            sink,
            parse_user_agent,
        }
    }

    /// Process the event on a detached task. The caller never waits on it.
    pub fn dispatch(self: &Arc<Self>, event: RequestEvent) -> JoinHandle<()> {
        tokio::spawn(Arc::clone(self).process(event))
    }

    /// Enrich and emit one event. Emits exactly one of `view` or `failed logging`.
    pub async fn process(self: Arc<Self>, event: RequestEvent) {
        let raw = serde_json::to_value(&event)
            .unwrap_or_else(|_| Value::String(format!("{event:?}")));

        // Inner task so a panic during enrichment surfaces as a JoinError.
        let pipeline = Arc::clone(&self);
        let outcome = match tokio::spawn(async move { pipeline.enrich_and_emit(event).await }).await
        {
            Ok(result) => result,
            Err(join_error) => Err(PipelineError::Aborted(join_error.to_string())),
        };

        if let Err(err) = outcome {
            self.report_failure(raw, &err);
        }
    }

    async fn enrich_and_emit(&self, event: RequestEvent) -> Result<(), PipelineError> {
        let location = self.resolver.resolve(event.remote_address.as_deref()).await;

        let parsed = if self.parse_user_agent {
            let raw = event.user_agent.as_ref().and_then(UserAgent::raw).unwrap_or("");
            Some(self.ua_parser.parse(raw))
        } else {
            None
        };

        let enriched = EnrichedEvent::merge(event, location, parsed);
        let fields = serde_json::to_value(&enriched)?;
        self.sink.emit(SinkEvent::View, &fields)?;

        Ok(())
    }

    fn report_failure(&self, raw: Value, err: &PipelineError) {
        let fields = json!({
            "data": raw,
            "error": err.to_string(),
        });

        if let Err(sink_err) = self.sink.emit(SinkEvent::FailedLogging, &fields) {
            tracing::error!(
                error = %err,
                sink_error = %sink_err,
                fields = %fields,
                "failed to report logging failure"
            );
        }
    }
}
