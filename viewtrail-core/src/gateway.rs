use crate::conf::ProxyTrust;
use crate::ctx::{ExchangeCtx, MAX_BODY_BYTES, ResponseSummary, parse_body};
use crate::interceptor::ExchangeInterceptor;
use crate::respond::{RouteTable, StaticResponse, apply_response_headers};
use async_trait::async_trait;
use http::{Method, StatusCode, header};
use pingora::prelude::*;
use pingora_http::ResponseHeader;
use std::sync::Arc;

/// Terminal gateway: every request is answered from the route table, nothing is proxied.
///
/// Interceptors run from the `logging` hook, after the response has been flushed.
pub struct ViewGateway {
    routes: RouteTable,
    interceptors: Vec<Arc<dyn ExchangeInterceptor>>,
    proxy_trust: ProxyTrust,
}

impl ViewGateway {
    pub fn new(routes: RouteTable, proxy_trust: ProxyTrust) -> Self {
        Self {
            routes,
            interceptors: Vec::new(),
            proxy_trust,
        }
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn ExchangeInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    async fn send_response(
        &self,
        session: &mut Session,
        ctx: &ExchangeCtx,
        response: StaticResponse,
    ) -> Result<()> {
        let mut resp = ResponseHeader::build(response.status, None)?;
        resp.insert_header(header::CONTENT_TYPE, response.content_type)?;
        resp.insert_header(header::CONTENT_LENGTH, response.body.len().to_string())?;
        apply_response_headers(&mut resp, ctx.request_id())?;

        let head_only = ctx.request.method == Method::HEAD;
        session.write_response_header(Box::new(resp), head_only).await?;
        if !head_only {
            session.write_response_body(Some(response.body), true).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl ProxyHttp for ViewGateway {
    type CTX = ExchangeCtx;

    fn new_ctx(&self) -> Self::CTX {
        ExchangeCtx::empty()
    }

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> Result<Box<HttpPeer>> {
        // Unreachable, request_filter always responds.
        Err(Error::new(Custom(
            "ViewGateway attempted to proxy upstream (bug)",
        )))
    }

    /// HYDRATE → READ BODY → ROUTE → RESPOND
    async fn request_filter(&self, session: &mut Session, ctx: &mut Self::CTX) -> Result<bool> {
        ctx.hydrate_from_session(session, &self.proxy_trust);

        if ctx.request.has_defined_body_semantics()
            && let Some(body) = read_body(session).await?
        {
            ctx.request.body = parse_body(ctx.request.content_type(), &body);
        }

        let response = match self
            .routes
            .match_route(&ctx.request.method, ctx.request.uri.path())
        {
            Some(handler) => handler(&ctx.request),
            None => StaticResponse::text("Not Found").with_status(StatusCode::NOT_FOUND),
        };

        self.send_response(session, ctx, response).await?;
        Ok(true)
    }

    async fn logging(&self, session: &mut Session, e: Option<&Error>, ctx: &mut Self::CTX)
    where
        Self::CTX: Send + Sync,
    {
        // Errors before request_filter leave the context empty.
        if !ctx.hydrated {
            ctx.hydrate_from_session(session, &self.proxy_trust);
        }

        if let Some(err) = e {
            tracing::debug!(error = %err, request_id = ctx.request_id(), "exchange ended with error");
        }

        let status = session.response_written().map(|resp| resp.status);
        let response = ResponseSummary::finished(status, ctx.started_at.elapsed());

        for interceptor in &self.interceptors {
            interceptor.on_exchange_complete(&ctx.request, &response);
        }
    }
}

/// Read the whole request body. Bodies over `MAX_BODY_BYTES` are drained and dropped.
async fn read_body(session: &mut Session) -> Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    let mut oversized = false;

    while let Some(chunk) = session.read_request_body().await? {
        if oversized {
            continue;
        }
        if buf.len() + chunk.len() > MAX_BODY_BYTES {
            oversized = true;
            buf = Vec::new();
            continue;
        }
        buf.extend_from_slice(&chunk);
    }

    if oversized {
        tracing::debug!(limit = MAX_BODY_BYTES, "request body too large, not parsed");
        return Ok(None);
    }

    Ok(Some(buf))
}
