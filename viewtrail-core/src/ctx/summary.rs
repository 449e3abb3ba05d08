use crate::ctx::RequestId;
use chrono::{DateTime, Utc};
use http::{HeaderMap, Method, StatusCode, Uri, Version};
use serde_json::Value;
use std::net::IpAddr;
use std::time::Duration;

/// Everything known about the request once the exchange has finished.
#[derive(Debug, Clone, Default)]
pub struct RequestSummary {
    pub request_id: Option<RequestId>,
    pub hostname: String,
    /// Remote IP of the TCP connection. `None` for non-inet sockets.
    pub peer_ip: Option<IpAddr>,
    /// Client IP after proxy trust has been applied.
    pub client_ip: Option<IpAddr>,
    /// Trusted proxies between the peer and the client, nearest first.
    pub proxy_chain: Vec<IpAddr>,
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub headers: HeaderMap,
    /// Set only when the body parsing stage ran and understood the payload.
    pub body: Option<Value>,
}

impl RequestSummary {
    /// Return true if the method is allowed to have a body.
    pub fn has_defined_body_semantics(&self) -> bool {
        self.method == Method::POST || self.method == Method::PATCH || self.method == Method::PUT
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone)]
pub struct ResponseSummary {
    /// Final status, `None` when no response header was ever written.
    pub status: Option<StatusCode>,
    pub elapsed: Duration,
    pub completed_at: DateTime<Utc>,
}

impl ResponseSummary {
    pub fn finished(status: Option<StatusCode>, elapsed: Duration) -> Self {
        Self {
            status,
            elapsed,
            completed_at: Utc::now(),
        }
    }
}
