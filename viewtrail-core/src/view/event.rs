use crate::enrichment::geo::LocationResult;
use crate::enrichment::user_agent::ParsedUserAgent;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One completed request/response cycle, as captured after the response was flushed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RequestEvent {
    pub request_id: Option<String>,
    pub hostname: String,
    pub remote_address: Option<String>,
    /// TCP peer of the connection, before proxy trust.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_address: Option<String>,
    /// Trusted `x-forwarded-for` hops, nearest first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub proxy_chain: Vec<String>,
    pub method: String,
    pub url: String,
    pub http_version: String,
    pub status_code: Option<String>,
    pub referrer: Option<String>,
    pub headers: BTreeMap<String, HeaderField>,
    pub body: Option<Value>,
    pub user_agent: Option<UserAgent>,
    pub response_time_ms: f64,
    pub date: String,
}

/// Header value. Repeated header names collapse into a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderField {
    One(String),
    Many(Vec<String>),
}

impl HeaderField {
    pub(crate) fn push(&mut self, value: String) {
        match self {
            HeaderField::One(first) => {
                let first = std::mem::take(first);
                *self = HeaderField::Many(vec![first, value]);
            }
            HeaderField::Many(values) => values.push(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserAgent {
    Raw(String),
    Parsed(ParsedUserAgent),
}

impl UserAgent {
    pub fn raw(&self) -> Option<&str> {
        match self {
            UserAgent::Raw(raw) => Some(raw),
            UserAgent::Parsed(_) => None,
        }
    }
}

/// A request event merged with its asynchronous enrichment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedEvent {
    #[serde(flatten)]
    pub request: RequestEvent,
    pub location: LocationResult,
}

impl EnrichedEvent {
    /// Merge enrichment into the event, replacing the raw user agent when a parse is given.
    pub fn merge(
        mut request: RequestEvent,
        location: LocationResult,
        user_agent: Option<ParsedUserAgent>,
    ) -> Self {
        if let Some(parsed) = user_agent {
            request.user_agent = Some(UserAgent::Parsed(parsed));
        }

        Self { request, location }
    }
}
