use crate::ctx::{RequestSummary, ResponseSummary};
use crate::view::{HeaderField, RequestEvent, UserAgent};
use chrono::SecondsFormat;
use http::{HeaderMap, Version, header};
use std::collections::BTreeMap;

impl RequestEvent {
    /// Capture the fixed field set of a finished exchange. No I/O.
    pub fn extract(request: &RequestSummary, response: &ResponseSummary) -> Self {
        let url = request
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| request.uri.path().to_string());

        let referrer = header_str(&request.headers, header::REFERER.as_str())
            .or_else(|| header_str(&request.headers, "referrer"));

        let user_agent = header_str(&request.headers, header::USER_AGENT.as_str()).map(UserAgent::Raw);

        Self {
            request_id: request.request_id.as_ref().map(|id| id.as_str().to_string()),
            hostname: request.hostname.clone(),
            remote_address: request.client_ip.map(|ip| ip.to_string()),
            peer_address: request.peer_ip.map(|ip| ip.to_string()),
            proxy_chain: request.proxy_chain.iter().map(ToString::to_string).collect(),
            method: request.method.as_str().to_string(),
            url,
            http_version: http_version(request.version).to_string(),
            status_code: response.status.map(|s| s.as_u16().to_string()),
            referrer,
            headers: collect_headers(&request.headers),
            body: request.body.clone(),
            user_agent,
            response_time_ms: response.elapsed.as_micros() as f64 / 1000.0,
            date: response
                .completed_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, HeaderField> {
    let mut out: BTreeMap<String, HeaderField> = BTreeMap::new();

    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match out.get_mut(name.as_str()) {
            Some(field) => field.push(value),
            None => {
                out.insert(name.as_str().to_string(), HeaderField::One(value));
            }
        }
    }

    out
}
