use crate::conf::GeoConfig;
use crate::enrichment::geo::{
    FallbackReason, GeoLocation, GeoResolver, LocationResult, flag_emoji, routable_address,
};
use async_trait::async_trait;
use serde_json::Value;
use std::net::IpAddr;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub(crate) enum GeoError {
    #[error("lookup request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("lookup service answered HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("lookup response is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("lookup response is malformed: {0}")]
    Malformed(&'static str),

    #[error("lookup response has unexpected fields: {0}")]
    Payload(#[source] serde_json::Error),
}

/// Resolver backed by an ip-api.com compatible JSON endpoint.
///
/// One GET per call. No retries, no caching.
pub struct IpApiResolver {
    client: reqwest::Client,
    config: GeoConfig,
}

impl IpApiResolver {
    pub fn new(config: &GeoConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config: config.clone(),
        })
    }

    async fn lookup(&self, ip: IpAddr) -> Result<LocationResult, GeoError> {
        let url = self.config.lookup_url(&ip);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(GeoError::Transport)?;

        if !response.status().is_success() {
            return Err(GeoError::Status(response.status()));
        }

        let payload: Value = response.json().await.map_err(GeoError::Decode)?;

        interpret_payload(payload)
    }
}

#[async_trait]
impl GeoResolver for IpApiResolver {
    async fn resolve(&self, address: Option<&str>) -> LocationResult {
        let Some(ip) = routable_address(address) else {
            debug!(address, "address is not publicly routable, skipping lookup");
            return LocationResult::fallback(FallbackReason::Local);
        };

        match self.lookup(ip).await {
            Ok(location) => location,
            Err(err) => {
                warn!(ip = %ip, error = %err, "geolocation lookup failed");
                LocationResult::fallback(FallbackReason::Failure)
            }
        }
    }
}

/// Map a lookup payload onto a `LocationResult`.
pub(crate) fn interpret_payload(payload: Value) -> Result<LocationResult, GeoError> {
    let Value::Object(mut fields) = payload else {
        return Err(GeoError::Malformed("expected a JSON object"));
    };

    match fields.get("status").and_then(Value::as_str) {
        Some("success") => {
            fields.remove("status");
            fields.remove("query");

            let mut location: GeoLocation =
                serde_json::from_value(Value::Object(fields)).map_err(GeoError::Payload)?;
            location.country_emoji = location.country_code.as_deref().and_then(flag_emoji);

            Ok(LocationResult::Resolved(location))
        }
        Some("fail") => Ok(LocationResult::fallback(FallbackReason::Local)),
        _ => Ok(LocationResult::fallback(FallbackReason::UnknownStatus)),
    }
}
