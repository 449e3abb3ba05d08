use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a geolocation lookup.
///
/// Either a full location or a fallback emoji, never a mix of both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LocationResult {
    Resolved(GeoLocation),
    Fallback(FallbackLocation),
}

impl LocationResult {
    pub fn fallback(reason: FallbackReason) -> Self {
        LocationResult::Fallback(FallbackLocation {
            reason,
            country_emoji: reason.emoji(),
        })
    }

    pub fn country_emoji(&self) -> Option<&str> {
        match self {
            LocationResult::Resolved(geo) => geo.country_emoji.as_deref(),
            LocationResult::Fallback(fallback) => Some(fallback.country_emoji),
        }
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            LocationResult::Resolved(_) => None,
            LocationResult::Fallback(fallback) => Some(fallback.reason),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, LocationResult::Resolved(_))
    }
}

/// Location fields as returned by the lookup service, minus `status` and `query`.
///
/// Every named field is optional; the service may trim its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub as_name: Option<String>,

    /// Any further fields the service returned, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// `None` when the country code is absent or has no flag.
    #[serde(default)]
    pub country_emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackLocation {
    #[serde(skip)]
    pub reason: FallbackReason,
    #[serde(rename = "countryEmoji")]
    pub country_emoji: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Private, loopback or otherwise unresolvable address.
    Local,
    /// Transport error, non-2xx status or malformed body.
    Failure,
    /// The service answered with a status it does not document.
    UnknownStatus,
}

impl FallbackReason {
    pub fn emoji(self) -> &'static str {
        match self {
            FallbackReason::Local => "🏠",
            FallbackReason::Failure | FallbackReason::UnknownStatus => "🕳️",
        }
    }
}
