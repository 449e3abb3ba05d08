mod woothee_engine;


use crate::enrichment::user_agent::woothee_engine::WootheeEngine;
use serde::Serialize;

pub const UNKNOWN: &str = "unknown";
const MAX_USER_AGENT_LENGTH: usize = 2048;

/// Pure user-agent parser. Never fails.
#[derive(Default)]
pub struct UserAgentParser {
    engine: WootheeEngine,
}

impl UserAgentParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, ua: &str) -> ParsedUserAgent {
        let ua = ua.trim();
        if ua.is_empty() || ua.len() > MAX_USER_AGENT_LENGTH {
            return ParsedUserAgent::unknown();
        }

        self.engine.parse(ua)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParsedUserAgent {
    pub browser: BrowserInfo,
    pub os: OsInfo,
    pub device: DeviceInfo,
    pub is_bot: bool,
}

impl ParsedUserAgent {
    /// Breakdown used when nothing could be recognised.
    pub fn unknown() -> Self {
        Self {
            browser: BrowserInfo {
                name: UNKNOWN.to_string(),
                version: UNKNOWN.to_string(),
                vendor: UNKNOWN.to_string(),
            },
            os: OsInfo {
                name: UNKNOWN.to_string(),
                version: UNKNOWN.to_string(),
            },
            device: DeviceInfo {
                category: UNKNOWN.to_string(),
                device_type: DeviceType::Unknown,
            },
            is_bot: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserInfo {
    pub name: String,
    pub version: String,
    pub vendor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OsInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Raw engine category, e.g. `pc`, `smartphone`, `crawler`.
    pub category: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
    Bot,
    Unknown,
}
