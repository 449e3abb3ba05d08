use crate::enrichment::user_agent::{
    BrowserInfo, DeviceInfo, DeviceType, OsInfo, ParsedUserAgent, UNKNOWN,
};
use woothee::parser::Parser;

pub struct WootheeEngine {
    parser: Parser,
}

impl Default for WootheeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WootheeEngine {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn parse(&self, ua: &str) -> ParsedUserAgent {
        let Some(result) = self.parser.parse(ua) else {
            return ParsedUserAgent::unknown();
        };

        let category = known(result.category);

        let device_type = match category.as_str() {
            "pc" => DeviceType::Desktop,
            "smartphone" | "mobilephone" => DeviceType::Mobile,
            "tablet" => DeviceType::Tablet,
            "crawler" => DeviceType::Bot,
            _ => DeviceType::Unknown,
        };

        ParsedUserAgent {
            browser: BrowserInfo {
                name: known(result.name),
                version: known(result.version),
                vendor: known(result.vendor),
            },
            os: OsInfo {
                name: known(result.os),
                version: known(result.os_version),
            },
            device: DeviceInfo {
                category,
                device_type,
            },
            is_bot: matches!(device_type, DeviceType::Bot),
        }
    }
}

/// Normalise engine output so unknown values are always the `unknown` marker.
fn known(value: impl AsRef<str>) -> String {
    let value = value.as_ref().trim();
    if value.is_empty() || value.eq_ignore_ascii_case(UNKNOWN) {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}
