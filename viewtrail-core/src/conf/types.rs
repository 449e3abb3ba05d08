use ipnet::IpNet;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GEO_ENDPOINT: &str = "http://ip-api.com/json/{ip}";
pub const IP_PLACEHOLDER: &str = "{ip}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Development,
    Test,
    Production,
}

impl FromStr for AppEnv {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(AppEnv::Development),
            "test" => Ok(AppEnv::Test),
            "production" => Ok(AppEnv::Production),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Timer,
    Debug,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive handed to the tracing env filter.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Timer => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(LogLevel::Info),
            "timer" => Ok(LogLevel::Timer),
            "debug" => Ok(LogLevel::Debug),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(()),
        }
    }
}

/// Reverse-proxy trust settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProxyTrust {
    pub enabled: bool,
    /// Empty means every hop is trusted.
    pub trusted_proxies: Vec<IpNet>,
}

impl ProxyTrust {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn trust_all() -> Self {
        Self {
            enabled: true,
            trusted_proxies: Vec::new(),
        }
    }

    pub fn trusts(&self, ip: &IpAddr) -> bool {
        self.enabled
            && (self.trusted_proxies.is_empty()
                || self.trusted_proxies.iter().any(|net| net.contains(ip)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoConfig {
    /// Lookup URL template, `{ip}` is replaced with the client address.
    pub endpoint: String,
    pub timeout_ms: Option<u64>,
}

impl GeoConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn lookup_url(&self, ip: &IpAddr) -> String {
        self.endpoint.replace(IP_PLACEHOLDER, &ip.to_string())
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub app_env: AppEnv,
    pub listen_host: IpAddr,
    pub port: u16,
    pub log_level: LogLevel,
    pub proxy: ProxyTrust,
    pub geo: GeoConfig,
    pub parse_user_agent: bool,
    pub server_threads: Option<usize>,
}

impl Config {
    pub fn listen_addr(&self) -> String {
        SocketAddr::new(self.listen_host, self.port).to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_env: AppEnv::Development,
            listen_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            proxy: ProxyTrust::disabled(),
            geo: GeoConfig::default(),
            parse_user_agent: true,
            server_threads: None,
        }
    }
}

/// Result of loading the environment.
///
/// `warnings` holds the issues that were tolerated because the process runs in test mode.
#[derive(Debug)]
pub struct ValidatedConfig {
    pub config: Config,
    pub warnings: Vec<super::ConfigError>,
}

impl ValidatedConfig {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!(
                variable = warning.variable(),
                "invalid environment variable tolerated in test mode: {warning}"
            );
        }
    }
}
