use crate::conf::error::ConfigError;
use crate::conf::types::{AppEnv, Config, IP_PLACEHOLDER, LogLevel, ValidatedConfig};
use ipnet::IpNet;
use std::net::IpAddr;

/// Load configuration from the process environment.
///
/// Call this once at process entry. `.env` loading, if wanted, must already have happened.
pub fn load_config() -> Result<ValidatedConfig, ConfigError> {
    load_config_from(|name| std::env::var(name).ok())
}

/// Load configuration from an arbitrary variable lookup.
///
/// Every variable is checked and all issues are reported together. When
/// `SKIP_ENV_VALIDATION` is set, invalid values silently fall back to defaults.
/// When `APP_ENV` is `test`, issues are returned as warnings instead of an error.
pub fn load_config_from<F>(lookup: F) -> Result<ValidatedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let skip_validation = var("SKIP_ENV_VALIDATION").is_some();
    let test_mode = var("APP_ENV").as_deref() == Some("test");

    let mut config = Config::default();
    let mut errors = Vec::new();

    // APP_ENV
    match var("APP_ENV") {
        None => errors.push(ConfigError::Missing { name: "APP_ENV" }),
        Some(value) => match value.parse::<AppEnv>() {
            Ok(env) => config.app_env = env,
            Err(_) => errors.push(ConfigError::invalid_value(
                "APP_ENV",
                value,
                "one of development, test, production",
            )),
        },
    }

    // PORT
    match var("PORT") {
        None => errors.push(ConfigError::Missing { name: "PORT" }),
        Some(value) => match value.parse::<u16>() {
            Ok(port) => config.port = port,
            Err(_) => errors.push(ConfigError::invalid_value("PORT", value, "a TCP port number")),
        },
    }

    if let Some(value) = var("LISTEN_HOST") {
        match value.parse::<IpAddr>() {
            Ok(host) => config.listen_host = host,
            Err(_) => errors.push(ConfigError::invalid_value(
                "LISTEN_HOST",
                value,
                "an IP address",
            )),
        }
    }

    if let Some(value) = var("LOG_LEVEL") {
        match value.parse::<LogLevel>() {
            Ok(level) => config.log_level = level,
            Err(_) => errors.push(ConfigError::invalid_value(
                "LOG_LEVEL",
                value,
                "one of info, timer, debug, warn, error",
            )),
        }
    }

    // Proxy trust
    if let Some(value) = var("TRUST_PROXY") {
        match parse_bool(&value) {
            Some(enabled) => config.proxy.enabled = enabled,
            None => errors.push(ConfigError::invalid_value("TRUST_PROXY", value, "a boolean")),
        }
    }

    if let Some(value) = var("TRUSTED_PROXIES") {
        match parse_networks(&value) {
            Ok(networks) => config.proxy.trusted_proxies = networks,
            Err(err) => errors.push(err),
        }
    }

    // Geolocation
    if let Some(value) = var("GEO_ENDPOINT") {
        if value.contains(IP_PLACEHOLDER) {
            config.geo.endpoint = value;
        } else {
            errors.push(ConfigError::MissingPlaceholder { value });
        }
    }

    if let Some(value) = var("GEO_TIMEOUT_MS") {
        match value.parse::<u64>() {
            Ok(ms) if ms > 0 => config.geo.timeout_ms = Some(ms),
            _ => errors.push(ConfigError::invalid_value(
                "GEO_TIMEOUT_MS",
                value,
                "a positive number of milliseconds",
            )),
        }
    }

    if let Some(value) = var("PARSE_USER_AGENT") {
        match parse_bool(&value) {
            Some(enabled) => config.parse_user_agent = enabled,
            None => errors.push(ConfigError::invalid_value(
                "PARSE_USER_AGENT",
                value,
                "a boolean",
            )),
        }
    }

    if let Some(value) = var("SERVER_THREADS") {
        match value.parse::<usize>() {
            Ok(threads) if threads > 0 => config.server_threads = Some(threads),
            _ => errors.push(ConfigError::invalid_value(
                "SERVER_THREADS",
                value,
                "a positive integer",
            )),
        }
    }

    if errors.is_empty() || skip_validation {
        return Ok(ValidatedConfig {
            config,
            warnings: Vec::new(),
        });
    }

    if test_mode {
        return Ok(ValidatedConfig {
            config,
            warnings: errors,
        });
    }

    Err(ConfigError::Invalid(errors))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_networks(value: &str) -> Result<Vec<IpNet>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            // Bare addresses are accepted as single-host networks.
            s.parse::<IpNet>()
                .or_else(|err| s.parse::<IpAddr>().map(IpNet::from).map_err(|_| err))
                .map_err(|source| ConfigError::InvalidNetwork {
                    value: s.to_string(),
                    source,
                })
        })
        .collect()
}
