use crate::conf::{Config, load_config};
use serde::Serialize;

pub fn dump(json: bool) -> anyhow::Result<()> {
    let validated = load_config()?;

    if json {
        dump_json(&validated.config)?;
    } else {
        for (name, value) in env_lines(&validated.config) {
            println!("{name}={value}");
        }
    }

    Ok(())
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// Resolved configuration in environment variable form.
pub fn env_lines(cfg: &Config) -> Vec<(&'static str, String)> {
    let networks = cfg
        .proxy
        .trusted_proxies
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    vec![
        ("APP_ENV", enum_name(&cfg.app_env)),
        ("PORT", cfg.port.to_string()),
        ("LISTEN_HOST", cfg.listen_host.to_string()),
        ("LOG_LEVEL", enum_name(&cfg.log_level)),
        ("TRUST_PROXY", cfg.proxy.enabled.to_string()),
        ("TRUSTED_PROXIES", networks),
        ("GEO_ENDPOINT", cfg.geo.endpoint.clone()),
        (
            "GEO_TIMEOUT_MS",
            cfg.geo.timeout_ms.map(|ms| ms.to_string()).unwrap_or_default(),
        ),
        ("PARSE_USER_AGENT", cfg.parse_user_agent.to_string()),
        (
            "SERVER_THREADS",
            cfg.server_threads.map(|t| t.to_string()).unwrap_or_default(),
        ),
    ]
}

fn enum_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}
