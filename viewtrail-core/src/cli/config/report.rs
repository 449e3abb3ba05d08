use crate::conf::ConfigError;
use owo_colors::OwoColorize;

pub const INVALID_ENV_HEADLINE: &str = "❌ Invalid environment variables:";

/// Print every configuration issue to stderr.
pub fn report_config_error(err: &ConfigError) {
    eprintln!("{}", INVALID_ENV_HEADLINE.red());
    for line in issue_lines(err) {
        eprintln!("{line}");
    }
}

pub fn issue_lines(err: &ConfigError) -> Vec<String> {
    err.issues()
        .into_iter()
        .map(|issue| format!("  - {issue}"))
        .collect()
}
