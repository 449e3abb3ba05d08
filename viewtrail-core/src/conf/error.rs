use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is required")]
    Missing { name: &'static str },

    #[error("{name}: invalid value '{value}', expected {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("TRUSTED_PROXIES: invalid network '{value}': {source}")]
    InvalidNetwork {
        value: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    #[error("GEO_ENDPOINT: '{value}' does not contain the {{ip}} placeholder")]
    MissingPlaceholder { value: String },

    // Top-level
    #[error("invalid environment variables ({} issue(s))", .0.len())]
    Invalid(Vec<ConfigError>),
}

impl ConfigError {
    pub fn invalid_value(name: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidValue {
            name,
            value: value.into(),
            expected,
        }
    }

    /// Name of the environment variable the error refers to, if any.
    pub fn variable(&self) -> Option<&'static str> {
        match self {
            Self::Missing { name } | Self::InvalidValue { name, .. } => Some(*name),
            Self::InvalidNetwork { .. } => Some("TRUSTED_PROXIES"),
            Self::MissingPlaceholder { .. } => Some("GEO_ENDPOINT"),
            Self::Invalid(_) => None,
        }
    }

    /// Flattened list of individual issues.
    pub fn issues(&self) -> Vec<&ConfigError> {
        match self {
            Self::Invalid(errors) => errors.iter().flat_map(|e| e.issues()).collect(),
            other => vec![other],
        }
    }
}
