//! Configuration loading from the process environment.

use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppConfig {
    /// Build a configuration from the environment, falling back to defaults
    /// for unset or unparseable variables, then validate it.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let mut config = defaults.clone();

        config.server.bind_address =
            format!("0.0.0.0:{}", env_str("PORT", "8080"));
        config.server.request_timeout_secs =
            env_parse("SERVER_REQUEST_TIMEOUT", defaults.server.request_timeout_secs);

        config.limits.max_key_length =
            env_parse("MAX_KEY_LENGTH", defaults.limits.max_key_length);
        config.limits.max_tipo_length =
            env_parse("MAX_TIPO_LENGTH", defaults.limits.max_tipo_length);
        config.limits.max_destino_length =
            env_parse("MAX_DESTINO_LENGTH", defaults.limits.max_destino_length);
        config.limits.max_body_size =
            env_parse("MAX_BODY_SIZE", defaults.limits.max_body_size);

        config.rate_limit.requests =
            env_parse("RATE_LIMIT_REQUESTS", defaults.rate_limit.requests);
        config.rate_limit.window_secs =
            env_parse("RATE_LIMIT_WINDOW", defaults.rate_limit.window_secs);

        config.circuit_breaker.max_failures =
            env_parse("CB_MAX_FAILURES", defaults.circuit_breaker.max_failures);
        config.circuit_breaker.open_secs =
            env_parse("CB_OPEN_SECONDS", defaults.circuit_breaker.open_secs);

        config.store.uri = env_str("MONGO_URI", &defaults.store.uri);
        config.store.database = env_str("MONGO_DATABASE", &defaults.store.database);
        config.store.collection = env_str("MONGO_COLLECTION", &defaults.store.collection);
        config.store.max_pool_size =
            env_parse("MONGO_MAX_POOL_SIZE", defaults.store.max_pool_size);
        config.store.connect_timeout_secs =
            env_parse("MONGO_CONNECT_TIMEOUT", defaults.store.connect_timeout_secs);
        config.store.server_selection_timeout_secs = env_parse(
            "MONGO_SERVER_SELECTION_TIMEOUT",
            defaults.store.server_selection_timeout_secs,
        );
        config.store.op_timeout_secs =
            env_parse("STORE_OP_TIMEOUT", defaults.store.op_timeout_secs);

        config.cache.refresh_secs =
            env_parse("ROUTES_REFRESH_SECONDS", defaults.cache.refresh_secs);

        config.auth.api_key = env_str("API_KEY", &defaults.auth.api_key);

        config.observability.metrics_enabled =
            env_parse("METRICS_ENABLED", defaults.observability.metrics_enabled);
        config.observability.metrics_address =
            env_str("METRICS_ADDRESS", &defaults.observability.metrics_address);

        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(config)
    }
}

/// Read a string variable, treating unset and empty as absent.
fn env_str(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Read and parse a variable, falling back to `default` when unset or
/// malformed. A malformed value is logged rather than fatal so a typo in one
/// variable does not take the service down with an obscure parse error.
fn env_parse<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    variable = key,
                    value = %raw,
                    fallback = %default,
                    "Unparseable environment variable, using default"
                );
                default
            }
        },
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn default_limits_match_contract() {
        let config = AppConfig::default();
        assert_eq!(config.limits.max_key_length, 64);
        assert_eq!(config.limits.max_tipo_length, 32);
        assert_eq!(config.limits.max_destino_length, 256);
        assert_eq!(config.limits.max_body_size, 1024);
    }
}
