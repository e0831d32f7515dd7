//! Configuration validation.
//!
//! Semantic checks that run after the environment has been parsed. Returns
//! all violations, not just the first, so one restart fixes everything.

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic violation in the loaded configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Validate the configuration, collecting every violation.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let positive_fields = [
        ("SERVER_REQUEST_TIMEOUT", config.server.request_timeout_secs as usize),
        ("MAX_KEY_LENGTH", config.limits.max_key_length),
        ("MAX_TIPO_LENGTH", config.limits.max_tipo_length),
        ("MAX_DESTINO_LENGTH", config.limits.max_destino_length),
        ("MAX_BODY_SIZE", config.limits.max_body_size),
        ("RATE_LIMIT_REQUESTS", config.rate_limit.requests as usize),
        ("RATE_LIMIT_WINDOW", config.rate_limit.window_secs as usize),
        ("CB_MAX_FAILURES", config.circuit_breaker.max_failures as usize),
        ("CB_OPEN_SECONDS", config.circuit_breaker.open_secs as usize),
        ("MONGO_MAX_POOL_SIZE", config.store.max_pool_size as usize),
        ("STORE_OP_TIMEOUT", config.store.op_timeout_secs as usize),
        ("ROUTES_REFRESH_SECONDS", config.cache.refresh_secs as usize),
    ];
    for (field, value) in positive_fields {
        if value == 0 {
            errors.push(ValidationError::NotPositive { field });
        }
    }

    let required_fields = [
        ("MONGO_URI", config.store.uri.as_str()),
        ("MONGO_DATABASE", config.store.database.as_str()),
        ("MONGO_COLLECTION", config.store.collection.as_str()),
        ("API_KEY", config.auth.api_key.as_str()),
    ];
    for (field, value) in required_fields {
        if value.is_empty() {
            errors.push(ValidationError::Empty { field });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
