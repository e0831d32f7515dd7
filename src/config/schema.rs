//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! Values are populated from the environment by `loader.rs`; every struct has
//! a `Default` so a bare environment still yields a runnable config.

/// Root configuration for the routing service.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// HTTP server settings (bind address, request timeout).
    pub server: ServerConfig,

    /// Length and size limits applied to request input.
    pub limits: LimitsConfig,

    /// Per-client admission limiter settings.
    pub rate_limit: RateLimitConfig,

    /// Circuit breaker guarding the route store.
    pub circuit_breaker: CircuitBreakerConfig,

    /// Durable route store connection parameters.
    pub store: StoreConfig,

    /// In-memory routing table refresh settings.
    pub cache: CacheConfig,

    /// API key authentication.
    pub auth: AuthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Input length and size limits.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Maximum length of the `key` path parameter.
    pub max_key_length: usize,

    /// Maximum length of the `tipo` path parameter.
    pub max_tipo_length: usize,

    /// Maximum length of a destination URL.
    pub max_destino_length: usize,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_key_length: 64,
            max_tipo_length: 32,
            max_destino_length: 256,
            max_body_size: 1024,
        }
    }
}

/// Admission limiter configuration (fixed window per client IP).
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests admitted per window per client.
    pub requests: u32,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests: 100,
            window_secs: 60,
        }
    }
}

/// Circuit breaker configuration.
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before the circuit opens.
    pub max_failures: u32,

    /// How long the circuit stays open, in seconds.
    pub open_secs: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            max_failures: 5,
            open_secs: 30,
        }
    }
}

/// Durable route store (MongoDB) configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Connection URI.
    pub uri: String,

    /// Database holding the route collection.
    pub database: String,

    /// Collection holding route records.
    pub collection: String,

    /// Maximum connections in the driver pool.
    pub max_pool_size: u32,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds.
    pub server_selection_timeout_secs: u64,

    /// Deadline applied to each individual store operation, in seconds.
    pub op_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "routingdb".to_string(),
            collection: "routes".to_string(),
            max_pool_size: 20,
            connect_timeout_secs: 5,
            server_selection_timeout_secs: 5,
            op_timeout_secs: 5,
        }
    }
}

/// Routing table refresh configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Interval between full refreshes from the store, in seconds.
    pub refresh_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { refresh_secs: 30 }
    }
}

/// API key authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret expected in the `X-API-Key` header.
    pub api_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Metrics exporter bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
