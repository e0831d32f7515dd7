//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read & parse variables, fall back to defaults)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - Every field has a default so the service starts with no environment
//! - Validation separates syntactic (parse) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::AppConfig;
pub use schema::AuthConfig;
pub use schema::CacheConfig;
pub use schema::CircuitBreakerConfig;
pub use schema::LimitsConfig;
pub use schema::RateLimitConfig;
pub use schema::ServerConfig;
pub use schema::StoreConfig;
