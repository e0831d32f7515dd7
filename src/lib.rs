//! Destino Router
//!
//! An HTTP routing service built with Tokio and Axum. Requests identified by
//! a `(tipo, key)` pair are resolved to one of several registered destination
//! URLs ("destinos"), balanced with pure round robin.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                 DESTINO ROUTER                    │
//!                    │                                                   │
//!  Client Request    │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!  ──────────────────┼─▶│ security │──▶│   http   │──▶│   routing    │  │
//!                    │  │ limiter  │   │ handlers │   │ table + RR   │  │
//!                    │  │ + auth   │   └──────────┘   └──────┬───────┘  │
//!                    │  └──────────┘                         │          │
//!                    │                                       ▼          │
//!                    │                    ┌───────────┐ ┌──────────┐   │
//!  Client Response   │                    │resilience │ │  store   │◀──┼── MongoDB
//!  ◀─────────────────┼────────────────────│  breaker  │▶│ (routes) │   │
//!                    │                    └───────────┘ └──────────┘   │
//!                    │                                                   │
//!                    │  ┌─────────────────────────────────────────────┐ │
//!                    │  │            Cross-Cutting Concerns            │ │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌────────────┐  │ │
//!                    │  │  │ config │ │observability│ │ lifecycle  │  │ │
//!                    │  │  └────────┘ └─────────────┘ └────────────┘  │ │
//!                    │  └─────────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! Two background tasks run alongside the server: a periodic refresh that
//! mirrors the durable store into the in-memory routing table, and a sweep
//! that evicts idle rate-limiter visitors.

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;
pub mod store;

// Traffic protection
pub mod resilience;
pub mod security;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
