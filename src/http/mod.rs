//! HTTP surface of the router.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → validation.rs (path and payload checks)
//!     → handlers.rs (resolve / add-destino)
//!     → JSON response
//! ```
//!
//! # Endpoints
//! - `GET  /route/{tipo}/{key}`        → `{"destino": "<url>"}`
//! - `POST /add-destino/{tipo}/{key}`  → `{"status": "added"}`

pub mod handlers;
pub mod server;
pub mod validation;

pub use server::{AppState, HttpServer};
