//! API key authentication middleware.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

/// Reject any request whose `X-API-Key` header does not match the
/// configured secret.
pub async fn require_api_key(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get("X-API-Key")
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if !key.is_empty() && key == state.config.auth.api_key => {
            next.run(request).await
        }
        _ => {
            tracing::warn!(client = %addr.ip(), "Rejected request with missing or invalid API key");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
