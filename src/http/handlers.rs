//! Request handlers for the routing API.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::http::validation;
use crate::routing::{RouteError, RouteKey};

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub destino: String,
}

#[derive(Debug, Deserialize)]
struct AddDestinoRequest {
    destino: String,
}

#[derive(Debug, Serialize)]
pub struct AddDestinoResponse {
    pub status: &'static str,
}

/// `GET /route/{tipo}/{key}` — resolve the next destination in rotation.
pub async fn get_route(
    State(state): State<AppState>,
    Path((tipo, key)): Path<(String, String)>,
) -> Response {
    let limits = &state.config.limits;
    if !validation::is_valid_param(&tipo, limits.max_tipo_length) {
        return (StatusCode::BAD_REQUEST, "Invalid 'tipo' parameter").into_response();
    }
    if !validation::is_valid_param(&key, limits.max_key_length) {
        return (StatusCode::BAD_REQUEST, "Invalid 'key' parameter").into_response();
    }

    let route_key = RouteKey::new(key, tipo);
    match state.routes.resolve(&route_key).await {
        Ok(Some(destino)) => {
            tracing::debug!(key = %route_key.key, tipo = %route_key.tipo, %destino, "Resolved route");
            (StatusCode::OK, Json(RouteResponse { destino })).into_response()
        }
        Ok(None) => {
            tracing::debug!(key = %route_key.key, tipo = %route_key.tipo, "No route found");
            (StatusCode::NOT_FOUND, "No route found").into_response()
        }
        Err(RouteError::CircuitOpen) => {
            (StatusCode::SERVICE_UNAVAILABLE, "Route store temporarily unavailable")
                .into_response()
        }
        Err(error) => {
            tracing::error!(key = %route_key.key, tipo = %route_key.tipo, %error, "Route lookup failed");
            (StatusCode::NOT_FOUND, "No route found").into_response()
        }
    }
}

/// `POST /add-destino/{tipo}/{key}` — register a destination for a route.
pub async fn add_destino(
    State(state): State<AppState>,
    Path((tipo, key)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    let limits = &state.config.limits;
    if !validation::is_valid_param(&tipo, limits.max_tipo_length)
        || !validation::is_valid_param(&key, limits.max_key_length)
    {
        return (StatusCode::BAD_REQUEST, "Invalid path parameters").into_response();
    }

    if body.is_empty() {
        return (StatusCode::BAD_REQUEST, "Empty body").into_response();
    }
    let request: AddDestinoRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(_) => return (StatusCode::BAD_REQUEST, "Invalid payload").into_response(),
    };

    if !validation::is_valid_destino(&request.destino, limits.max_destino_length) {
        return (StatusCode::BAD_REQUEST, "Invalid 'destino'").into_response();
    }

    let route_key = RouteKey::new(key, tipo);
    match state.routes.add_destino(&route_key, &request.destino).await {
        Ok(()) => {
            tracing::info!(
                key = %route_key.key,
                tipo = %route_key.tipo,
                destino = %request.destino,
                "Destino added"
            );
            (StatusCode::OK, Json(AddDestinoResponse { status: "added" })).into_response()
        }
        Err(RouteError::CircuitOpen) => {
            (StatusCode::SERVICE_UNAVAILABLE, "Route store temporarily unavailable")
                .into_response()
        }
        Err(error) => {
            tracing::error!(key = %route_key.key, tipo = %route_key.tipo, %error, "Could not save destino");
            (StatusCode::INTERNAL_SERVER_ERROR, "Could not save destino").into_response()
        }
    }
}
