//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the Axum router with both API routes
//! - Wire up middleware (admission, auth, body limit, timeout, request ID,
//!   tracing, metrics)
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::handlers;
use crate::observability::metrics;
use crate::routing::RouteTable;
use crate::security::{auth, rate_limit, RateLimiter};

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub limiter: Arc<RateLimiter>,
    pub config: Arc<AppConfig>,
}

/// HTTP server for the routing API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Build the router and its middleware stack.
    pub fn new(state: AppState) -> Self {
        let config = Arc::clone(&state.config);

        // Layer order is inside-out: admission runs first on the wire, then
        // auth, then the per-request limits, then the handler.
        let router = Router::new()
            .route("/route/{tipo}/{key}", get(handlers::get_route))
            .route("/add-destino/{tipo}/{key}", post(handlers::add_destino))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state.clone())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_api_key,
            ))
            .layer(middleware::from_fn_with_state(
                state,
                rate_limit::admission_middleware,
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Self { router }
    }

    /// Serve until the shutdown signal fires, then drain gracefully.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
