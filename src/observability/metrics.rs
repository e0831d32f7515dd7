//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by method, route, status
//! - `router_request_duration_seconds` (histogram): latency by route
//! - `router_rate_limited_total` (counter): admissions rejected
//! - `router_circuit_rejections_total` (counter): store calls refused while open
//! - `router_cache_refresh_total` (counter): refresh outcomes
//! - `router_cached_routes` (gauge): keys currently in the routing table

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    metrics::describe_counter!(
        "router_requests_total",
        "Requests handled, by method, route and status"
    );
    metrics::describe_histogram!(
        "router_request_duration_seconds",
        "Request latency by route"
    );
    metrics::describe_gauge!(
        "router_cached_routes",
        "Keys currently held in the routing table"
    );

    if let Err(error) = PrometheusBuilder::new().with_http_listener(addr).install() {
        tracing::error!(%error, "Failed to install Prometheus exporter");
    } else {
        tracing::info!(address = %addr, "Metrics exporter listening");
    }
}

/// Per-request recording middleware; applied after routing so the matched
/// route template is available as a low-cardinality label.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;

    metrics::counter!(
        "router_requests_total",
        "method" => method,
        "route" => route.clone(),
        "status" => response.status().as_u16().to_string(),
    )
    .increment(1);
    metrics::histogram!("router_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());

    response
}

/// Count a request rejected by the admission limiter.
pub fn record_rate_limited() {
    metrics::counter!("router_rate_limited_total").increment(1);
}

/// Count a store call refused because the circuit is open.
pub fn record_circuit_rejection() {
    metrics::counter!("router_circuit_rejections_total").increment(1);
}

/// Record a routing table refresh outcome and the resulting size.
pub fn record_refresh(succeeded: bool, cached_routes: usize) {
    let outcome = if succeeded { "ok" } else { "error" };
    metrics::counter!("router_cache_refresh_total", "outcome" => outcome).increment(1);
    metrics::gauge!("router_cached_routes").set(cached_routes as f64);
}
