//! Binary entry point: load config, connect the store, warm the routing
//! table, spawn the background tasks, serve.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use destino_router::config::AppConfig;
use destino_router::http::{AppState, HttpServer};
use destino_router::lifecycle::Shutdown;
use destino_router::observability::{logging, metrics};
use destino_router::resilience::CircuitBreaker;
use destino_router::routing::RouteTable;
use destino_router::security::RateLimiter;
use destino_router::store::MongoRouteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!(
        bind_address = %config.server.bind_address,
        refresh_secs = config.cache.refresh_secs,
        rate_limit = config.rate_limit.requests,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(error) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                %error,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = Arc::new(MongoRouteStore::connect(&config.store).await?);
    let breaker = Arc::new(CircuitBreaker::new(
        config.circuit_breaker.max_failures,
        Duration::from_secs(config.circuit_breaker.open_secs),
    ));
    let routes = Arc::new(RouteTable::new(
        store,
        breaker,
        Duration::from_secs(config.store.op_timeout_secs),
    ));

    // Warm the table before accepting traffic. Best-effort: an unreachable
    // store logs a warning and the first resolves fall through to it.
    routes.refresh().await;

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit.requests,
        Duration::from_secs(config.rate_limit.window_secs),
    ));

    let shutdown = Shutdown::new();
    tokio::spawn(Arc::clone(&routes).run_refresh(
        Duration::from_secs(config.cache.refresh_secs),
        shutdown.subscribe(),
    ));
    tokio::spawn(Arc::clone(&limiter).run_sweep(shutdown.subscribe()));

    let listener = TcpListener::bind(&config.server.bind_address).await?;

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            signal_shutdown.trigger();
        }
    });

    let state = AppState {
        routes,
        limiter,
        config,
    };
    HttpServer::new(state).run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
