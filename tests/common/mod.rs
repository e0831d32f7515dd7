//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use destino_router::config::AppConfig;
use destino_router::http::{AppState, HttpServer};
use destino_router::lifecycle::Shutdown;
use destino_router::resilience::CircuitBreaker;
use destino_router::routing::RouteTable;
use destino_router::security::RateLimiter;
use destino_router::store::{InMemoryRouteStore, RouteStore};

/// A running application instance bound to an ephemeral port.
pub struct TestApp {
    pub addr: SocketAddr,
    pub api_key: String,
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Boot the full app over an in-memory store.
#[allow(dead_code)]
pub async fn spawn_app(config: AppConfig) -> TestApp {
    spawn_app_with_store(config, Arc::new(InMemoryRouteStore::new())).await
}

/// Boot the full app over the given store.
pub async fn spawn_app_with_store(config: AppConfig, store: Arc<dyn RouteStore>) -> TestApp {
    let config = Arc::new(config);

    let breaker = Arc::new(CircuitBreaker::new(
        config.circuit_breaker.max_failures,
        Duration::from_secs(config.circuit_breaker.open_secs),
    ));
    let routes = Arc::new(RouteTable::new(
        store,
        breaker,
        Duration::from_secs(config.store.op_timeout_secs),
    ));
    routes.refresh().await;

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit.requests,
        Duration::from_secs(config.rate_limit.window_secs),
    ));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let api_key = config.auth.api_key.clone();
    let state = AppState {
        routes,
        limiter,
        config,
    };
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = HttpServer::new(state).run(listener, server_shutdown).await;
    });

    TestApp {
        addr,
        api_key,
        shutdown,
    }
}

/// A reqwest client that never reuses pooled connections, so each request
/// hits the fresh server.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
