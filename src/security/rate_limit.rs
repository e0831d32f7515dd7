//! Fixed-window admission limiter keyed by client IP.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::broadcast;

use crate::http::server::AppState;
use crate::observability::metrics;

/// Per-identity window state.
#[derive(Debug)]
struct Visitor {
    last_seen: Instant,
    tokens: u32,
}

/// Fixed-window counter per client identity.
///
/// A fresh identity (or one whose window elapsed) gets a full burst; within
/// a window each admission spends one token. This deliberately permits a
/// burst right after a window boundary — it is a reset-on-expiry counter,
/// not a sliding or leaky-bucket scheme.
#[derive(Debug)]
pub struct RateLimiter {
    visitors: Mutex<HashMap<IpAddr, Visitor>>,
    rate: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(rate: u32, window: Duration) -> Self {
        Self {
            visitors: Mutex::new(HashMap::new()),
            rate,
            window,
        }
    }

    /// Admit or reject one request from `ip`.
    pub fn allow(&self, ip: IpAddr) -> bool {
        let mut visitors = self.visitors.lock().expect("visitor table mutex poisoned");
        let now = Instant::now();

        match visitors.get_mut(&ip) {
            Some(visitor) if now.duration_since(visitor.last_seen) <= self.window => {
                if visitor.tokens > 0 {
                    visitor.tokens -= 1;
                    visitor.last_seen = now;
                    true
                } else {
                    // Rejection does not refresh last_seen: the window is
                    // measured from the last admitted request.
                    false
                }
            }
            _ => {
                visitors.insert(
                    ip,
                    Visitor {
                        last_seen: now,
                        tokens: self.rate.saturating_sub(1),
                    },
                );
                true
            }
        }
    }

    /// Evict identities idle for more than one window.
    pub fn sweep(&self) {
        let mut visitors = self.visitors.lock().expect("visitor table mutex poisoned");
        let before = visitors.len();
        visitors.retain(|_, visitor| visitor.last_seen.elapsed() <= self.window);
        let evicted = before - visitors.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = visitors.len(), "Swept idle visitors");
        }
    }

    /// Background sweep task; runs once per window until shutdown.
    pub async fn run_sweep(self: Arc<Self>, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.window);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => self.sweep(),
                _ = shutdown.recv() => {
                    tracing::debug!("Visitor sweep task stopping");
                    break;
                }
            }
        }
    }
}

/// Middleware gating every request through the admission limiter.
pub async fn admission_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if state.limiter.allow(addr.ip()) {
        next.run(request).await
    } else {
        tracing::warn!(client = %addr.ip(), path = %request.uri().path(), "Rate limit exceeded");
        metrics::record_rate_limited();
        (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response()
    }
}
