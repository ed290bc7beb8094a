//! Ping-pong HTTP server used as a benchmark target.
//!
//! Every route answers fast and allocates little, so the numbers a run
//! produces against it say more about the client than the server. The
//! extra routes exist to provoke specific client behavior: `/status` for
//! non-200 handling, `/delay` for timeouts.
use axum::{debug_handler, extract::Path, http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

#[derive(Serialize)]
pub struct PingResponse {
    message: String,
    timestamp: DateTime<Utc>,
    success: bool,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct RootResponse {
    message: String,
    endpoints: HashMap<&'static str, &'static str>,
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
        .route("/health", get(health))
        .route("/status/:code", get(status))
        .route("/delay/ms/:delay_ms", get(delay))
}

pub async fn run(addr: SocketAddr) {
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    serve(listener).await;
}

/// Serve on an already-bound listener. Tests bind port 0 themselves and
/// read the port back before traffic starts.
pub async fn serve(listener: tokio::net::TcpListener) {
    axum::serve(listener, app()).await.unwrap();
}

/// Requests served since startup, across every route.
pub fn served() -> u64 {
    SERVED.load(Ordering::Relaxed)
}

static SERVED: AtomicU64 = AtomicU64::new(0);
static WINDOW: AtomicU64 = AtomicU64::new(0);

fn count() {
    SERVED.fetch_add(1, Ordering::Relaxed);
    WINDOW.fetch_add(1, Ordering::Relaxed);
}

fn pong() -> PingResponse {
    PingResponse {
        message: "pong".to_string(),
        timestamp: Utc::now(),
        success: true,
    }
}

#[debug_handler]
async fn root() -> Json<RootResponse> {
    count();
    Json(RootResponse {
        message: "ping server".to_string(),
        endpoints: HashMap::from([
            ("/ping", "pong with a timestamp"),
            ("/health", "health check"),
            ("/status/:code", "echo an arbitrary status code"),
            ("/delay/ms/:delay_ms", "pong after a pause"),
        ]),
    })
}

#[debug_handler]
async fn ping() -> Json<PingResponse> {
    count();
    Json(pong())
}

#[debug_handler]
async fn health() -> Json<HealthResponse> {
    count();
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}

#[debug_handler]
async fn status(Path(code): Path<u16>) -> StatusCode {
    count();
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

#[debug_handler]
async fn delay(Path(delay_ms): Path<u64>) -> Json<PingResponse> {
    count();
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    Json(pong())
}

/// Logs requests-per-second once a second. `fetch_min(0)` reads and
/// resets the window in one shot.
pub async fn throughput_log_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let requests = WINDOW.fetch_min(0, Ordering::Relaxed);
        info!("{requests} RPS");
    }
}
