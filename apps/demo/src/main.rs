//! Moolya Trace Demo
//!
//! Small axum service with the tracing middleware installed on every route.
//!
//! Environment (a `.env` file is loaded when present):
//! - `MOOLYA_TRACE_BACKEND_URL` - collection endpoint (default http://localhost:3000/logs)
//! - `MOOLYA_TRACE_API_KEY` - optional API key
//! - `MOOLYA_DEMO_ADDR` - listen address (default 0.0.0.0:4000)
//! - `MOOLYA_DEMO_LOG_DIR` - directory for rolling log files (default ./logs)

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use moolya_trace_core::{config::ENV_BACKEND_URL, ConfigError, SeverityLevel, TracerConfig};
use moolya_trace_middleware::{trace_middleware, RequestTraceId, Tracer};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/logs";
const DEFAULT_ADDR: &str = "0.0.0.0:4000";
const LOG_PREFIX: &str = "moolya-trace-demo";

/// Initialize tracing with console and file logging
///
/// - Console: colored, compact
/// - File: daily rotation under `MOOLYA_DEMO_LOG_DIR`
fn init_tracing() -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let logs_dir = std::env::var("MOOLYA_DEMO_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
    }

    // Creates files like: moolya-trace-demo.2026-10-15.log
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(&logs_dir)
        .context("Failed to create log file appender")?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG takes precedence
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "info,moolya_trace_core=debug,moolya_trace_middleware=debug,moolya_trace_demo=debug",
        )
    });

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_line_number(false)
        .with_file(false)
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Tracer config from the environment, falling back to the local collector
fn load_config() -> anyhow::Result<TracerConfig> {
    match TracerConfig::from_env() {
        Ok(config) => Ok(config),
        Err(ConfigError::MissingBackendUrl) => {
            info!(
                "{} not set, shipping logs to {}",
                ENV_BACKEND_URL, DEFAULT_BACKEND_URL
            );
            Ok(TracerConfig::new(DEFAULT_BACKEND_URL))
        }
        Err(e) => Err(e.into()),
    }
}

async fn hello(status: StatusCode) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": "Hello, World!" })))
}

async fn create(
    State(tracer): State<Tracer>,
    RequestTraceId(trace_id): RequestTraceId,
    body: String,
) -> (StatusCode, Json<Value>) {
    tracer
        .shipper()
        .log_with_level(
            &trace_id,
            SeverityLevel::Debug,
            "received payload",
            &format!("{} bytes", body.len()),
        )
        .await;
    hello(StatusCode::OK).await
}

fn build_router(tracer: Tracer) -> Router {
    Router::new()
        .route(
            "/test",
            get(|| hello(StatusCode::OK))
                .post(create)
                .put(|| hello(StatusCode::UNAUTHORIZED))
                .delete(|| hello(StatusCode::OK))
                .patch(|| hello(StatusCode::BAD_REQUEST)),
        )
        .layer(middleware::from_fn_with_state(tracer.clone(), trace_middleware))
        .with_state(tracer)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (for development)
    dotenvy::dotenv().ok();

    // Keep the guard alive for the entire program - dropping it stops file logging
    let _log_guard = init_tracing()?;

    let config = load_config()?;
    let tracer = Tracer::new(config).context("Invalid tracer configuration")?;
    info!("Shipping request logs to {}", tracer.shipper().endpoint());

    let addr: SocketAddr = std::env::var("MOOLYA_DEMO_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("Invalid MOOLYA_DEMO_ADDR")?;

    let app = build_router(tracer);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Demo listening on http://{}", addr);
    info!("  GET|POST|PUT|DELETE|PATCH /test");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
