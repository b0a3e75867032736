//! Quiz Portal
//!
//! Single-binary Rust service that:
//! 1. Serves the login page with the Telegram login widget
//! 2. Accepts the provider's redirect on /auth/callback and stores the token
//!    in the browser's credential cookie
//! 3. Serves the dashboard only to browsers holding that cookie

mod config;
mod cookie;
mod error;
mod guard;
mod metrics;
mod routes;
mod views;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{MatchedPath, Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use portal_session::Route;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::limit::GlobalConcurrencyLimitLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::cookie::CookieSettings;
use crate::views::dashboard::DashboardData;
use crate::views::Views;
use crate::views::telegram::TelegramWidget;

/// Graceful shutdown deadline for in-flight requests
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared application state accessible from all handlers
#[derive(Clone)]
struct AppState {
    cookies: Arc<CookieSettings>,
    widget: Arc<TelegramWidget>,
    views: Arc<Views>,
    dashboard: Arc<DashboardData>,
    requests_total: Arc<AtomicU64>,
    started_at: Instant,
    prometheus: PrometheusHandle,
}

impl AppState {
    fn new(config: &Config, prometheus: PrometheusHandle) -> Result<Self, minijinja::Error> {
        Ok(Self {
            cookies: Arc::new(CookieSettings::from(&config.session)),
            widget: Arc::new(TelegramWidget::from(&config.telegram)),
            views: Arc::new(Views::new()?),
            dashboard: Arc::new(DashboardData::sample()),
            requests_total: Arc::new(AtomicU64::new(0)),
            started_at: Instant::now(),
            prometheus,
        })
    }
}

/// Build the axum router with all routes and shared state.
///
/// Pages come from the route table. Protected ones get the access guard as a
/// route layer, so the guard runs only after the path matched.
fn build_router(state: AppState, max_connections: usize) -> Router {
    let mut router = Router::new();
    for route in Route::ALL {
        let mut handler = routes::handler(route);
        if route.is_protected() {
            handler = handler.route_layer(middleware::from_fn_with_state(
                state.clone(),
                guard::require_session,
            ));
        }
        router = router.route(route.path(), handler);
    }

    router
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(concurrency_limit(max_connections))
        .with_state(state)
}

/// One semaphore for the whole server. `Router::layer` clones the layer into
/// every route, so a per-service limit would be per route.
fn concurrency_limit(max_connections: usize) -> GlobalConcurrencyLimitLayer {
    GlobalConcurrencyLimitLayer::new(max_connections)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("starting quiz-portal");

    // Install Prometheus metrics recorder before any metrics are emitted
    let prometheus_handle = metrics::install_recorder();

    // CLI: simple --config flag parsing
    let args: Vec<String> = std::env::args().collect();
    let cli_config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str());

    let config_path = Config::resolve_path(cli_config_path);
    info!(path = %config_path.display(), "loading configuration");

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    info!(
        listen_addr = %config.server.listen_addr,
        bot_name = %config.telegram.bot_name,
        auth_url = %config.telegram.auth_url,
        cookie = %config.session.cookie_name,
        "configuration loaded"
    );

    let app_state =
        AppState::new(&config, prometheus_handle).context("failed to compile page templates")?;
    let app = build_router(app_state, config.server.max_connections);

    let listen_addr = config.server.listen_addr;
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind to {listen_addr}"))?;
    info!(addr = %listen_addr, "accepting requests");

    // The drain timeout starts when the shutdown signal fires, not when the
    // server starts: signal the server to drain, then race it against the timer.
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    shutdown_signal().await;
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(DRAIN_TIMEOUT, server_handle).await {
        Ok(Ok(Ok(()))) => info!("all in-flight requests drained"),
        Ok(Ok(Err(e))) => error!(error = %e, "server error during shutdown"),
        Ok(Err(e)) => error!(error = %e, "server task panicked"),
        Err(_) => warn!(
            drain_timeout_secs = DRAIN_TIMEOUT.as_secs(),
            "drain timeout exceeded, forcing shutdown"
        ),
    }

    info!("shutdown complete");
    Ok(())
}

/// Count and time every request, labelled by the route pattern it matched.
async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let start = Instant::now();

    let response = next.run(request).await;

    state.requests_total.fetch_add(1, Ordering::Relaxed);
    metrics::record_request(
        &route,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}

/// Liveness plus a couple of counters.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "healthy",
        "uptime_seconds": state.started_at.elapsed().as_secs(),
        "requests_served": state.requests_total.load(Ordering::Relaxed),
    });

    (
        axum::http::StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
}

/// Prometheus metrics endpoint. Returns metrics in text exposition format.
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.prometheus.render(),
    )
}

/// Wait for SIGTERM or SIGINT for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
