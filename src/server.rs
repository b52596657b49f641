use crate::{
    metrics::{UP, encode_metrics},
    probe::{ConnectivityCheck, ConnectivityReport},
    status,
};
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use std::{net::IpAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

/// Path of the database connectivity probe
pub const PROBE_PATH: &str = "/api/database/test";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    probe: Arc<dyn ConnectivityCheck>,
}

impl AppState {
    #[must_use]
    pub fn new(probe: Arc<dyn ConnectivityCheck>) -> Self {
        Self { probe }
    }
}

/// Build the application router
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status::home))
        .route("/health", get(status::health))
        .route("/api/status", get(status::api_status))
        .route(PROBE_PATH, get(probe_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Serve the API until SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if the service fails to bind to the port or the server stops abnormally
pub async fn start(state: AppState, listen: Option<IpAddr>, port: u16) -> anyhow::Result<()> {
    let app = router(state);

    // Bind to socket with smart fallback
    let (listener, bind_addr) = match listen {
        Some(addr) => {
            let socket_addr = format!("{addr}:{port}");
            let listener = TcpListener::bind(&socket_addr).await?;
            (listener, socket_addr)
        }
        None => {
            // Auto mode: try IPv6 first, fallback to IPv4
            if let Ok(l) = TcpListener::bind(format!("::0:{port}")).await {
                (l, format!("[::]:{port}"))
            } else {
                let socket_addr = format!("0.0.0.0:{port}");
                (TcpListener::bind(&socket_addr).await?, socket_addr)
            }
        }
    };

    info!(address = %bind_addr, "listening");
    UP.set(1);

    let result = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    UP.set(0);
    result?;

    info!("server stopped");

    Ok(())
}

async fn probe_handler(State(state): State<AppState>) -> Json<ConnectivityReport> {
    Json(state.probe.check().await)
}

async fn metrics_handler() -> impl IntoResponse {
    match encode_metrics() {
        Ok(buffer) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            buffer,
        ),
        Err(e) => {
            error!("{e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
                Vec::new(),
            )
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
