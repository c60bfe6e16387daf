//! HTTP server hosting the JSON-RPC endpoint.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use crate::rpc::{handle_body, AppState};

/// Build the router: `POST /` JSON-RPC, `GET /health`, `GET /metrics`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_json_rpc))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` flips to `true`.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Serving avail-da JSON-RPC on {}", addr);
    }

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow_and_update() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            info!("RPC server shutting down");
        })
        .await
}

async fn handle_json_rpc(State(state): State<AppState>, body: String) -> impl IntoResponse {
    (StatusCode::OK, Json(handle_body(&state, &body).await))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": avail_da::VERSION,
    }))
}

async fn metrics() -> impl IntoResponse {
    match avail_da_telemetry::encode_metrics() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        ),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
                e.to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avail_da::{AvailDaConfig, AvailDaService, InstantSleeper, MockLightClient};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let (tx, rx) = watch::channel(false);
        let service = AvailDaService::new(
            &AvailDaConfig::for_testing(),
            Arc::new(MockLightClient::default()),
            Arc::new(InstantSleeper::default()),
            rx.clone(),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let handle = tokio::spawn(serve(listener, AppState::new(Arc::new(service)), rx));

        tx.send(true).unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap()
            .unwrap();
    }
}
