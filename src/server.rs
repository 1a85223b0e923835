use crate::{
    config::Config,
    errors::{into_response, AppError},
    gate::{Gate, ListParams, PreviewParams},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<Gate>,
}

pub async fn serve(cfg: Config, gate: Gate) -> anyhow::Result<()> {
    let addr = format!("{}:{}", cfg.server.bind_addr, cfg.server.port);
    let shared = AppState {
        gate: Arc::new(gate),
    };

    let app = build_router(shared);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(shared: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/api/files", get(list_files))
        .route("/api/files/preview", get(preview_file))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status":"ok"})))
}

async fn list_files(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let gate = state.gate.clone();
    // Directory walks hit the disk; keep them off the async worker threads.
    let result = tokio::task::spawn_blocking(move || gate.list(&params))
        .await
        .unwrap_or(Err(AppError::ScanFailed));
    respond(&request_id, "list", started, result)
}

async fn preview_file(
    State(state): State<AppState>,
    Query(params): Query<PreviewParams>,
) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    let gate = state.gate.clone();
    let result = tokio::task::spawn_blocking(move || gate.preview(&params))
        .await
        .unwrap_or(Err(AppError::ReadFailed));
    respond(&request_id, "preview", started, result)
}

fn respond<T: Serialize>(
    request_id: &str,
    op: &str,
    started: Instant,
    result: Result<T, AppError>,
) -> Response {
    match result {
        Ok(value) => {
            audit_end(
                request_id,
                op,
                "allow",
                "OK",
                started.elapsed().as_millis() as u64,
            );
            (StatusCode::OK, Json(value)).into_response()
        }
        Err(e) => {
            let decision = match e {
                AppError::ScanFailed | AppError::ReadFailed => "error",
                _ => "deny",
            };
            audit_end(
                request_id,
                op,
                decision,
                e.code(),
                started.elapsed().as_millis() as u64,
            );
            into_response(e).into_response()
        }
    }
}

fn audit_end(request_id: &str, op: &str, decision: &str, code: &str, duration_ms: u64) {
    tracing::info!(
        request_id = request_id,
        op = op,
        decision = decision,
        code = code,
        duration_ms = duration_ms,
        "audit"
    );
}
