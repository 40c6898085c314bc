use crate::core::migration::MigrationEngine;
use crate::core::{Fetcher, MigrationResult, Publisher, ResourceKind};
use crate::utils::error::{ErrorCategory, MigrationError, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

struct AppState<F: Fetcher, P: Publisher> {
    engine: Arc<MigrationEngine<F, P>>,
    shutdown: CancellationToken,
}

impl<F: Fetcher, P: Publisher> Clone for AppState<F, P> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            shutdown: self.shutdown.clone(),
        }
    }
}

pub fn router<F, P>(engine: Arc<MigrationEngine<F, P>>, shutdown: CancellationToken) -> Router
where
    F: Fetcher + 'static,
    P: Publisher + 'static,
{
    let state = AppState { engine, shutdown };

    Router::new()
        .route("/migrate/characters", post(migrate_characters::<F, P>))
        .route("/migrate/locations", post(migrate_locations::<F, P>))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve<F, P>(
    bind: &str,
    engine: Arc<MigrationEngine<F, P>>,
    shutdown: CancellationToken,
) -> Result<()>
where
    F: Fetcher + 'static,
    P: Publisher + 'static,
{
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| MigrationError::Server {
            message: format!("bind {}: {}", bind, e),
        })?;

    serve_with_listener(listener, engine, shutdown).await
}

pub async fn serve_with_listener<F, P>(
    listener: TcpListener,
    engine: Arc<MigrationEngine<F, P>>,
    shutdown: CancellationToken,
) -> Result<()>
where
    F: Fetcher + 'static,
    P: Publisher + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("🚀 Listening for migration triggers on {}", addr);
    }

    let app = router(engine, shutdown.clone());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| MigrationError::Server {
            message: format!("axum serve: {}", e),
        })
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn migrate_characters<F, P>(State(state): State<AppState<F, P>>) -> Response
where
    F: Fetcher + 'static,
    P: Publisher + 'static,
{
    run_migration(&state, ResourceKind::Character).await
}

async fn migrate_locations<F, P>(State(state): State<AppState<F, P>>) -> Response
where
    F: Fetcher + 'static,
    P: Publisher + 'static,
{
    run_migration(&state, ResourceKind::Location).await
}

async fn run_migration<F: Fetcher, P: Publisher>(
    state: &AppState<F, P>,
    kind: ResourceKind,
) -> Response {
    // 每個請求各自的 token，伺服器關閉時一併取消
    let cancel = state.shutdown.child_token();
    let outcome = state.engine.migrate(kind, &cancel).await;

    let (status, body) = migration_response(kind, outcome);
    (status, Json(body)).into_response()
}

/// 兩種資源採用相同的回應規則：部分失敗時回傳所有失敗明細
pub fn migration_response(
    kind: ResourceKind,
    outcome: Result<MigrationResult>,
) -> (StatusCode, Value) {
    match outcome {
        Ok(result) if result.is_success() => (
            StatusCode::ACCEPTED,
            json!({
                "message": format!("{} published", published_label(kind)),
                "published": result.published_count,
            }),
        ),
        Ok(result) => {
            let errors: Vec<String> = result.failures.iter().map(ToString::to_string).collect();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "errors": errors,
                    "published": result.published_count,
                }),
            )
        }
        Err(e) => {
            tracing::error!("{} migration failed: {}", kind, e);
            let status = match e.category() {
                ErrorCategory::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, json!({"error": e.to_string()}))
        }
    }
}

fn published_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Character => "Characters",
        ResourceKind::Location => "Locations",
    }
}
