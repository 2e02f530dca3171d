//! Snooscope HTTP API.
//!
//! Axum-based server exposing the insight pipeline and profile lookup.
//! Each endpoint has a thin axum handler that delegates to an inner
//! function returning `(StatusCode, Json)`. The inner functions are
//! directly testable without axum dispatch machinery.
//!
//! Endpoints:
//! - GET /health              — liveness check
//! - GET /insights/:username  — aggregate activity, run AI analysis
//! - GET /profile/:username   — normalized profile stats

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use llm_interface::InsightProvider;
use reddit_client::RedditClient;
use serde_json::{json, Value};
use snooscope_core::{CoreError, ErrorExt};
use tokio::net::TcpListener;

use crate::pipeline;

/// Shared state for all HTTP handlers. Constructed once at startup; the
/// provider is a trait object so tests can substitute a canned one.
#[derive(Clone)]
pub struct AppState {
    pub reddit: RedditClient,
    pub provider: Arc<dyn InsightProvider>,
}

/// Build the axum router with all endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/insights/:username", get(insights_handler))
        .route("/profile/:username", get(profile_handler))
        .with_state(state)
}

/// Binds the configured address and serves until the process exits.
pub async fn start_server(bind_addr: &str, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Snooscope HTTP API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn error_response(err: CoreError) -> (StatusCode, Json<Value>) {
    err.log_error();
    let status = match &err {
        CoreError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.user_friendly_message() })))
}

// ============================================================================
// Inner (directly testable) functions
// ============================================================================

pub fn health_inner() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

pub async fn insights_inner(state: &AppState, username: &str) -> (StatusCode, Json<Value>) {
    match pipeline::analyze_user(&state.reddit, state.provider.as_ref(), username).await {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(err) => error_response(err),
    }
}

pub async fn profile_inner(state: &AppState, username: &str) -> (StatusCode, Json<Value>) {
    match pipeline::profile_view(&state.reddit, username).await {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(err) => error_response(err),
    }
}

// ============================================================================
// Thin axum handlers
// ============================================================================

async fn health_handler() -> impl IntoResponse {
    health_inner()
}

async fn insights_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    insights_inner(&state, &username).await
}

async fn profile_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    profile_inner(&state, &username).await
}
