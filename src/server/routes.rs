use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    error::{StoreError, ValidationError},
    renderer::render_haikus_page,
    server::AppState,
    types::haiku::{Haiku, NewHaiku},
};

type AppStateArc = Arc<AppState>;

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Store(StoreError),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(e) => {
                warn!("Rejected haiku payload: {e}");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Store(e) => {
                error!("Haiku store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to access haikus: {e}"),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ============================================================================
// Page Routes
// ============================================================================

pub fn page_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(haikus_page))
        .route("/haikus", get(haikus_page).post(create_haiku))
}

async fn haikus_page(State(state): State<AppStateArc>) -> Result<Html<String>, ApiError> {
    let haikus = state.store.list_all().await?;
    Ok(Html(render_haikus_page(&haikus)))
}

async fn create_haiku(
    State(state): State<AppStateArc>,
    payload: Result<Json<NewHaiku>, JsonRejection>,
) -> Result<(StatusCode, Json<Haiku>), ApiError> {
    let Json(payload) = payload.map_err(|e| ValidationError(e.body_text()))?;
    let haiku = payload.validate()?;

    state.store.append(&haiku).await?;
    info!(id = %haiku.id, "Haiku created via API");

    Ok((StatusCode::CREATED, Json(haiku)))
}

// ============================================================================
// API Routes
// ============================================================================

pub fn api_routes() -> Router<AppStateArc> {
    Router::new().route("/api/haikus", get(list_haikus))
}

async fn list_haikus(State(state): State<AppStateArc>) -> Result<Json<Vec<Haiku>>, ApiError> {
    Ok(Json(state.store.list_all().await?))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/ping", get(ping))
        .route("/db-ping", get(db_ping))
}

async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "message": "pong" }))
}

async fn db_ping(State(state): State<AppStateArc>) -> (StatusCode, Json<serde_json::Value>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Successfully connected and pinged the database" })),
        ),
        Err(e) => {
            error!("Database ping failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": format!("Failed to ping database: {e}") })),
            )
        }
    }
}
