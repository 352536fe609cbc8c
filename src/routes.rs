use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info_span, Instrument};

use crate::error::AppError;
use crate::state::AppState;
use crate::translate::{TranslationRequest, TranslationResponse};

pub const WELCOME_MESSAGE: &str = "Welcome to the Translation API! Visit /docs for details.";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(read_root))
        .route("/health", get(health_check))
        .route("/translate", post(translate_text))
        .fallback(not_found)
}

/// Routes plus middleware, with state applied
pub fn build_app(state: AppState) -> Router {
    create_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn read_root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn translate_text(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, AppError> {
    let Json(request) = payload.map_err(AppError::from_json_rejection)?;
    validate(&request)?;

    let span = info_span!(
        "translate",
        request_id = %state.generate_request_id(),
        language = %request.language
    );
    let response = state.translator.translate(&request).instrument(span).await?;

    Ok(Json(response))
}

fn validate(request: &TranslationRequest) -> Result<(), AppError> {
    for (field, value) in [("language", &request.language), ("text", &request.text)] {
        if value.is_empty() {
            return Err(AppError::Validation(format!(
                "Field \"{field}\" must be a non-empty string"
            )));
        }
    }
    Ok(())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
