use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::agent::pipeline::PipelineError;
use crate::agent::prompt_template::PromptError;
use crate::agent::stateless_llm::LlmError;

/// Startup failures; the process exits instead of serving traffic
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{0} environment variable not set!")]
    MissingCredential(String),
    #[error("configuration file not found: {0}")]
    NotFound(String),
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
    #[error("unsupported LLM provider: {0}")]
    UnsupportedProvider(String),
}

/// Per-request failures of the HTTP surface
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    /// Body never reached JSON parsing (content type, size limit, unreadable body)
    #[error("{0}")]
    Rejected(JsonRejection),
    #[error("upstream model call failed: {0}")]
    Upstream(#[from] LlmError),
    #[error("prompt formatting failed: {0}")]
    Prompt(#[from] PromptError),
}

impl AppError {
    /// Bad or mistyped JSON is a 422; everything else keeps axum's status
    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                Self::Validation(rejection.body_text())
            }
            other => Self::Rejected(other),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Prompt(e) => Self::Prompt(e),
            PipelineError::Llm(e) => Self::Upstream(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": detail }))).into_response()
            }
            Self::Rejected(rejection) => {
                (rejection.status(), Json(json!({ "detail": rejection.body_text() }))).into_response()
            }
            Self::Upstream(e) => {
                error!("Upstream failure: {}", e);
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": e.to_string() }))).into_response()
            }
            Self::Prompt(e) => {
                error!("Prompt failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
