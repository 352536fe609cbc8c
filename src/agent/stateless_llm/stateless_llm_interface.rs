use async_trait::async_trait;
use thiserror::Error;

use crate::agent::input_types::Message;
use crate::agent::output_types::AIMessage;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} contained no message")]
    EmptyResponse { url: String },
}

impl LlmError {
    pub(crate) fn from_send(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.to_string() }
        } else {
            Self::Transport {
                url: url.to_string(),
                source,
            }
        }
    }

    pub(crate) fn from_decode(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.to_string() }
        } else {
            Self::Decode {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Interface for a stateless language model
/// Stateless means the LLM doesn't store memory, system prompts, or user messages
#[async_trait]
pub trait StatelessLLM: Send + Sync {
    /// Send the full message list and wait for the complete reply
    async fn chat_completion(&self, messages: &[Message]) -> Result<AIMessage, LlmError>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

/// Fail fast on non-2xx replies, keeping the body for the error message
pub(crate) async fn ensure_success(
    url: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unable to read response body>".to_string());
    Err(LlmError::Status {
        url: url.to_string(),
        status,
        body,
    })
}

/// Shared reqwest client construction; `None` means no request timeout
pub(crate) fn build_http_client(timeout_secs: Option<u64>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default HTTP client: {}", e);
        reqwest::Client::new()
    })
}
