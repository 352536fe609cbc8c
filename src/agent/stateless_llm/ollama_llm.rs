use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stateless_llm_interface::{build_http_client, ensure_success, LlmError, StatelessLLM};
use crate::agent::input_types::Message;
use crate::agent::output_types::AIMessage;

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    keep_alive: Option<String>,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    message: Option<OllamaMessage>,
    #[serde(default)]
    done_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

/// Ollama LLM implementation
/// Uses the native `/api/chat` endpoint with streaming disabled
pub struct OllamaLLM {
    client: Client,
    model: String,
    base_url: String,
    temperature: f32,
    keep_alive: Option<f32>,
}

impl OllamaLLM {
    pub fn new(
        model: String,
        base_url: String,
        temperature: f32,
        keep_alive: Option<f32>,
        timeout_secs: Option<u64>,
    ) -> Self {
        info!("Initialized OllamaLLM: model={}, base_url={}", model, base_url);
        Self {
            client: build_http_client(timeout_secs),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature,
            keep_alive,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    // Ollama reads bare numbers as seconds; negative keeps the model loaded forever.
    fn keep_alive_param(&self) -> Option<String> {
        self.keep_alive.map(|secs| {
            if secs < 0.0 {
                "-1".to_string()
            } else {
                format!("{}s", secs)
            }
        })
    }
}

#[async_trait]
impl StatelessLLM for OllamaLLM {
    async fn chat_completion(&self, messages: &[Message]) -> Result<AIMessage, LlmError> {
        let url = self.endpoint();
        let body = OllamaChatRequest {
            model: &self.model,
            messages,
            stream: false,
            keep_alive: self.keep_alive_param(),
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };
        debug!("POST {} ({} messages)", url, messages.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::from_send(&url, e))?;
        let response = ensure_success(&url, response).await?;
        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::from_decode(&url, e))?;

        let message = parsed
            .message
            .ok_or_else(|| LlmError::EmptyResponse { url: url.clone() })?;

        Ok(AIMessage {
            content: message.content,
            model: parsed.model,
            finish_reason: parsed.done_reason,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
