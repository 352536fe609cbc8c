use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stateless_llm_interface::{build_http_client, ensure_success, LlmError, StatelessLLM};
use crate::agent::input_types::Message;
use crate::agent::output_types::AIMessage;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI compatible LLM implementation
/// Talks to any `/chat/completions` endpoint (Groq, OpenAI, vLLM, ...)
pub struct OpenAICompatibleLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: String,
    organization_id: Option<String>,
    project_id: Option<String>,
    temperature: f32,
}

impl OpenAICompatibleLLM {
    pub fn new(
        model: String,
        base_url: String,
        api_key: String,
        organization_id: Option<String>,
        project_id: Option<String>,
        temperature: f32,
        timeout_secs: Option<u64>,
    ) -> Self {
        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            model, base_url
        );
        Self {
            client: build_http_client(timeout_secs),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            organization_id,
            project_id,
            temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl StatelessLLM for OpenAICompatibleLLM {
    async fn chat_completion(&self, messages: &[Message]) -> Result<AIMessage, LlmError> {
        let url = self.endpoint();
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            stream: false,
        };
        debug!("POST {} ({} messages)", url, messages.len());

        let mut request = self.client.post(&url).bearer_auth(&self.api_key).json(&body);
        if let Some(org) = &self.organization_id {
            request = request.header("OpenAI-Organization", org);
        }
        if let Some(project) = &self.project_id {
            request = request.header("OpenAI-Project", project);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::from_send(&url, e))?;
        let response = ensure_success(&url, response).await?;
        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::from_decode(&url, e))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyResponse { url: url.clone() })?;

        Ok(AIMessage {
            content: choice.message.content.unwrap_or_default(),
            model: parsed.model,
            finish_reason: choice.finish_reason,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
