use serde::{Deserialize, Serialize};

/// Connection settings for one LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatelessLLMConfig {
    /// One of "groq_llm", "openai_llm", "openai_compatible_llm", "ollama_llm"
    #[serde(rename = "llm_provider")]
    pub llm_provider: String,

    #[serde(rename = "base_url")]
    pub base_url: String,

    #[serde(rename = "llm_api_key")]
    #[serde(default)]
    pub llm_api_key: Option<String>,

    pub model: String,

    #[serde(rename = "organization_id")]
    #[serde(default)]
    pub organization_id: Option<String>,

    #[serde(rename = "project_id")]
    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Ollama only: seconds to keep the model loaded, negative for forever
    #[serde(rename = "keep_alive")]
    #[serde(default)]
    pub keep_alive: Option<f32>,

    /// No timeout when absent
    #[serde(rename = "request_timeout_secs")]
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_temperature() -> f32 {
    0.7
}

impl StatelessLLMConfig {
    /// The API key, unless it is empty or an unresolved `${VAR}` placeholder
    pub fn api_key(&self) -> Option<&str> {
        self.llm_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !(key.starts_with("${") && key.ends_with('}')))
    }
}

/// Hosted model behind the translation endpoint
pub fn default_translation_llm() -> StatelessLLMConfig {
    StatelessLLMConfig {
        llm_provider: "groq_llm".to_string(),
        base_url: "https://api.groq.com/openai/v1".to_string(),
        llm_api_key: None,
        model: "gemma2-9b-it".to_string(),
        organization_id: None,
        project_id: None,
        temperature: default_temperature(),
        keep_alive: None,
        request_timeout_secs: Some(60),
    }
}

/// Local model behind the chat console
pub fn default_chat_llm() -> StatelessLLMConfig {
    StatelessLLMConfig {
        llm_provider: "ollama_llm".to_string(),
        base_url: "http://localhost:11434".to_string(),
        llm_api_key: None,
        model: "gemma2:2b".to_string(),
        organization_id: None,
        project_id: None,
        temperature: 0.8,
        keep_alive: None,
        request_timeout_secs: None,
    }
}
