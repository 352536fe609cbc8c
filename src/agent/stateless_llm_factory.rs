use std::sync::Arc;
use tracing::info;

use crate::agent::stateless_llm::ollama_llm::OllamaLLM;
use crate::agent::stateless_llm::openai_compatible_llm::OpenAICompatibleLLM;
use crate::agent::stateless_llm::StatelessLLM;
use crate::config_manager::main::GROQ_API_KEY_VAR;
use crate::config_manager::StatelessLLMConfig;
use crate::error::ConfigurationError;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on the configuration.
    ///
    /// Hosted providers refuse to build without an API key; Ollama needs none.
    pub fn create_llm(config: &StatelessLLMConfig) -> Result<Arc<dyn StatelessLLM>, ConfigurationError> {
        info!("Initializing LLM: {}", config.llm_provider);

        match config.llm_provider.as_str() {
            "groq_llm" | "openai_llm" | "openai_compatible_llm" => {
                let api_key = config
                    .api_key()
                    .ok_or_else(|| ConfigurationError::MissingCredential(credential_var(&config.llm_provider)))?;
                Ok(Arc::new(OpenAICompatibleLLM::new(
                    config.model.clone(),
                    config.base_url.clone(),
                    api_key.to_string(),
                    config.organization_id.clone(),
                    config.project_id.clone(),
                    config.temperature,
                    config.request_timeout_secs,
                )))
            }
            "ollama_llm" => Ok(Arc::new(OllamaLLM::new(
                config.model.clone(),
                config.base_url.clone(),
                config.temperature,
                config.keep_alive,
                config.request_timeout_secs,
            ))),
            other => Err(ConfigurationError::UnsupportedProvider(other.to_string())),
        }
    }
}

fn credential_var(provider: &str) -> String {
    match provider {
        "groq_llm" => GROQ_API_KEY_VAR.to_string(),
        _ => "llm_api_key".to_string(),
    }
}
