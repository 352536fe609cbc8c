use std::sync::Arc;
use uuid::Uuid;

use crate::agent::stateless_llm::StatelessLLM;
use crate::agent::stateless_llm_factory::StatelessLLMFactory;
use crate::config_manager::Config;
use crate::error::ConfigurationError;
use crate::translate::Translator;

/// Shared, read-only server state. Built once in `main`, dropped at shutdown.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
}

impl AppState {
    /// Build the translation model from config; fails without a credential
    pub fn new(config: &Config) -> Result<Self, ConfigurationError> {
        let llm = StatelessLLMFactory::create_llm(&config.translation_llm)?;
        Ok(Self::with_llm(llm))
    }

    pub fn with_llm(llm: Arc<dyn StatelessLLM>) -> Self {
        Self {
            translator: Arc::new(Translator::new(llm)),
        }
    }

    pub fn generate_request_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
