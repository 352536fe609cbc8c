use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::agent::input_types::Role;
use crate::agent::pipeline::{PipelineError, PromptPipeline};
use crate::agent::prompt_template::ChatPromptTemplate;
use crate::agent::stateless_llm::StatelessLLM;
use crate::translate::interface::{TranslationRequest, TranslationResponse};

pub const SYSTEM_TEMPLATE: &str = "Translate the following text into {language}:";

pub fn translation_prompt() -> ChatPromptTemplate {
    ChatPromptTemplate::from_messages([(Role::System, SYSTEM_TEMPLATE), (Role::User, "{text}")])
}

/// Translation pipeline, built once and shared by every request
pub struct Translator {
    pipeline: PromptPipeline,
}

impl Translator {
    pub fn new(llm: Arc<dyn StatelessLLM>) -> Self {
        info!("Translator ready: model={}", llm.model_name());
        Self {
            pipeline: PromptPipeline::new(translation_prompt(), llm),
        }
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse, PipelineError> {
        let vars = HashMap::from([
            ("language", request.language.as_str()),
            ("text", request.text.as_str()),
        ]);
        let translation = self.pipeline.invoke(&vars).await?;
        Ok(TranslationResponse { translation })
    }
}
