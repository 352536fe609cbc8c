use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::agent::output_types::StrOutputParser;
use crate::agent::prompt_template::{ChatPromptTemplate, PromptError};
use crate::agent::stateless_llm::{LlmError, StatelessLLM};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Prompt formatting, model call and output parsing, in that order
#[derive(Clone)]
pub struct PromptPipeline {
    template: ChatPromptTemplate,
    llm: Arc<dyn StatelessLLM>,
    parser: StrOutputParser,
}

impl PromptPipeline {
    pub fn new(template: ChatPromptTemplate, llm: Arc<dyn StatelessLLM>) -> Self {
        Self {
            template,
            llm,
            parser: StrOutputParser,
        }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    pub async fn invoke(&self, vars: &HashMap<&str, &str>) -> Result<String, PipelineError> {
        let messages = self.template.format(vars)?;
        debug!("Prompt for {}: {:?}", self.llm.model_name(), messages);

        let reply = self.llm.chat_completion(&messages).await?;
        Ok(self.parser.parse(reply))
    }
}
