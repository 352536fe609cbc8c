use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

use crate::agent::input_types::Role;
use crate::agent::pipeline::{PipelineError, PromptPipeline};
use crate::agent::prompt_template::ChatPromptTemplate;
use crate::agent::stateless_llm::StatelessLLM;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant. Please respond to the question asked.";

pub fn chat_prompt() -> ChatPromptTemplate {
    ChatPromptTemplate::from_messages([(Role::System, SYSTEM_PROMPT), (Role::User, "Question:{question}")])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatQuery {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatAnswer {
    pub answer: String,
}

/// Line-oriented question/answer loop against a local model.
///
/// Every submission is independent: nothing from earlier turns is sent.
/// The model call is awaited inline, so input is not read while it runs.
pub struct ChatConsole {
    pipeline: PromptPipeline,
    display_name: String,
}

impl ChatConsole {
    pub fn new(llm: Arc<dyn StatelessLLM>, display_name: impl Into<String>) -> Self {
        Self {
            pipeline: PromptPipeline::new(chat_prompt(), llm),
            display_name: display_name.into(),
        }
    }

    pub fn title(&self) -> String {
        format!("{} Chatbot powered by Ollama", self.display_name)
    }

    pub fn input_label(&self) -> String {
        format!("Ask a question to {}:", self.display_name)
    }

    /// Empty input issues no call and yields `None`
    pub async fn ask(&self, input: &str) -> Result<Option<ChatAnswer>, PipelineError> {
        let input = input.trim_end_matches(['\r', '\n']);
        if input.is_empty() {
            return Ok(None);
        }

        let query = ChatQuery {
            question: input.to_string(),
        };
        let vars = HashMap::from([("question", query.question.as_str())]);
        let answer = self.pipeline.invoke(&vars).await?;
        Ok(Some(ChatAnswer { answer }))
    }

    /// Run until `input` reaches EOF
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(format!("{}\n\n", self.title()).as_bytes()).await?;
        let mut lines = input.lines();

        loop {
            output.write_all(format!("{} ", self.input_label()).as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match self.ask(&line).await {
                Ok(Some(ChatAnswer { answer })) => {
                    output.write_all(format!("{}\n\n", answer).as_bytes()).await?;
                }
                Ok(None) => debug!("Skipping empty input"),
                Err(e) => {
                    error!("Chat request to {} failed: {}", self.pipeline.model_name(), e);
                    output.write_all(format!("Error: {}\n\n", e).as_bytes()).await?;
                }
            }
        }

        output.write_all(b"\n").await?;
        output.flush().await
    }
}
