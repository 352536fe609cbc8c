use serde::{Deserialize, Serialize};

/// Reply envelope returned by a stateless LLM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AIMessage {
    /// Generated text
    pub content: String,
    /// Model name reported by the provider, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Why generation stopped ("stop", "length", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl AIMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: None,
            finish_reason: None,
        }
    }
}

/// Extracts the plain string answer from an [`AIMessage`].
///
/// The content is returned untouched: no trimming and no markup stripping.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrOutputParser;

impl StrOutputParser {
    pub fn parse(&self, message: AIMessage) -> String {
        message.content
    }
}
