use serde::{Deserialize, Serialize};

/// Body of `POST /translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Target language, free text ("French", "Japanese", ...)
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translation: String,
}
