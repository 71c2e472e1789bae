use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One chat-completion call: a system persona, a user prompt, and a sampling temperature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    pub persona: String,
    pub prompt: String,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(persona: impl Into<String>, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            persona: persona.into(),
            prompt: prompt.into(),
            temperature: temperature.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CompletionError::Parse(err.to_string())
        } else {
            CompletionError::Transport(err.to_string())
        }
    }
}

/// Text-completion collaborator. `Ok(None)` means the service answered but
/// produced no usable content; the caller substitutes its own placeholder.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, CompletionError>;

    /// Model identifier reported by `/info`
    fn model(&self) -> &str;
}
