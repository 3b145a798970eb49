//! Chat module: free-form questions answered by a language model

mod openai;

pub use openai::OpenAiChat;

/// Answers free-form questions
#[allow(async_fn_in_trait)]
pub trait ChatResponder {
    async fn respond(&self, query: &str) -> Result<String, ChatError>;
}

/// Errors returned by a chat backend
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("no chat backend configured")]
    NotConfigured,

    #[error("chat request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat backend returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("chat backend returned no answer")]
    Empty,
}
