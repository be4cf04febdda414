use thiserror::Error;

pub type AiResult<T> = Result<T, AiError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AiError {
    /// No API key was configured; AI features are disabled.
    #[error("AI generation is not configured (missing API key)")]
    NotConfigured,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("timeout")]
    Timeout,

    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    #[error("model returned no text")]
    EmptyResponse,

    #[error("json error: {0}")]
    Serde(String),
}

impl AiError {
    /// True when the failure came from the upstream model provider.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout | Self::Http { .. } | Self::EmptyResponse | Self::Serde(_)
        )
    }
}
