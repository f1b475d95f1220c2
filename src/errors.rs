use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to load summarization engine: {0}")]
    Startup(String),

    #[error("Failed to decode request body: {0}")]
    Decode(String),

    #[error("Summarization failed: {0}")]
    Inference(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),
}

impl SummarizerError {
    /// Whether the failure was caused by the caller's request rather than the service.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, SummarizerError::Decode(_))
    }
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        SummarizerError::HttpError(error.to_string())
    }
}
