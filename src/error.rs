use thiserror::Error;

#[derive(Debug, Error)]
pub enum StylistError {
    #[error("No API Key found. Please set your Gemini API Key.")]
    MissingCredential,
    #[error("{0}")]
    MissingInput(String),
    #[error("{0}")]
    Generation(String),
    #[error("No candidates returned from Gemini.")]
    NoCandidates,
    #[error("Model returned text instead of image: {0}")]
    ModelRefusal(String),
    #[error("No image data found in response.")]
    EmptyResponse,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StylistError {
    /// The single human-readable message shown to whoever triggered the call.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Failures of the remote call itself. These never leave the dispatcher;
/// they are logged and replaced by a [`StylistError::Generation`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to decode Gemini response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StylistError>;
