pub mod config;
pub mod encoding;
pub mod error;
pub mod gemini;
pub mod history;
pub mod logger;
pub mod models;
pub mod prompts;

pub use config::{GeminiConfig, PreferencePolicy, StylistConfig};
pub use error::{Result, StylistError};
pub use gemini::{ContentGenerator, GeminiTransport, GenerationInput, StylistClient};
pub use history::History;
pub use models::{EncodedImage, HistoryEntry, HistoryKind, Mode, StyleOptions};
