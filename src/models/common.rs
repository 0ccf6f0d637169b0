use serde::{Deserialize, Serialize};
use std::fmt;

/// Length choices offered by the preferences picker.
pub const LENGTH_PRESETS: [&str; 5] = ["Short", "Medium", "Long", "Buzz Cut", "Bald"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Reference,
    Text,
    Lucky,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Reference => "reference",
            Mode::Text => "text",
            Mode::Lucky => "lucky",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reference" | "ref" | "swap" => Some(Mode::Reference),
            "text" | "describe" | "description" => Some(Mode::Text),
            "lucky" => Some(Mode::Lucky),
            _ => None,
        }
    }

    /// Generic message surfaced when the remote call for this mode fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Mode::Reference => "Failed to generate hairstyle swap. Please try again.",
            Mode::Text => "Failed to generate hairstyle from description. Please try again.",
            Mode::Lucky => "Failed to generate lucky hairstyle. Please try again.",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional length/color preferences. `None` means keep the original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOptions {
    pub hair_length: Option<String>,
    pub hair_color: Option<String>,
}

impl StyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank strings count as unset, like an untouched picker.
    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.hair_length = non_blank(length.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.hair_color = non_blank(color.into());
        self
    }

    pub fn length(&self) -> Option<&str> {
        self.hair_length.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn color(&self) -> Option<&str> {
        self.hair_color.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.length().is_none() && self.color().is_none()
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
