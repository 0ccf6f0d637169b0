use crate::{
    error::{Result, StylistError},
    models::Mode,
};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub model: String,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

/// Whether caller-supplied style options are forwarded to each mode's builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferencePolicy {
    pub reference: bool,
    pub text: bool,
    pub lucky: bool,
}

#[derive(Debug, Clone)]
pub struct StylistConfig {
    pub gemini: GeminiConfig,
    pub preferences: PreferencePolicy,
    pub history_limit: Option<usize>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_base = env::var("GEMINI_API_BASE")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.api_base);
        let model = env::var("GEMINI_MODEL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.model);
        let timeout = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        GeminiConfig {
            api_base,
            model,
            timeout,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(StylistError::Config("Gemini model name is required".into()));
        }
        if self.api_base.trim().is_empty() {
            return Err(StylistError::Config("Gemini API base URL is required".into()));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(StylistError::Config("Timeout must be greater than zero".into()));
        }
        Ok(())
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        let trimmed = self.model.trim();
        let model_path = if trimmed.starts_with("models/") {
            trimmed.to_string()
        } else {
            format!("models/{}", trimmed)
        };
        format!("{}/{}:generateContent", self.api_base, model_path)
    }
}

impl Default for PreferencePolicy {
    fn default() -> Self {
        // Reference mode is a pure swap unless the caller opts in.
        PreferencePolicy {
            reference: false,
            text: true,
            lucky: true,
        }
    }
}

impl PreferencePolicy {
    pub fn all() -> Self {
        PreferencePolicy {
            reference: true,
            text: true,
            lucky: true,
        }
    }

    pub fn none() -> Self {
        PreferencePolicy {
            reference: false,
            text: false,
            lucky: false,
        }
    }

    pub fn with_mode(mut self, mode: Mode, enabled: bool) -> Self {
        match mode {
            Mode::Reference => self.reference = enabled,
            Mode::Text => self.text = enabled,
            Mode::Lucky => self.lucky = enabled,
        }
        self
    }

    pub fn applies_to(&self, mode: Mode) -> bool {
        match mode {
            Mode::Reference => self.reference,
            Mode::Text => self.text,
            Mode::Lucky => self.lucky,
        }
    }
}

impl Default for StylistConfig {
    fn default() -> Self {
        StylistConfig {
            gemini: GeminiConfig::default(),
            preferences: PreferencePolicy::default(),
            history_limit: None,
        }
    }
}

impl StylistConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let history_limit = env::var("HAIRGEN_HISTORY_LIMIT")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        StylistConfig {
            gemini: GeminiConfig::from_env(),
            preferences: PreferencePolicy::default(),
            history_limit,
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_preferences(mut self, preferences: PreferencePolicy) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}
