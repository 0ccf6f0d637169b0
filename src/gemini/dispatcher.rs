use crate::{
    config::GeminiConfig,
    encoding::random_seed,
    error::{Result, StylistError, TransportError},
    logger,
    models::{GenerateContentRequest, GenerateContentResponse, GenerationRequest, Mode, ParsedResponse},
    prompts::Prompt,
};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

/// The remote `generateContent` operation.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
        api_key: &str,
    ) -> std::result::Result<ParsedResponse, TransportError>;
}

#[derive(Clone)]
pub struct GeminiTransport {
    client: Client,
    endpoint: String,
}

impl GeminiTransport {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StylistError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentGenerator for GeminiTransport {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
        api_key: &str,
    ) -> std::result::Result<ParsedResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(raw.into())
    }
}

/// Sends exactly one request per call. No retries.
#[derive(Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn ContentGenerator>,
}

impl RequestDispatcher {
    pub fn new(transport: Arc<dyn ContentGenerator>) -> Self {
        Self { transport }
    }

    pub async fn dispatch(
        &self,
        mode: Mode,
        prompt: Prompt,
        credential: &str,
    ) -> Result<ParsedResponse> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(StylistError::MissingCredential);
        }

        let request = GenerationRequest {
            instruction: prompt.instruction,
            attachments: prompt.attachments,
            seed: random_seed(),
        };

        log::info!(
            "Dispatching {} generation with {} image(s), seed {}",
            mode,
            request.attachments.len(),
            request.seed
        );
        log::debug!("Credential length: {}", credential.len());

        let timer = logger::timer(&format!("gemini {} call", mode));
        let result = self
            .transport
            .generate_content(&request.to_wire(), credential)
            .await;
        drop(timer);

        result.map_err(|e| {
            log::error!("Gemini {} API error: {}", mode, e);
            StylistError::Generation(mode.failure_message().to_string())
        })
    }
}
