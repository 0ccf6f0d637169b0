pub mod dispatcher;
pub mod extractor;

use crate::{
    config::{PreferencePolicy, StylistConfig},
    error::{Result, StylistError},
    history::History,
    models::{EncodedImage, HistoryEntry, Mode, StyleOptions},
    prompts::{self, Prompt},
};
use std::sync::Arc;

pub use dispatcher::{ContentGenerator, GeminiTransport, RequestDispatcher};
pub use extractor::extract;

/// Everything the caller has collected for one generation.
#[derive(Debug, Clone, Default)]
pub struct GenerationInput {
    pub user_image: Option<EncodedImage>,
    pub style_image: Option<EncodedImage>,
    pub description: Option<String>,
    pub options: StyleOptions,
}

impl GenerationInput {
    pub fn new(user_image: EncodedImage) -> Self {
        Self {
            user_image: Some(user_image),
            ..Default::default()
        }
    }

    /// Accepts a raw base64 string or a `data:` URI.
    pub fn from_payload(payload: &str) -> Self {
        Self::new(EncodedImage::parse(payload))
    }

    pub fn with_style_image(mut self, image: EncodedImage) -> Self {
        self.style_image = Some(image);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_options(mut self, options: StyleOptions) -> Self {
        self.options = options;
        self
    }
}

/// Picks the builder for a mode, sends the request and extracts the image.
/// Each call is independent; nothing is shared between calls.
#[derive(Clone)]
pub struct StylistClient {
    dispatcher: RequestDispatcher,
    preferences: PreferencePolicy,
}

impl StylistClient {
    pub fn new(config: StylistConfig) -> Result<Self> {
        let transport = GeminiTransport::new(&config.gemini)?;
        log::info!("Gemini endpoint: {}", transport.endpoint());
        Ok(Self::with_transport(Arc::new(transport), config.preferences))
    }

    pub fn with_transport(
        transport: Arc<dyn ContentGenerator>,
        preferences: PreferencePolicy,
    ) -> Self {
        Self {
            dispatcher: RequestDispatcher::new(transport),
            preferences,
        }
    }

    pub fn preferences(&self) -> PreferencePolicy {
        self.preferences
    }

    /// The options forwarded to `mode`'s builder, or `None` when the
    /// policy drops them for that mode.
    pub fn effective_options<'a>(
        &self,
        mode: Mode,
        options: &'a StyleOptions,
    ) -> Option<&'a StyleOptions> {
        if self.preferences.applies_to(mode) {
            return Some(options);
        }
        if !options.is_empty() {
            log::debug!(
                "Ignoring style options for {} mode (length {:?}, color {:?}); enable them in PreferencePolicy",
                mode,
                options.length(),
                options.color()
            );
        }
        None
    }

    /// Validates the inputs the mode needs and builds its prompt.
    pub fn prepare(&self, mode: Mode, input: &GenerationInput) -> Result<Prompt> {
        let user = input
            .user_image
            .as_ref()
            .filter(|image| !image.is_empty())
            .ok_or_else(|| StylistError::MissingInput("Please upload a photo of yourself.".into()))?;

        let no_options = StyleOptions::default();
        let options = self.effective_options(mode, &input.options).unwrap_or(&no_options);

        let prompt = match mode {
            Mode::Reference => {
                let style = input
                    .style_image
                    .as_ref()
                    .filter(|image| !image.is_empty())
                    .ok_or_else(|| {
                        StylistError::MissingInput("Please upload a reference style image.".into())
                    })?;
                prompts::reference::build(user, style, options)
            }
            Mode::Text => {
                let description = input
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| StylistError::MissingInput("Please describe a style.".into()))?;
                prompts::description::build(user, description, options)
            }
            Mode::Lucky => prompts::lucky::build(user, options),
        };

        Ok(prompt)
    }

    pub async fn generate(
        &self,
        mode: Mode,
        input: &GenerationInput,
        credential: &str,
    ) -> Result<EncodedImage> {
        let prompt = self.prepare(mode, input)?;
        let response = self.dispatcher.dispatch(mode, prompt, credential).await?;
        let image = extract(response)?;
        log::info!("Received {} result ({})", mode, image.mime_type);
        Ok(image)
    }

    /// Same as [`generate`](Self::generate), recording a success in `history`.
    pub async fn generate_and_record(
        &self,
        mode: Mode,
        input: &GenerationInput,
        credential: &str,
        history: &mut History,
    ) -> Result<HistoryEntry> {
        let image = self.generate(mode, input, credential).await?;
        Ok(history.push(image, mode).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::models::{GenerateContentRequest, HistoryKind, ParsedResponse};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct MockTransport {
        reply: Value,
        requests: Mutex<Vec<Value>>,
    }

    impl MockTransport {
        fn replying(reply: Value) -> Arc<Self> {
            Arc::new(Self {
                reply,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn instruction(&self, index: usize) -> String {
            self.requests.lock().unwrap()[index]["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .to_string()
        }
    }

    #[async_trait]
    impl ContentGenerator for MockTransport {
        async fn generate_content(
            &self,
            request: &GenerateContentRequest,
            _api_key: &str,
        ) -> std::result::Result<ParsedResponse, TransportError> {
            self.requests
                .lock()
                .unwrap()
                .push(serde_json::to_value(request).unwrap());
            Ok(ParsedResponse::from_value(self.reply.clone())?)
        }
    }

    fn image_reply() -> Value {
        json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "RESULT" } }
            ]}}]
        })
    }

    fn selfie() -> EncodedImage {
        EncodedImage::parse("data:image/jpeg;base64,SELFIE")
    }

    #[tokio::test]
    async fn test_reference_with_color_override() {
        let transport = MockTransport::replying(image_reply());
        let client = StylistClient::with_transport(transport.clone(), PreferencePolicy::all());
        let input = GenerationInput::new(selfie())
            .with_style_image(EncodedImage::parse("data:image/png;base64,REF"))
            .with_options(StyleOptions::new().with_color("blonde"));

        let image = client.generate(Mode::Reference, &input, "key").await.unwrap();
        assert_eq!(image.to_data_uri(), "data:image/png;base64,RESULT");

        let instruction = transport.instruction(0);
        assert!(instruction.contains("Change the hair color to blonde."));
        assert!(!instruction.contains(prompts::reference::KEEP_USER_COLOR));

        let requests = transport.requests.lock().unwrap();
        let parts = requests[0]["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1]["inlineData"]["data"], "SELFIE");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[2]["inlineData"]["data"], "REF");
    }

    #[tokio::test]
    async fn test_reference_ignores_options_by_default() {
        let transport = MockTransport::replying(image_reply());
        let client = StylistClient::with_transport(transport.clone(), PreferencePolicy::default());
        let input = GenerationInput::from_payload("data:image/jpeg;base64,SELFIE")
            .with_style_image(EncodedImage::parse("REF"))
            .with_options(StyleOptions::new().with_color("blonde"));

        assert!(client
            .effective_options(Mode::Reference, &input.options)
            .is_none());
        assert_eq!(
            client.effective_options(Mode::Lucky, &input.options),
            Some(&input.options)
        );

        client.generate(Mode::Reference, &input, "key").await.unwrap();
        let instruction = transport.instruction(0);
        assert!(!instruction.contains("blonde"));
        assert!(instruction.contains(prompts::reference::KEEP_USER_COLOR));
    }

    #[tokio::test]
    async fn test_lucky_without_options_has_no_constraints() {
        let transport = MockTransport::replying(image_reply());
        let client = StylistClient::with_transport(transport.clone(), PreferencePolicy::default());

        client
            .generate(Mode::Lucky, &GenerationInput::new(selfie()), "key")
            .await
            .unwrap();
        let instruction = transport.instruction(0);
        assert!(!instruction.contains("MUST"));
    }

    #[tokio::test]
    async fn test_missing_inputs_never_dispatch() {
        let transport = MockTransport::replying(image_reply());
        let client = StylistClient::with_transport(transport.clone(), PreferencePolicy::default());

        let err = client
            .generate(Mode::Reference, &GenerationInput::new(selfie()), "key")
            .await
            .unwrap_err();
        assert!(matches!(err, StylistError::MissingInput(_)));

        for description in ["", "   \t"] {
            let input = GenerationInput::new(selfie()).with_description(description);
            let err = client.generate(Mode::Text, &input, "key").await.unwrap_err();
            assert!(matches!(err, StylistError::MissingInput(_)));
        }

        let err = client
            .generate(Mode::Lucky, &GenerationInput::default(), "key")
            .await
            .unwrap_err();
        assert!(matches!(err, StylistError::MissingInput(_)));

        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_refusal_reaches_caller() {
        let transport = MockTransport::replying(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "I cannot process this request" }
            ]}}]
        }));
        let client = StylistClient::with_transport(transport, PreferencePolicy::default());
        let input = GenerationInput::new(selfie()).with_description("Classic 50s hollywood waves");

        let err = client.generate(Mode::Text, &input, "key").await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Model returned text instead of image: I cannot process this request"
        );
    }

    #[tokio::test]
    async fn test_generate_and_record() {
        let transport = MockTransport::replying(image_reply());
        let client = StylistClient::with_transport(transport.clone(), PreferencePolicy::default());
        let mut history = History::new();

        let entry = client
            .generate_and_record(Mode::Lucky, &GenerationInput::new(selfie()), "key", &mut history)
            .await
            .unwrap();
        assert_eq!(entry.kind, HistoryKind::Lucky);
        assert_eq!(history.latest().map(|e| e.id), Some(entry.id));

        let err = client
            .generate_and_record(Mode::Lucky, &GenerationInput::new(selfie()), "", &mut history)
            .await
            .unwrap_err();
        assert!(matches!(err, StylistError::MissingCredential));
        assert_eq!(history.len(), 1);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_seed_changes_between_calls() {
        let transport = MockTransport::replying(image_reply());
        let client = StylistClient::with_transport(transport.clone(), PreferencePolicy::default());
        let input = GenerationInput::new(selfie());

        for _ in 0..8 {
            client.generate(Mode::Lucky, &input, "key").await.unwrap();
        }

        let requests = transport.requests.lock().unwrap();
        let first = &requests[0]["generationConfig"]["seed"];
        assert!(requests
            .iter()
            .any(|r| &r["generationConfig"]["seed"] != first));
    }
}
