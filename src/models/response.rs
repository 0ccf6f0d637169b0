use crate::encoding::DEFAULT_RESPONSE_TYPE;
use crate::models::EncodedImage;
use serde::Deserialize;

// Raw `generateContent` reply. Every field is optional because the remote
// side omits whatever it did not produce.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<RawCandidate>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidate {
    #[serde(default)]
    pub content: Option<RawContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    pub parts: Option<Vec<RawPart>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<RawInlineData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

/// A response part after boundary parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    Image(EncodedImage),
    Text(String),
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub parts: Vec<ResponsePart>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    pub candidates: Vec<Candidate>,
}

impl From<RawPart> for ResponsePart {
    fn from(part: RawPart) -> Self {
        if let Some(inline) = part.inline_data {
            if let Some(data) = inline.data.filter(|d| !d.is_empty()) {
                let mime_type = inline
                    .mime_type
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_RESPONSE_TYPE.to_string());
                return ResponsePart::Image(EncodedImage::new(mime_type, data));
            }
        }

        match part.text {
            Some(text) if !text.is_empty() => ResponsePart::Text(text),
            _ => ResponsePart::Other,
        }
    }
}

impl From<RawCandidate> for Candidate {
    fn from(candidate: RawCandidate) -> Self {
        let parts = candidate
            .content
            .and_then(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .map(ResponsePart::from)
            .collect();

        Candidate {
            parts,
            finish_reason: candidate.finish_reason,
        }
    }
}

impl From<GenerateContentResponse> for ParsedResponse {
    fn from(response: GenerateContentResponse) -> Self {
        ParsedResponse {
            candidates: response
                .candidates
                .unwrap_or_default()
                .into_iter()
                .map(Candidate::from)
                .collect(),
        }
    }
}

impl ParsedResponse {
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        let raw: GenerateContentResponse = serde_json::from_value(value)?;
        Ok(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parts_are_classified() {
        let parsed = ParsedResponse::from_value(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here you go" },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "AAAA" } },
                    { "inline_data": { "data": "BBBB" } },
                    { "inlineData": { "mimeType": "image/png", "data": "" } },
                    { "text": "" }
                ]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let candidate = &parsed.candidates[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(
            candidate.parts,
            vec![
                ResponsePart::Text("Here you go".to_string()),
                ResponsePart::Image(EncodedImage::new("image/jpeg", "AAAA")),
                ResponsePart::Image(EncodedImage::new("image/png", "BBBB")),
                ResponsePart::Other,
                ResponsePart::Other,
            ]
        );
    }

    #[test]
    fn test_missing_fields_parse_as_empty() {
        let parsed = ParsedResponse::from_value(json!({})).unwrap();
        assert!(parsed.candidates.is_empty());

        let parsed = ParsedResponse::from_value(json!({ "candidates": [{}] })).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert!(parsed.candidates[0].parts.is_empty());
    }
}
