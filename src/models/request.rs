use crate::models::EncodedImage;
use serde::{Deserialize, Serialize};

/// One call's worth of input: instruction first, then 1-2 images
/// (user photo first), plus a fresh seed.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub instruction: String,
    pub attachments: Vec<EncodedImage>,
    pub seed: u32,
}

impl GenerationRequest {
    pub fn to_wire(&self) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(self.attachments.len() + 1);
        parts.push(RequestPart::Text {
            text: self.instruction.clone(),
        });
        parts.extend(self.attachments.iter().map(|image| RequestPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            },
        }));

        GenerateContentRequest {
            contents: vec![RequestContent { parts }],
            generation_config: GenerationConfig { seed: self.seed },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub seed: u32,
}
