use crate::encoding::{detect_type, extension_for, guess_type, strip_envelope};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base64 image payload plus its mime type. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String, // Base64 encoded
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Normalizes a raw base64 string or a `data:` URI into bytes + type tag.
    pub fn parse(payload: &str) -> Self {
        Self {
            mime_type: detect_type(payload).to_string(),
            data: strip_envelope(payload).to_string(),
        }
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Encodes file contents, detecting the type from the bytes or the path.
    pub fn from_file_bytes(bytes: &[u8], path: &Path) -> Self {
        Self::from_bytes(bytes, guess_type(bytes, path))
    }

    pub fn decode(&self) -> std::result::Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.data.trim())
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn is_empty(&self) -> bool {
        self.data.trim().is_empty()
    }

    pub fn extension(&self) -> &'static str {
        extension_for(&self.mime_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_uri() {
        let image = EncodedImage::parse("data:image/webp;base64,UklGRg==");
        assert_eq!(image.mime_type, "image/webp");
        assert_eq!(image.data, "UklGRg==");
        assert_eq!(image.extension(), "webp");
        assert_eq!(image.to_data_uri(), "data:image/webp;base64,UklGRg==");
    }

    #[test]
    fn test_parse_bare_base64_defaults_to_jpeg() {
        let image = EncodedImage::parse("/9j/4AAQSkZJRg==");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "/9j/4AAQSkZJRg==");
    }

    #[test]
    fn test_bytes_survive_encoding() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0d, 0x0a];
        let image = EncodedImage::from_bytes(&bytes, "image/png");
        assert_eq!(image.decode().unwrap(), bytes.to_vec());
        assert!(!image.is_empty());
    }

    #[test]
    fn test_from_file_bytes_detects_type() {
        let gif = b"GIF89a\x01\x00\x01\x00";
        let image = EncodedImage::from_file_bytes(gif, Path::new("selfie.jpg"));
        assert_eq!(image.mime_type, "image/gif");
        assert_eq!(image.extension(), "gif");
    }
}
