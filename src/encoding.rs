use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use std::path::Path;

/// Type assumed for inbound payloads without a `data:` prefix.
pub const DEFAULT_INPUT_TYPE: &str = "image/jpeg";
/// Type assumed for response images that carry no mime type.
pub const DEFAULT_RESPONSE_TYPE: &str = "image/png";
/// Extension used when a mime type has no known one.
pub const DEFAULT_EXTENSION: &str = "png";
/// Seeds are drawn from `0..SEED_RANGE`.
pub const SEED_RANGE: u32 = 1_000_000_000;

static DATA_URI_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:([a-zA-Z0-9]+/[a-zA-Z0-9\-.+]+).*,.*").expect("data URI pattern is valid")
});

/// Returns the part after the first `,` of a `data:` URI, or the input
/// unchanged when there is no (non-empty) such part.
pub fn strip_envelope(payload: &str) -> &str {
    payload
        .split(',')
        .nth(1)
        .filter(|raw| !raw.is_empty())
        .unwrap_or(payload)
}

pub fn detect_type(payload: &str) -> &str {
    DATA_URI_TYPE
        .captures(payload)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_INPUT_TYPE)
}

/// Type of an image read from disk: magic bytes first, then the file
/// extension, then [`DEFAULT_INPUT_TYPE`].
pub fn guess_type(bytes: &[u8], path: &Path) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_INPUT_TYPE)
        .to_string()
}

/// File extension for a mime type, preferring the one named by its subtype.
pub fn extension_for(mime_type: &str) -> &'static str {
    let subtype = mime_type.split('/').nth(1).unwrap_or_default();
    mime_guess::get_mime_extensions_str(mime_type)
        .and_then(|exts| {
            exts.iter()
                .find(|ext| **ext == subtype)
                .or_else(|| exts.first())
                .copied()
        })
        .unwrap_or(DEFAULT_EXTENSION)
}

pub fn random_seed() -> u32 {
    rand::thread_rng().gen_range(0..SEED_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_envelope() {
        assert_eq!(strip_envelope("data:image/png;base64,iVBORw0K"), "iVBORw0K");
        assert_eq!(strip_envelope("iVBORw0K"), "iVBORw0K");
        assert_eq!(strip_envelope("data:image/png;base64,"), "data:image/png;base64,");
        assert_eq!(strip_envelope(""), "");
    }

    #[test]
    fn test_detect_type() {
        assert_eq!(detect_type("data:image/png;base64,iVBORw0K"), "image/png");
        assert_eq!(detect_type("data:image/svg+xml;base64,PHN2Zz4="), "image/svg+xml");
        assert_eq!(detect_type("/9j/4AAQSkZJRgABAQ"), "image/jpeg");
        assert_eq!(detect_type("data:nonsense"), "image/jpeg");
    }

    #[test]
    fn test_envelope_round_trip() {
        for uri in [
            "data:image/png;base64,iVBORw0KGgo=",
            "data:image/jpeg;base64,/9j/4AAQSkZJRg==",
            "data:image/webp;base64,UklGRiQAAABXRUJQ",
        ] {
            let rebuilt = format!("data:{};base64,{}", detect_type(uri), strip_envelope(uri));
            assert_eq!(rebuilt, uri);
        }
    }

    #[test]
    fn test_guess_type_prefers_content() {
        let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0x0d];
        assert_eq!(guess_type(&png, Path::new("selfie.jpg")), "image/png");

        let jpeg = [0xff, 0xd8, 0xff, 0xe0, 0, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(guess_type(&jpeg, Path::new("selfie")), "image/jpeg");
    }

    #[test]
    fn test_guess_type_falls_back_to_extension() {
        let unknown = b"plain text, no magic";
        assert_eq!(guess_type(unknown, Path::new("selfie.webp")), "image/webp");
        assert_eq!(guess_type(unknown, Path::new("selfie.bmp")), "image/bmp");
        assert_eq!(guess_type(unknown, Path::new("selfie")), "image/jpeg");
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/webp"), "webp");
        assert_eq!(extension_for("image/jpeg"), "jpeg");
        assert_eq!(extension_for("image/x-made-up"), "png");
    }

    #[test]
    fn test_random_seed_varies() {
        let seeds: Vec<u32> = (0..16).map(|_| random_seed()).collect();
        assert!(seeds.iter().all(|s| *s < SEED_RANGE));
        assert!(seeds.iter().any(|s| *s != seeds[0]));
    }
}
