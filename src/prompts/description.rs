//! Applies a hairstyle described in free text.

use super::{numbered, preserve_identity, Prompt, STYLIST_PERSONA};
use crate::models::{EncodedImage, StyleOptions};

pub const KEEP_ORIGINAL_COLOR: &str = "Maintain the original hair color from the provided image.";

/// `description` must be non-blank; the orchestrator enforces this.
pub fn build(user: &EncodedImage, description: &str, options: &StyleOptions) -> Prompt {
    let description = description.trim();
    let mut details = Vec::new();

    match options.color() {
        Some(color) => details.push(format!("The hair color MUST be {}.", color)),
        None => details.push(KEEP_ORIGINAL_COLOR.to_string()),
    }

    // Without a length preference the model decides whether the
    // description implies a change.
    match options.length() {
        Some(length) => details.push(format!("The hair length MUST be {}.", length)),
        None => details.push(format!(
            "Maintain the original hair length unless the prompt \"{}\" explicitly implies a different length.",
            description
        )),
    }

    let steps = vec![
        "Identify the person in the provided image.".to_string(),
        format!(
            "Generate a NEW, photorealistic image of this person wearing the hairstyle described as: \"{}\".",
            description
        ),
        details.join(" "),
        preserve_identity("the original image"),
    ];

    Prompt {
        instruction: numbered(STYLIST_PERSONA, &steps),
        attachments: vec![user.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_quoted() {
        let user = EncodedImage::new("image/jpeg", "USER");
        let prompt = build(&user, "  Messy bun ", &StyleOptions::new());
        assert!(prompt
            .instruction
            .contains("wearing the hairstyle described as: \"Messy bun\"."));
        assert!(prompt.instruction.contains(KEEP_ORIGINAL_COLOR));
        assert!(prompt
            .instruction
            .contains("unless the prompt \"Messy bun\" explicitly implies a different length."));
        assert_eq!(prompt.attachments, vec![user]);
    }

    #[test]
    fn test_overrides_are_hard_constraints() {
        let user = EncodedImage::new("image/jpeg", "USER");
        let options = StyleOptions::new().with_color("copper").with_length("Long");
        let prompt = build(&user, "waves", &options);
        assert!(prompt.instruction.contains("The hair color MUST be copper."));
        assert!(prompt.instruction.contains("The hair length MUST be Long."));
        assert!(!prompt.instruction.contains(KEEP_ORIGINAL_COLOR));
        assert!(!prompt.instruction.contains("Maintain the original hair length"));
    }
}
