//! Copies the hairstyle of a reference photo onto the user.
//!
//! Requires both the user photo and the reference photo. Without a colour
//! preference the user's own colour is kept, so the reference colour does
//! not bleed through. Without a length preference the reference governs.

use super::{numbered, preserve_identity, Prompt, STYLIST_PERSONA};
use crate::models::{EncodedImage, StyleOptions};

pub const KEEP_USER_COLOR: &str = "IMPORTANT: Keep the hair color of the person in the FIRST image (the user), DO NOT use the color from the second image unless it is critical to the style structure.";

pub fn build(user: &EncodedImage, style: &EncodedImage, options: &StyleOptions) -> Prompt {
    let mut style_step =
        "Identify the hairstyle in the SECOND image and apply it to the person in the FIRST image."
            .to_string();

    match options.color() {
        Some(color) => {
            style_step.push_str(&format!(" IMPORTANT: Change the hair color to {}.", color))
        }
        None => {
            style_step.push(' ');
            style_step.push_str(KEEP_USER_COLOR);
        }
    }

    if let Some(length) = options.length() {
        style_step.push_str(&format!(
            " IMPORTANT: Adjust the hair length to be {}.",
            length
        ));
    }

    let steps = vec![
        "Identify the person in the FIRST image.".to_string(),
        style_step,
        "Generate a NEW, photorealistic image.".to_string(),
        preserve_identity("the first image"),
        "Make sure the result looks different from previous generations if called multiple times."
            .to_string(),
    ];

    Prompt {
        instruction: numbered(STYLIST_PERSONA, &steps),
        attachments: vec![user.clone(), style.clone()],
    }
}
