//! Lets the model pick a flattering new style for the user's face shape.

use super::{numbered, preserve_identity, Prompt};
use crate::models::{EncodedImage, StyleOptions};

const PERSONA: &str = "You are a world-class hair stylist.";

pub fn build(user: &EncodedImage, options: &StyleOptions) -> Prompt {
    let mut constraints = Vec::new();
    if let Some(color) = options.color() {
        constraints.push(format!("The new style MUST have {} hair color.", color));
    }
    if let Some(length) = options.length() {
        constraints.push(format!("The length MUST be {}.", length));
    }

    let mut steps = vec![
        "Analyze the face shape and features of the person in this image.".to_string(),
        "Generate a NEW, photorealistic image of this person with a brand new hairstyle that perfectly suits their face shape.".to_string(),
    ];
    if !constraints.is_empty() {
        steps.push(constraints.join(" "));
    }
    steps.push(
        "The new style should be trendy and flattering. Make it distinct from the original."
            .to_string(),
    );
    steps.push(preserve_identity("this image"));

    Prompt {
        instruction: numbered(PERSONA, &steps),
        attachments: vec![user.clone()],
    }
}
