//! Instruction builders for the three generation modes.
//!
//! Each builder is pure: it turns the caller's photos and preferences into
//! an instruction string and the ordered list of images to attach. Required
//! inputs are checked once by the orchestrator before a builder is invoked.

pub mod description;
pub mod lucky;
pub mod reference;

use crate::models::EncodedImage;
use rand::seq::SliceRandom;

pub const STYLIST_PERSONA: &str = "You are an expert hair stylist and photo editor.";

/// Example descriptions offered by "AI suggest".
pub const SUGGESTIONS: [&str; 5] = [
    "Cyberpunk neon bob cut",
    "Classic 50s hollywood waves",
    "Messy bun with loose strands",
    "Spiky platinum blonde punk look",
    "Elegant french braid",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub instruction: String,
    pub attachments: Vec<EncodedImage>,
}

/// Picks one of [`SUGGESTIONS`] at random.
pub fn suggest() -> &'static str {
    SUGGESTIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SUGGESTIONS[0])
}

/// Closing directive shared by every mode.
pub(crate) fn preserve_identity(source: &str) -> String {
    format!(
        "Maintain the person's facial features, identity, skin tone, lighting, and background from {} exactly. Only change the hair.",
        source
    )
}

/// Renders numbered instruction steps under a persona line.
pub(crate) fn numbered(persona: &str, steps: &[String]) -> String {
    let mut out = format!("{}\nInstructions:", persona);
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, step));
    }
    out
}
