use crate::{
    error::{Result, StylistError},
    models::{EncodedImage, ParsedResponse, ResponsePart},
};

/// Pulls the result image out of a reply.
///
/// Only the first candidate is considered. Its first image part wins; failing
/// that, its first text part is reported as a refusal; failing that, the
/// reply is treated as empty.
pub fn extract(response: ParsedResponse) -> Result<EncodedImage> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(StylistError::NoCandidates)?;

    let mut refusal = None;
    for part in candidate.parts {
        match part {
            ResponsePart::Image(image) => return Ok(image),
            ResponsePart::Text(text) => {
                refusal.get_or_insert(text);
            }
            ResponsePart::Other => {}
        }
    }

    match refusal {
        Some(text) => {
            log::warn!("Model answered with text instead of an image");
            Err(StylistError::ModelRefusal(text))
        }
        None => {
            if let Some(reason) = candidate.finish_reason {
                log::warn!("Empty candidate, finish reason: {}", reason);
            }
            Err(StylistError::EmptyResponse)
        }
    }
}
