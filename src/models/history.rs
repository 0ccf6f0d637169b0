use crate::models::{EncodedImage, Mode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Swap,
    Lucky,
}

impl From<Mode> for HistoryKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Reference | Mode::Text => HistoryKind::Swap,
            Mode::Lucky => HistoryKind::Lucky,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub image: EncodedImage,
    pub kind: HistoryKind,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(image: EncodedImage, mode: Mode) -> Self {
        Self {
            id: Uuid::new_v4(),
            image,
            kind: mode.into(),
            created_at: Utc::now(),
        }
    }

    /// Suggested file name when the result is saved to disk.
    pub fn file_name(&self) -> String {
        format!(
            "hairstyle-ai-{}.{}",
            self.created_at.timestamp_millis(),
            self.image.extension()
        )
    }
}
