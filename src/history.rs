use crate::models::{EncodedImage, HistoryEntry, Mode};
use uuid::Uuid;

/// In-memory list of generated results, newest first. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    latest: Option<Uuid>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` entries, dropping the oldest.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    pub fn push(&mut self, image: EncodedImage, mode: Mode) -> &HistoryEntry {
        let entry = HistoryEntry::new(image, mode);
        log::debug!("Adding {:?} result {} to history", entry.kind, entry.id);

        self.latest = Some(entry.id);
        self.entries.insert(0, entry);
        if let Some(limit) = self.limit {
            self.entries.truncate(limit);
        }
        &self.entries[0]
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.latest == Some(id) {
            self.latest = None;
        }
        self.entries.len() != before
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// The most recent result, unless it has been removed.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.latest.and_then(|id| self.get(id))
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.latest = None;
    }
}
