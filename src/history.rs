use serde::{Deserialize, Serialize};

/// Maximum number of retained evaluations.
pub const HISTORY_CAP: usize = 5;

/// One committed evaluation: the expression exactly as it was typed,
/// display glyphs included, and its numeric result. Never mutated after
/// creation and only ever created for expressions that evaluated cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expr: String,
    pub result: f64,
}

/// Bounded log of past evaluations, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Default::default()
    }

    /// Restores a log from persisted entries, dropping anything past the
    /// cap in case the stored state was written by a different build.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut history = History { entries };
        history.entries.truncate(HISTORY_CAP);
        history
    }

    /// Records one evaluation at the front, evicting the oldest entry when
    /// the log is full.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAP);
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
}
