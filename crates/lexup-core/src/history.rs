//! Recent upgrades, newest first.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tone::Tone;

/// Entries kept unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// One saved upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HistoryItem {
    /// Identifier derived from the creation time in milliseconds.
    pub id: String,
    /// Text before upgrading.
    pub original: String,
    /// Text after upgrading.
    pub upgraded: String,
    /// Tone used.
    pub tone: Tone,
    /// When the upgrade was saved.
    pub timestamp: DateTime<Utc>,
    /// Starred by the user.
    #[serde(default)]
    pub favorite: bool,
}

/// Bounded upgrade history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct UpgradeHistory {
    items: Vec<HistoryItem>,
}

impl UpgradeHistory {
    /// Save an upgrade at the front, dropping the oldest entries beyond `limit`.
    pub fn push(
        &mut self,
        original: impl Into<String>,
        upgraded: impl Into<String>,
        tone: Tone,
        now: DateTime<Utc>,
        limit: usize,
    ) -> &HistoryItem {
        let id = self.unique_id(now);
        self.items.insert(
            0,
            HistoryItem {
                id,
                original: original.into(),
                upgraded: upgraded.into(),
                tone,
                timestamp: now,
                favorite: false,
            },
        );
        self.items.truncate(limit.max(1));
        &self.items[0]
    }

    fn unique_id(&self, now: DateTime<Utc>) -> String {
        let base = now.timestamp_millis().to_string();
        if self.get(&base).is_none() {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Entries, newest first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Starred entries, newest first.
    pub fn favorites(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter().filter(|item| item.favorite)
    }

    /// Entry with this id.
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Flip the favorite flag. Returns the new state, or `None` for an unknown id.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.favorite = !item.favorite;
        Some(item.favorite)
    }

    /// Delete an entry. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
