//! The learner's saved words.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A word the learner chose to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedWord {
    /// The word as saved.
    pub word: String,
    /// Definition, if one was known when saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// When the word was saved.
    pub added_at: DateTime<Utc>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Saved words, unique ignoring case, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct WordList {
    words: Vec<SavedWord>,
}

impl WordList {
    /// Save `word`. Returns `false` if it is already saved.
    pub fn add(&mut self, word: &str, definition: Option<String>, now: DateTime<Utc>) -> bool {
        let word = word.trim();
        if word.is_empty() || self.contains(word) {
            return false;
        }
        self.words.push(SavedWord {
            word: word.to_string(),
            definition,
            added_at: now,
            notes: None,
        });
        true
    }

    /// Forget `word`. Returns whether it was saved.
    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| !w.word.eq_ignore_ascii_case(word.trim()));
        self.words.len() != before
    }

    /// Whether `word` is saved, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// The saved entry for `word`.
    pub fn get(&self, word: &str) -> Option<&SavedWord> {
        let word = word.trim();
        self.words.iter().find(|w| w.word.eq_ignore_ascii_case(word))
    }

    /// Replace the notes on `word`. Empty notes clear them.
    pub fn update_notes(&mut self, word: &str, notes: &str) -> bool {
        let word = word.trim();
        let Some(entry) = self.words.iter_mut().find(|w| w.word.eq_ignore_ascii_case(word)) else {
            return false;
        };
        let notes = notes.trim();
        entry.notes = (!notes.is_empty()).then(|| notes.to_string());
        true
    }

    /// Saved words in insertion order.
    pub fn words(&self) -> &[SavedWord] {
        &self.words
    }

    /// Number of saved words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Forget every word.
    pub fn clear(&mut self) {
        self.words.clear();
    }
}
