//! Persisted user preferences and usage counters.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::tone::Tone;

/// User-adjustable preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Tone used when none is given explicitly.
    pub tone: Tone,
    /// Print the highlighted text along with the weak-word list.
    pub auto_highlight: bool,
    /// Report misspellings alongside weak words.
    pub spell_check: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tone: Tone::Formal,
            auto_highlight: true,
            spell_check: true,
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            tone: config.tone,
            auto_highlight: config.auto_highlight,
            spell_check: config.spell_check,
        }
    }
}

impl Settings {
    /// These settings with every field set in `saved` replaced.
    #[must_use]
    pub fn overridden_by(self, saved: &SavedSettings) -> Self {
        Self {
            tone: saved.tone.unwrap_or(self.tone),
            auto_highlight: saved.auto_highlight.unwrap_or(self.auto_highlight),
            spell_check: saved.spell_check.unwrap_or(self.spell_check),
        }
    }
}

/// Preferences saved in the `settings` namespace.
///
/// Unset fields defer to the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedSettings {
    /// Preferred tone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    /// Highlight weak words in scan output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_highlight: Option<bool>,
    /// Report misspellings in scan output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell_check: Option<bool>,
}

impl SavedSettings {
    /// True when no preference is saved.
    pub const fn is_empty(&self) -> bool {
        self.tone.is_none() && self.auto_highlight.is_none() && self.spell_check.is_none()
    }

    /// Take every field set in `other`.
    pub fn merge(&mut self, other: Self) {
        self.tone = other.tone.or(self.tone);
        self.auto_highlight = other.auto_highlight.or(self.auto_highlight);
        self.spell_check = other.spell_check.or(self.spell_check);
    }
}

/// Which counter a replacement touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementKind {
    /// A weak word swapped for a synonym.
    Upgrade,
    /// A misspelling corrected.
    Spelling,
}

/// Running usage counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageStats {
    /// Weak words replaced.
    pub words_upgraded: u64,
    /// Misspellings corrected.
    pub spelling_fixed: u64,
    /// Sessions started.
    pub sessions_count: u64,
    /// Last replacement time.
    pub last_used: Option<DateTime<Utc>>,
}

impl UsageStats {
    /// Count `n` replacements of `kind`.
    pub fn record_replacements(&mut self, kind: ReplacementKind, n: u64, now: DateTime<Utc>) {
        if n == 0 {
            return;
        }
        let counter = self.counter(kind);
        *counter = counter.saturating_add(n);
        self.last_used = Some(now);
    }

    /// Count one replacement of `kind`.
    pub fn record_replacement(&mut self, kind: ReplacementKind, now: DateTime<Utc>) {
        self.record_replacements(kind, 1, now);
    }

    /// Take back one replacement of `kind`, never going below zero.
    pub fn undo_replacement(&mut self, kind: ReplacementKind) {
        let counter = self.counter(kind);
        *counter = counter.saturating_sub(1);
    }

    /// Count a new session.
    pub fn record_session(&mut self) {
        self.sessions_count = self.sessions_count.saturating_add(1);
    }

    /// Replacements of either kind.
    pub const fn total_replacements(&self) -> u64 {
        self.words_upgraded.saturating_add(self.spelling_fixed)
    }

    const fn counter(&mut self, kind: ReplacementKind) -> &mut u64 {
        match kind {
            ReplacementKind::Upgrade => &mut self.words_upgraded,
            ReplacementKind::Spelling => &mut self.spelling_fixed,
        }
    }
}
