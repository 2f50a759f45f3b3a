//! Core library for lexup.
//!
//! Finds weak words in prose, scores writing by weak-word density, rewrites
//! text with tone-appropriate synonyms, checks spelling, and tracks
//! vocabulary practice with a spaced-repetition schedule.
//!
//! # Modules
//!
//! - [`lexicon`] - Tone-keyed synonym tables and the weak-word set
//! - [`scanner`] - Weak-word detection with byte offsets
//! - [`score`] - Writing score from weak-word density
//! - [`upgrade`] - Tone-aware text rewriting
//! - [`spelling`] - Dictionary spell checking with edit-distance suggestions
//! - [`vocabulary`] - Study-word catalog
//! - [`progress`] - Spaced-repetition scheduling and statistics
//! - [`quiz`] - Multiple-choice definition quizzes
//! - [`history`], [`word_list`], [`settings`] - Per-user lists and counters
//! - [`store`] - Namespaced JSON persistence
//! - [`session`] - Loaded tables and the request dispatcher
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use lexup_core::{Lexicon, Tone, calculate_writing_score, upgrade_text};
//!
//! let lexicon = Lexicon::builtin();
//! let report = calculate_writing_score(&lexicon, "This is a very good idea.");
//! assert!(report.score < 100);
//!
//! let better = upgrade_text(&lexicon, "Good job", Tone::Formal);
//! assert_eq!(better, "Excellent job");
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod history;
pub mod lexicon;
pub mod progress;
pub mod quiz;
pub mod scanner;
pub mod score;
pub mod session;
pub mod settings;
pub mod spelling;
pub mod store;
pub mod tone;
pub mod upgrade;
pub mod vocabulary;
pub mod word_list;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, DataError, DataResult, StoreError, StoreResult};
pub use lexicon::Lexicon;
pub use scanner::{WeakWordHit, find_weak_words};
pub use score::{WritingScore, calculate_writing_score};
pub use session::{Request, Response, Session};
pub use spelling::{MisspelledWord, SpellChecker};
pub use tone::Tone;
pub use upgrade::{Replacement, UpgradeOutcome, upgrade_diff, upgrade_text};
pub use vocabulary::{Category, Level, Vocabulary, VocabularyWord};
