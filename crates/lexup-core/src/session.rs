//! Loaded tables plus the request dispatcher used by host integrations.
//!
//! A [`Session`] owns every read-only table and the active settings. Hosts
//! send a [`Request`] and get a [`Response`]; both serialize with an
//! `action` tag so they can cross a JSON boundary unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::lexicon::Lexicon;
use crate::scanner::{WeakWordHit, find_weak_words};
use crate::score::{WritingScore, calculate_writing_score};
use crate::settings::Settings;
use crate::spelling::{MisspelledWord, SpellChecker};
use crate::tone::Tone;
use crate::upgrade::{UpgradeOutcome, upgrade_diff};
use crate::vocabulary::Vocabulary;

/// A host request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    /// Locate weak words.
    Scan {
        /// Text to scan.
        text: String,
    },
    /// Score the text.
    Score {
        /// Text to score.
        text: String,
    },
    /// Rewrite the text with stronger words.
    Upgrade {
        /// Text to rewrite.
        text: String,
        /// Tone override; the session tone when absent.
        #[serde(default)]
        tone: Option<Tone>,
    },
    /// Look up synonyms for one word or phrase.
    Synonyms {
        /// Word or phrase to look up.
        word: String,
        /// Tone override; the session tone when absent.
        #[serde(default)]
        tone: Option<Tone>,
    },
    /// Find misspelled words.
    Spelling {
        /// Text to check.
        text: String,
    },
}

/// Answer to a [`Request`], tagged with the same action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Response {
    /// Weak-word hits, ordered by position.
    Scan {
        /// The hits.
        hits: Vec<WeakWordHit>,
    },
    /// The writing score.
    Score(WritingScore),
    /// The rewritten text and its substitutions.
    Upgrade(UpgradeOutcome),
    /// Synonyms for the requested word.
    Synonyms {
        /// The word looked up.
        word: String,
        /// Tone used for the lookup.
        tone: Tone,
        /// Candidates, preferred first.
        synonyms: Vec<String>,
    },
    /// Misspelled words with suggestions.
    Spelling {
        /// The misspellings, in order of appearance.
        misspelled: Vec<MisspelledWord>,
    },
}

/// Everything needed to serve requests.
#[derive(Debug, Clone)]
pub struct Session {
    lexicon: Lexicon,
    spelling: SpellChecker,
    vocabulary: Vocabulary,
    settings: Settings,
}

impl Session {
    /// Assemble a session from already-loaded parts.
    pub const fn new(
        lexicon: Lexicon,
        spelling: SpellChecker,
        vocabulary: Vocabulary,
        settings: Settings,
    ) -> Self {
        Self {
            lexicon,
            spelling,
            vocabulary,
            settings,
        }
    }

    /// Session over the embedded tables with default settings.
    pub fn builtin() -> Self {
        Self::new(
            Lexicon::builtin(),
            SpellChecker::builtin(),
            Vocabulary::builtin(),
            Settings::default(),
        )
    }

    /// Load tables named in `config`, degrading to empty tables on failure.
    #[tracing::instrument(skip_all)]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Lexicon::load_or_empty(config.synonyms_path.as_deref()),
            SpellChecker::load_or_empty(
                config.dictionary_path.as_deref(),
                config.misspellings_path.as_deref(),
            ),
            Vocabulary::load_or_empty(config.vocabulary_path.as_deref()),
            Settings::from(config),
        )
    }

    /// Replace the active settings.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// The synonym and weak-word tables.
    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The spell checker.
    pub const fn spelling(&self) -> &SpellChecker {
        &self.spelling
    }

    /// The vocabulary catalog.
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The active settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Weak words in `text`.
    pub fn scan(&self, text: &str) -> Vec<WeakWordHit> {
        find_weak_words(&self.lexicon, text)
    }

    /// Writing score for `text`.
    pub fn score(&self, text: &str) -> WritingScore {
        calculate_writing_score(&self.lexicon, text)
    }

    /// Upgrade `text` in `tone`, or the session tone.
    pub fn upgrade(&self, text: &str, tone: Option<Tone>) -> UpgradeOutcome {
        upgrade_diff(&self.lexicon, text, tone.unwrap_or(self.settings.tone))
    }

    /// Synonyms for `word`: the tone-keyed tables first, then the vocabulary catalog.
    pub fn synonyms(&self, word: &str, tone: Option<Tone>) -> Vec<String> {
        let tone = tone.unwrap_or(self.settings.tone);
        let found = self.lexicon.synonyms(word, tone);
        if found.is_empty() {
            self.vocabulary.synonyms_for(word).to_vec()
        } else {
            found.to_vec()
        }
    }

    /// Misspelled words in `text`.
    pub fn check_spelling(&self, text: &str) -> Vec<MisspelledWord> {
        self.spelling.find_misspelled_words(text)
    }

    /// Serve one request.
    #[tracing::instrument(skip_all, fields(action = request.action()))]
    pub fn dispatch(&self, request: Request) -> Response {
        tracing::debug!("dispatching request");
        match request {
            Request::Scan { text } => Response::Scan {
                hits: self.scan(&text),
            },
            Request::Score { text } => Response::Score(self.score(&text)),
            Request::Upgrade { text, tone } => Response::Upgrade(self.upgrade(&text, tone)),
            Request::Synonyms { word, tone } => {
                let tone = tone.unwrap_or(self.settings.tone);
                let synonyms = self.synonyms(&word, Some(tone));
                Response::Synonyms {
                    word,
                    tone,
                    synonyms,
                }
            }
            Request::Spelling { text } => Response::Spelling {
                misspelled: self.check_spelling(&text),
            },
        }
    }
}

impl Request {
    /// The action tag.
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Scan { .. } => "scan",
            Self::Score { .. } => "score",
            Self::Upgrade { .. } => "upgrade",
            Self::Synonyms { .. } => "synonyms",
            Self::Spelling { .. } => "spelling",
        }
    }
}
