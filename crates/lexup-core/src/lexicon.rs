//! Tone-keyed synonym tables and the weak-word set.
//!
//! The built-in table is embedded from `data/synonyms.json`. A replacement
//! table with the same shape can be loaded from disk; a missing or broken
//! file degrades to an empty lexicon so lookups simply return nothing.
//!
//! Matching patterns for weak words and phrases are compiled once when the
//! lexicon is built and shared by the scanner and the upgrader.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{DataError, DataResult};
use crate::tone::Tone;

/// Embedded default synonym table.
const BUILTIN_SYNONYMS: &str = include_str!("../data/synonyms.json");

static BUILTIN: LazyLock<Lexicon> =
    LazyLock::new(|| Lexicon::from_json_str(BUILTIN_SYNONYMS).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "built-in synonym table is invalid; using empty lexicon");
        Lexicon::empty()
    }));

/// Candidate replacements for one word or phrase, keyed by tone.
///
/// Every list present is non-empty; empty lists are dropped at load time so
/// lookups fall through to the formal list.
pub type ToneSynonyms = BTreeMap<Tone, Vec<String>>;

/// On-disk shape of the synonym table.
#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    words: BTreeMap<String, BTreeMap<Tone, Vec<String>>>,
    #[serde(default)]
    phrases: BTreeMap<String, BTreeMap<Tone, Vec<String>>>,
    #[serde(default, rename = "weakWords")]
    weak_words: Vec<String>,
}

/// A weak word with its compiled word-boundary pattern.
#[derive(Debug, Clone)]
pub(crate) struct WeakPattern {
    pub(crate) word: String,
    pub(crate) regex: Regex,
}

/// A phrase key with its compiled plain-substring pattern.
#[derive(Debug, Clone)]
pub(crate) struct PhrasePattern {
    pub(crate) phrase: String,
    pub(crate) regex: Regex,
}

/// Read-only synonym and weak-word tables.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    version: u32,
    words: BTreeMap<String, ToneSynonyms>,
    phrases: BTreeMap<String, ToneSynonyms>,
    weak_words: Vec<String>,
    weak_set: HashSet<String>,
    weak_patterns: Vec<WeakPattern>,
    /// Indices into `weak_patterns`, longest word first (stable).
    upgrade_order: Vec<usize>,
    phrase_patterns: Vec<PhrasePattern>,
}

impl Lexicon {
    /// An empty lexicon: no synonyms, no weak words.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The embedded default lexicon.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Parse a lexicon from JSON text.
    pub fn from_json_str(json: &str) -> DataResult<Self> {
        let raw: RawTable = serde_json::from_str(json).map_err(|source| DataError::Parse {
            what: "synonym table",
            source,
        })?;
        Ok(Self::from_raw(raw))
    }

    /// Read and parse a lexicon file.
    pub fn from_path(path: &Utf8Path) -> DataResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load from `path`, or the built-in table when `path` is `None`.
    ///
    /// Any read or parse failure is logged and yields an empty lexicon.
    #[tracing::instrument]
    pub fn load_or_empty(path: Option<&Utf8Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match Self::from_path(path) {
            Ok(lexicon) => {
                tracing::debug!(
                    words = lexicon.words.len(),
                    weak_words = lexicon.weak_words.len(),
                    "synonym table loaded"
                );
                lexicon
            }
            Err(err) => {
                tracing::warn!(error = %err, "synonym table unavailable; suggestions disabled");
                Self::empty()
            }
        }
    }

    fn from_raw(raw: RawTable) -> Self {
        let words = normalize_entries(raw.words);
        let phrases = normalize_entries(raw.phrases);

        let mut weak_words = Vec::new();
        let mut weak_set = HashSet::new();
        for w in raw.weak_words {
            let w = w.trim().to_lowercase();
            if !w.is_empty() && weak_set.insert(w.clone()) {
                weak_words.push(w);
            }
        }

        let weak_patterns: Vec<WeakPattern> = weak_words
            .iter()
            .filter_map(|w| {
                compile(&format!(r"\b{}\b", regex::escape(w))).map(|regex| WeakPattern {
                    word: w.clone(),
                    regex,
                })
            })
            .collect();

        let mut upgrade_order: Vec<usize> = (0..weak_patterns.len()).collect();
        upgrade_order.sort_by_key(|&i| std::cmp::Reverse(weak_patterns[i].word.chars().count()));

        let phrase_patterns = phrases
            .keys()
            .filter_map(|p| {
                compile(&regex::escape(p)).map(|regex| PhrasePattern {
                    phrase: p.clone(),
                    regex,
                })
            })
            .collect();

        Self {
            version: raw.version,
            words,
            phrases,
            weak_words,
            weak_set,
            weak_patterns,
            upgrade_order,
            phrase_patterns,
        }
    }

    /// Data format version declared by the table (0 if absent).
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Whether the lexicon has no words, phrases, or weak words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.phrases.is_empty() && self.weak_words.is_empty()
    }

    /// Synonyms for a single word in `tone`, falling back to formal.
    pub fn synonyms_for_word(&self, word: &str, tone: Tone) -> &[String] {
        lookup(&self.words, word, tone)
    }

    /// Synonyms for a multi-word phrase in `tone`, falling back to formal.
    pub fn synonyms_for_phrase(&self, phrase: &str, tone: Tone) -> &[String] {
        lookup(&self.phrases, phrase, tone)
    }

    /// Synonyms for a word, or for a phrase if the word table has none.
    pub fn synonyms(&self, word: &str, tone: Tone) -> &[String] {
        let found = self.synonyms_for_word(word, tone);
        if found.is_empty() {
            self.synonyms_for_phrase(word, tone)
        } else {
            found
        }
    }

    /// Every tone list registered for `word` (word table first, then phrases).
    pub fn entry(&self, word: &str) -> Option<&ToneSynonyms> {
        let key = word.trim().to_lowercase();
        self.words.get(&key).or_else(|| self.phrases.get(&key))
    }

    /// Weak words in declaration order.
    pub fn weak_words(&self) -> &[String] {
        &self.weak_words
    }

    /// Whether `word` (any case, surrounding whitespace ignored) is weak.
    pub fn is_weak_word(&self, word: &str) -> bool {
        self.weak_set.contains(&word.trim().to_lowercase())
    }

    /// Words that have synonym entries, alphabetically.
    pub fn available_words(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    /// Phrases that have synonym entries, alphabetically.
    pub fn available_phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.keys().map(String::as_str)
    }

    pub(crate) fn weak_patterns(&self) -> &[WeakPattern] {
        &self.weak_patterns
    }

    pub(crate) fn weak_patterns_longest_first(&self) -> impl Iterator<Item = &WeakPattern> {
        self.upgrade_order.iter().map(|&i| &self.weak_patterns[i])
    }

    pub(crate) fn phrase_patterns(&self) -> &[PhrasePattern] {
        &self.phrase_patterns
    }
}

fn lookup<'a>(table: &'a BTreeMap<String, ToneSynonyms>, word: &str, tone: Tone) -> &'a [String] {
    let key = word.trim().to_lowercase();
    table
        .get(&key)
        .and_then(|entry| entry.get(&tone).or_else(|| entry.get(&Tone::Formal)))
        .map_or(&[], Vec::as_slice)
}

fn normalize_entries(
    raw: BTreeMap<String, BTreeMap<Tone, Vec<String>>>,
) -> BTreeMap<String, ToneSynonyms> {
    raw.into_iter()
        .filter_map(|(key, tones)| {
            let key = key.trim().to_lowercase();
            let tones: ToneSynonyms = tones
                .into_iter()
                .map(|(tone, list)| {
                    let list: Vec<String> = list
                        .into_iter()
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                    (tone, list)
                })
                .filter(|(_, list)| !list.is_empty())
                .collect();
            (!key.is_empty() && !tones.is_empty()).then_some((key, tones))
        })
        .collect()
}

fn compile(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::warn!(pattern, error = %err, "skipping unmatchable lexicon entry");
            None
        }
    }
}
