//! Word list and misspelling table backing the spell checker.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use camino::Utf8Path;

use crate::error::{DataError, DataResult};

const BUILTIN_WORDS: &str = include_str!("../../data/common_words.txt");
const BUILTIN_MISSPELLINGS: &str = include_str!("../../data/misspellings.json");

static BUILTIN: LazyLock<Dictionary> = LazyLock::new(|| {
    let misspellings = parse_misspellings(BUILTIN_MISSPELLINGS).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "built-in misspelling table is invalid; ignoring it");
        BTreeMap::new()
    });
    Dictionary::new(parse_word_list(BUILTIN_WORDS), misspellings)
});

/// Known-good words (in file order) plus a misspelling-to-correction map.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashSet<String>,
    misspellings: BTreeMap<String, String>,
}

impl Dictionary {
    /// Build from a word list and a misspelling table. Keys are lowercased.
    pub fn new(words: Vec<String>, misspellings: BTreeMap<String, String>) -> Self {
        let mut index = HashSet::with_capacity(words.len());
        let words = words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty() && index.insert(w.clone()))
            .collect();
        let misspellings = misspellings
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self {
            words,
            index,
            misspellings,
        }
    }

    /// The embedded default dictionary.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Load the word list and misspelling table, each falling back to the
    /// built-in data when no path is given and to empty data when the file
    /// cannot be used.
    #[tracing::instrument]
    pub fn load_or_empty(words_path: Option<&Utf8Path>, misspellings_path: Option<&Utf8Path>) -> Self {
        let words = match words_path {
            None => BUILTIN.words.clone(),
            Some(path) => read(path).map(|text| parse_word_list(&text)).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "dictionary unavailable; every word will be flagged");
                Vec::new()
            }),
        };
        let misspellings = match misspellings_path {
            None => BUILTIN.misspellings.clone(),
            Some(path) => read(path)
                .and_then(|text| parse_misspellings(&text))
                .unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "misspelling table unavailable");
                    BTreeMap::new()
                }),
        };
        let dictionary = Self::new(words, misspellings);
        tracing::debug!(
            words = dictionary.len(),
            misspellings = dictionary.misspellings.len(),
            "dictionary loaded"
        );
        dictionary
    }

    /// Whether the lowercase `word` is in the word list.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    /// Direct correction for a known misspelling (lowercase key).
    pub fn correction(&self, word: &str) -> Option<&str> {
        self.misspellings.get(word).map(String::as_str)
    }

    /// Dictionary words in file order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of dictionary words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the word list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of entries in the misspelling table.
    pub fn misspelling_count(&self) -> usize {
        self.misspellings.len()
    }
}

fn read(path: &Utf8Path) -> DataResult<String> {
    std::fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// One word per line; blank lines and `#` comments are ignored.
fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn parse_misspellings(json: &str) -> DataResult<BTreeMap<String, String>> {
    serde_json::from_str(json).map_err(|source| DataError::Parse {
        what: "misspelling table",
        source,
    })
}
