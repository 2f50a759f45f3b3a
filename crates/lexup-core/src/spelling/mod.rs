//! Dictionary-backed spell checking with edit-distance suggestions.
//!
//! A word is checked against the misspelling table first, then against the
//! dictionary. Suggestions put the known correction first and fill the rest
//! with the closest dictionary words by Levenshtein distance.

mod dictionary;
mod distance;

use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use dictionary::Dictionary;
pub use distance::{bounded_levenshtein, levenshtein};

/// Maximum number of suggestions returned for one word.
pub const MAX_SUGGESTIONS: usize = 6;

/// Maximum number of dictionary neighbours considered.
const MAX_SIMILAR: usize = 5;

/// Candidates whose length differs by more than this are never compared.
const MAX_LENGTH_DIFF: usize = 2;

/// Upper bound on the accepted edit distance.
const MAX_DISTANCE: usize = 3;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z'-]+\b").expect("valid regex"));

/// A word flagged by [`SpellChecker::find_misspelled_words`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MisspelledWord {
    /// The word as written.
    pub word: String,
    /// Byte offset in the checked text.
    pub index: usize,
    /// Byte length of the word.
    pub length: usize,
    /// Suggested corrections, best first.
    pub suggestions: Vec<String>,
}

/// Spell checker over a [`Dictionary`].
#[derive(Debug, Clone, Default)]
pub struct SpellChecker {
    dictionary: Dictionary,
}

impl SpellChecker {
    /// Wrap an existing dictionary.
    pub const fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    /// Checker over the embedded word list and misspelling table.
    pub fn builtin() -> Self {
        Self::new(Dictionary::builtin())
    }

    /// Checker over optional on-disk overrides. See [`Dictionary::load_or_empty`].
    pub fn load_or_empty(words_path: Option<&Utf8Path>, misspellings_path: Option<&Utf8Path>) -> Self {
        Self::new(Dictionary::load_or_empty(words_path, misspellings_path))
    }

    /// The underlying dictionary.
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Whether `word` is considered correctly spelled.
    ///
    /// Very short words, numbers, and anything containing characters other
    /// than ASCII letters, apostrophes, and hyphens are never flagged.
    pub fn is_correctly_spelled(&self, word: &str) -> bool {
        if is_exempt(word) {
            return true;
        }
        let lower = word.to_lowercase();
        if self.dictionary.correction(&lower).is_some() {
            return false;
        }
        self.dictionary.contains(&lower)
    }

    /// Up to [`MAX_SUGGESTIONS`] corrections for `word`, best first.
    pub fn spelling_suggestions(&self, word: &str) -> Vec<String> {
        let lower = word.to_lowercase();
        let mut suggestions: Vec<String> = Vec::new();

        if let Some(fix) = self.dictionary.correction(&lower) {
            suggestions.push(fix.to_string());
        }
        for similar in self.similar_words(&lower) {
            if !suggestions.iter().any(|s| s == similar) {
                suggestions.push(similar.to_string());
            }
        }
        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }

    /// Every misspelled word in `text`, in order of appearance.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn find_misspelled_words(&self, text: &str) -> Vec<MisspelledWord> {
        let found: Vec<MisspelledWord> = WORD_RE
            .find_iter(text)
            .filter(|m| !self.is_correctly_spelled(m.as_str()))
            .map(|m| MisspelledWord {
                word: m.as_str().to_string(),
                index: m.start(),
                length: m.len(),
                suggestions: self.spelling_suggestions(m.as_str()),
            })
            .collect();
        tracing::debug!(misspelled = found.len(), "spell check complete");
        found
    }

    /// Dictionary words within edit distance of `lower`, closest first.
    ///
    /// Ties keep dictionary order.
    fn similar_words<'a>(&'a self, lower: &str) -> Vec<&'a str> {
        let len = lower.chars().count();
        let max_distance = MAX_DISTANCE.min(len / 2);
        if max_distance == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<(usize, &str)> = self
            .dictionary
            .words()
            .filter(|candidate| candidate.chars().count().abs_diff(len) <= MAX_LENGTH_DIFF)
            .filter_map(|candidate| {
                bounded_levenshtein(lower, candidate, max_distance)
                    .filter(|&d| d > 0)
                    .map(|d| (d, candidate))
            })
            .collect();
        candidates.sort_by_key(|&(d, _)| d);
        candidates
            .into_iter()
            .take(MAX_SIMILAR)
            .map(|(_, word)| word)
            .collect()
    }
}

fn is_exempt(word: &str) -> bool {
    word.chars().count() < 2
        || word.chars().all(|c| c.is_ascii_digit())
        || word
            .chars()
            .any(|c| !(c.is_ascii_alphabetic() || c == '\'' || c == '-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn checker(words: &[&str], typos: &[(&str, &str)]) -> SpellChecker {
        SpellChecker::new(Dictionary::new(
            words.iter().map(|w| (*w).to_string()).collect(),
            typos
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
        ))
    }

    #[test]
    fn teh_is_misspelled() {
        let spell = SpellChecker::builtin();
        assert!(!spell.is_correctly_spelled("teh"));
        assert_eq!(spell.spelling_suggestions("teh")[0], "the");
    }

    #[test]
    fn dictionary_words_pass() {
        let spell = SpellChecker::builtin();
        assert!(spell.is_correctly_spelled("the"));
        assert!(spell.is_correctly_spelled("The"));
        assert!(spell.is_correctly_spelled("receive"));
    }

    #[test]
    fn exempt_tokens_pass() {
        let spell = SpellChecker::builtin();
        assert!(spell.is_correctly_spelled("x"));
        assert!(spell.is_correctly_spelled("2024"));
        assert!(spell.is_correctly_spelled("naïve"));
        assert!(spell.is_correctly_spelled("foo_bar"));
        assert!(spell.is_correctly_spelled("v2"));
    }

    #[test]
    fn unknown_words_are_flagged() {
        assert!(!SpellChecker::builtin().is_correctly_spelled("qwzzkx"));
    }

    #[test]
    fn empty_dictionary_flags_everything_checkable() {
        let spell = checker(&[], &[]);
        assert!(!spell.is_correctly_spelled("hello"));
        assert!(spell.is_correctly_spelled("a"));
        assert!(spell.spelling_suggestions("hello").is_empty());
    }

    #[test]
    fn misspelling_table_wins_over_dictionary() {
        let spell = checker(&["alot"], &[("alot", "a lot")]);
        assert!(!spell.is_correctly_spelled("alot"));
    }

    #[test]
    fn suggestions_sorted_by_distance_then_dictionary_order() {
        let spell = checker(&["coat", "cart", "bat", "cat", "at"], &[]);
        let suggestions = spell.spelling_suggestions("cazt");
        assert_eq!(suggestions, ["cart", "cat", "coat", "bat", "at"]);
    }

    #[test]
    fn correction_comes_first_and_is_not_repeated() {
        let spell = checker(&["receive", "deceive", "relieve"], &[("recieve", "receive")]);
        let suggestions = spell.spelling_suggestions("recieve");
        assert_eq!(suggestions[0], "receive");
        assert_eq!(suggestions.iter().filter(|s| *s == "receive").count(), 1);
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
    }

    #[test]
    fn suggestions_respect_distance_bounds() {
        let spell = checker(&["ab", "abc", "abcd", "abcdef", "abcdefgh"], &[]);
        // len 3 allows distance 1 only, and never the word itself.
        let suggestions = spell.spelling_suggestions("abd");
        assert_eq!(suggestions, ["ab", "abc", "abcd"]);
    }

    #[test]
    fn at_most_six_suggestions() {
        let spell = SpellChecker::builtin();
        for word in ["recieve", "definately", "seperate", "wierd"] {
            assert!(spell.spelling_suggestions(word).len() <= MAX_SUGGESTIONS);
        }
    }

    #[test]
    fn finds_misspelled_words_with_offsets() {
        let spell = SpellChecker::builtin();
        let text = "We will recieve teh letter today.";
        let found = spell.find_misspelled_words(text);
        let words: Vec<&str> = found.iter().map(|m| m.word.as_str()).collect();
        assert_eq!(words, ["recieve", "teh"]);
        for m in &found {
            assert_eq!(&text[m.index..m.index + m.length], m.word);
            assert!(!m.suggestions.is_empty());
        }
        assert_eq!(found[0].suggestions[0], "receive");
    }

    #[test]
    fn clean_text_has_no_misspellings() {
        let spell = SpellChecker::builtin();
        assert!(spell.find_misspelled_words("").is_empty());
        assert!(spell.find_misspelled_words("We have a good day.").is_empty());
    }
}
