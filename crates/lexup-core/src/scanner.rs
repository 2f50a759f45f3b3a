//! Weak-word detection.
//!
//! Every weak word (single token or phrase) is matched case-insensitively on
//! word boundaries. Hits from different weak words are merged and ordered by
//! position; when one weak word sits inside another's span both hits are kept.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;

/// One occurrence of a weak word in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeakWordHit {
    /// The matched text, in its original case.
    pub word: String,
    /// Byte offset of the match in the input.
    pub index: usize,
    /// Byte length of the match.
    pub length: usize,
}

impl WeakWordHit {
    /// Byte offset one past the end of the match.
    pub const fn end(&self) -> usize {
        self.index + self.length
    }
}

/// Find every weak word in `text`, ordered by position.
///
/// Ties at the same offset keep the lexicon's weak-word order.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn find_weak_words(lexicon: &Lexicon, text: &str) -> Vec<WeakWordHit> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<WeakWordHit> = lexicon
        .weak_patterns()
        .iter()
        .flat_map(|pattern| pattern.regex.find_iter(text))
        .map(|m| WeakWordHit {
            word: m.as_str().to_string(),
            index: m.start(),
            length: m.len(),
        })
        .collect();

    found.sort_by_key(|hit| hit.index);
    tracing::debug!(hits = found.len(), "weak word scan complete");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon(weak: &[&str]) -> Lexicon {
        let json = serde_json::json!({ "weakWords": weak }).to_string();
        Lexicon::from_json_str(&json).unwrap()
    }

    #[test]
    fn empty_text_has_no_hits() {
        assert!(find_weak_words(&Lexicon::builtin(), "").is_empty());
    }

    #[test]
    fn finds_and_orders_hits() {
        let hits = find_weak_words(
            &Lexicon::builtin(),
            "This is a very good and really important idea.",
        );
        let words: Vec<&str> = hits.iter().map(|h| h.word.as_str()).collect();
        assert_eq!(words, ["very", "good", "really", "important"]);
        assert!(hits.windows(2).all(|w| w[0].index <= w[1].index));
    }

    #[test]
    fn preserves_original_case_and_offsets() {
        let text = "Really? It was VERY nice.";
        let hits = find_weak_words(&Lexicon::builtin(), text);
        assert_eq!(hits[0].word, "Really");
        assert_eq!(hits[0].index, 0);
        assert_eq!(hits[1].word, "VERY");
        assert_eq!(&text[hits[1].index..hits[1].end()], "VERY");
        assert_eq!(hits[2].word, "nice");
    }

    #[test]
    fn every_hit_is_a_weak_word() {
        let lexicon = Lexicon::builtin();
        let hits = find_weak_words(
            &lexicon,
            "Basically the stuff was kind of Great, but A LOT of things were bad.",
        );
        assert!(!hits.is_empty());
        for hit in &hits {
            assert!(lexicon.is_weak_word(&hit.word), "{} is not weak", hit.word);
        }
    }

    #[test]
    fn respects_word_boundaries() {
        let lexicon = lexicon(&["thing", "just"]);
        assert!(find_weak_words(&lexicon, "Nothing about justice or somethings.").is_empty());
        assert_eq!(find_weak_words(&lexicon, "one thing, just one").len(), 2);
    }

    #[test]
    fn phrases_match_on_boundaries() {
        let lexicon = lexicon(&["piece of cake"]);
        let hits = find_weak_words(&lexicon, "It was a Piece of cake.");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].word, "Piece of cake");
        assert!(find_weak_words(&lexicon, "apiece of cakes").is_empty());
    }

    #[test]
    fn metacharacters_are_literal() {
        let lexicon = lexicon(&["c.o"]);
        assert!(find_weak_words(&lexicon, "cxo").is_empty());
        assert_eq!(find_weak_words(&lexicon, "the c.o said").len(), 1);
    }

    #[test]
    fn overlapping_hits_are_kept() {
        let lexicon = lexicon(&["kind of", "of"]);
        let hits = find_weak_words(&lexicon, "kind of odd");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].word, "kind of");
        assert_eq!(hits[1].word, "of");
        assert!(hits[1].index < hits[0].end());
    }

    #[test]
    fn repeated_words_each_count() {
        let hits = find_weak_words(&lexicon(&["very"]), "very very very");
        let offsets: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(offsets, [0, 5, 10]);
    }
}
