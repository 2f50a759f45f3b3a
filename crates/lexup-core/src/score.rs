//! Writing score from weak-word density.
//!
//! `score = clamp(0, 100, round(100 - density * 2))`, where `density` is the
//! percentage of whitespace-delimited tokens flagged by the scanner.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::scanner::find_weak_words;
use crate::tone::Tone;

/// Distinct weak words considered for suggestions, before filtering.
pub const MAX_SUGGESTION_WORDS: usize = 5;

/// Result of scoring a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WritingScore {
    /// Quality score, 0 to 100.
    pub score: u8,
    /// Number of weak-word hits, overlapping hits included.
    pub weak_word_count: usize,
    /// Number of whitespace-delimited tokens.
    pub total_words: usize,
    /// Human-readable replacement suggestions.
    pub suggestions: Vec<String>,
}

impl WritingScore {
    /// The score of a text with nothing to penalize.
    pub const fn perfect() -> Self {
        Self {
            score: 100,
            weak_word_count: 0,
            total_words: 0,
            suggestions: Vec::new(),
        }
    }
}

/// Score `text` against the lexicon's weak words.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn calculate_writing_score(lexicon: &Lexicon, text: &str) -> WritingScore {
    if text.trim().is_empty() {
        return WritingScore::perfect();
    }

    let total_words = text.split_whitespace().count();
    let hits = find_weak_words(lexicon, text);
    let weak_word_count = hits.len();

    let mut seen = HashSet::new();
    let suggestions = hits
        .iter()
        .map(|hit| hit.word.to_lowercase())
        .filter(|word| seen.insert(word.clone()))
        // The cap applies before filtering: words without synonyms still use a slot.
        .take(MAX_SUGGESTION_WORDS)
        .filter_map(|word| suggestion_for(lexicon, &word))
        .collect();

    let score = penalized_score(weak_word_count, total_words);
    tracing::debug!(score, weak_word_count, total_words, "writing score computed");

    WritingScore {
        score,
        weak_word_count,
        total_words,
        suggestions,
    }
}

/// Apply the doubled density penalty and clamp into 0..=100.
fn penalized_score(weak_word_count: usize, total_words: usize) -> u8 {
    if total_words == 0 {
        return 100;
    }
    let penalty = (weak_word_count as f64 / total_words as f64) * 100.0;
    let raw = 2.0f64.mul_add(-penalty, 100.0).round();
    raw.clamp(0.0, 100.0) as u8
}

fn suggestion_for(lexicon: &Lexicon, word: &str) -> Option<String> {
    match lexicon.synonyms_for_word(word, Tone::Formal) {
        [] => None,
        [only] => Some(format!("Replace \"{word}\" with \"{only}\"")),
        [first, second, ..] => Some(format!(
            "Replace \"{word}\" with \"{first}\" or \"{second}\""
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_perfect() {
        let lexicon = Lexicon::builtin();
        assert_eq!(calculate_writing_score(&lexicon, ""), WritingScore::perfect());
        assert_eq!(calculate_writing_score(&lexicon, "  \n\t"), WritingScore::perfect());
    }

    #[test]
    fn end_to_end_example() {
        let report = calculate_writing_score(
            &Lexicon::builtin(),
            "This is a very good and really important idea.",
        );
        assert_eq!(report.weak_word_count, 4);
        assert_eq!(report.total_words, 9);
        assert_eq!(report.score, 11);
        assert_eq!(report.suggestions.len(), 4);
        assert_eq!(
            report.suggestions[0],
            "Replace \"very\" with \"exceptionally\" or \"remarkably\""
        );
    }

    #[test]
    fn clean_text_scores_100() {
        let report = calculate_writing_score(&Lexicon::builtin(), "The cat sat on the mat.");
        assert_eq!(report.score, 100);
        assert_eq!(report.weak_word_count, 0);
        assert_eq!(report.total_words, 6);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn dense_text_clamps_to_zero() {
        let report = calculate_writing_score(&Lexicon::builtin(), "very good stuff");
        assert_eq!(report.score, 0);
    }

    #[test]
    fn score_is_non_increasing_with_density() {
        let lexicon = Lexicon::builtin();
        let texts = [
            "one two three four five six seven eight nine ten",
            "very two three four five six seven eight nine ten",
            "very good three four five six seven eight nine ten",
            "very good nice four five six seven eight nine ten",
            "very good nice bad five six seven eight nine ten",
        ];
        let scores: Vec<u8> = texts
            .iter()
            .map(|t| calculate_writing_score(&lexicon, t).score)
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
        assert_eq!(scores, [100, 80, 60, 40, 20]);
    }

    #[test]
    fn suggestions_dedupe_case_insensitively() {
        let report = calculate_writing_score(&Lexicon::builtin(), "Good good GOOD idea");
        assert_eq!(report.weak_word_count, 3);
        assert_eq!(report.suggestions.len(), 1);
        assert!(report.suggestions[0].starts_with("Replace \"good\""));
    }

    #[test]
    fn cap_applies_before_filtering() {
        // Five weak words without synonyms come first and use up every slot.
        let json = serde_json::json!({
            "words": { "good": { "formal": ["excellent", "superb"] } },
            "weakWords": ["aa", "bb", "cc", "dd", "ee", "good"]
        })
        .to_string();
        let lexicon = Lexicon::from_json_str(&json).unwrap();
        let report = calculate_writing_score(&lexicon, "aa bb cc dd ee good");
        assert_eq!(report.weak_word_count, 6);
        assert!(report.suggestions.is_empty());

        let report = calculate_writing_score(&lexicon, "aa bb good cc dd ee");
        assert_eq!(report.suggestions, ["Replace \"good\" with \"excellent\" or \"superb\""]);
    }

    #[test]
    fn single_synonym_suggestion() {
        let json = serde_json::json!({
            "words": { "stuff": { "formal": ["material"] } },
            "weakWords": ["stuff"]
        })
        .to_string();
        let lexicon = Lexicon::from_json_str(&json).unwrap();
        let report = calculate_writing_score(&lexicon, "some stuff");
        assert_eq!(report.suggestions, ["Replace \"stuff\" with \"material\""]);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(WritingScore::perfect()).unwrap();
        assert_eq!(json["weakWordCount"], 0);
        assert_eq!(json["totalWords"], 0);
    }
}
