//! Tone-aware text upgrading.
//!
//! Two ordered passes over the text:
//!
//! 1. Every weak word with an entry in the words table, longest first, is
//!    replaced on word boundaries by its top synonym for the tone. A match
//!    starting with an uppercase letter gets a capitalized replacement.
//! 2. Every phrase in the phrases table is replaced as a plain
//!    case-insensitive substring by its top synonym, without case handling.
//!
//! Each pass works on the output of the one before it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::tone::Tone;

/// A single substitution performed by the upgrader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Replacement {
    /// Matched text, in its original case.
    pub original: String,
    /// Text inserted in its place.
    pub replacement: String,
}

/// Upgraded text plus the substitutions that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpgradeOutcome {
    /// The rewritten text.
    pub text: String,
    /// Substitutions in the order they were applied.
    pub replacements: Vec<Replacement>,
}

/// Rewrite `text`, replacing weak words and phrases with `tone` synonyms.
pub fn upgrade_text(lexicon: &Lexicon, text: &str, tone: Tone) -> String {
    upgrade_diff(lexicon, text, tone).text
}

/// Rewrite `text` and report every substitution made.
#[tracing::instrument(skip_all, fields(text_len = text.len(), tone = %tone))]
pub fn upgrade_diff(lexicon: &Lexicon, text: &str, tone: Tone) -> UpgradeOutcome {
    let mut replacements = Vec::new();
    let mut current = text.to_string();

    for pattern in lexicon.weak_patterns_longest_first() {
        let Some(synonym) = lexicon.synonyms_for_word(&pattern.word, tone).first() else {
            continue;
        };
        if !pattern.regex.is_match(&current) {
            continue;
        }
        current = pattern
            .regex
            .replace_all(&current, |caps: &regex::Captures<'_>| {
                let matched = &caps[0];
                let inserted = match_case(matched, synonym);
                replacements.push(Replacement {
                    original: matched.to_string(),
                    replacement: inserted.clone(),
                });
                inserted
            })
            .into_owned();
    }

    for pattern in lexicon.phrase_patterns() {
        let Some(synonym) = lexicon.synonyms_for_phrase(&pattern.phrase, tone).first() else {
            continue;
        };
        if !pattern.regex.is_match(&current) {
            continue;
        }
        current = pattern
            .regex
            .replace_all(&current, |caps: &regex::Captures<'_>| {
                replacements.push(Replacement {
                    original: caps[0].to_string(),
                    replacement: synonym.clone(),
                });
                synonym.clone()
            })
            .into_owned();
    }

    tracing::debug!(replacements = replacements.len(), "upgrade complete");
    UpgradeOutcome {
        text: current,
        replacements,
    }
}

/// Capitalize `replacement` when `matched` starts with an uppercase letter.
fn match_case(matched: &str, replacement: &str) -> String {
    let starts_upper = matched.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
