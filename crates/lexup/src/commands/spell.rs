//! Spell command: find misspellings and optionally fix them.

use anyhow::Context;
use clap::Args;
use lexup_core::settings::{ReplacementKind, UsageStats};
use lexup_core::spelling::MisspelledWord;
use lexup_core::store::Namespace;
use lexup_core::{Config, Session};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{TextInput, open_store};

/// Arguments for the `spell` subcommand.
#[derive(Args, Debug)]
pub struct SpellArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Print the text with each misspelling replaced by its best suggestion.
    #[arg(long)]
    pub fix: bool,

    /// Count applied fixes in usage statistics.
    #[arg(long, requires = "fix")]
    pub save: bool,
}

#[derive(Serialize)]
struct SpellReport<'a> {
    misspelled: &'a [MisspelledWord],
    #[serde(skip_serializing_if = "Option::is_none")]
    fixed: Option<&'a str>,
}

/// Check spelling.
#[instrument(name = "cmd_spell", skip_all, fields(input = %args.input.label()))]
pub fn cmd_spell(
    args: SpellArgs,
    global_json: bool,
    session: &Session,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let text = args.input.read(max_input_bytes)?;
    let misspelled = session.check_spelling(&text);
    debug!(misspelled = misspelled.len(), "spell check complete");

    let fixed = args.fix.then(|| apply_fixes(&text, &misspelled));
    if args.save
        && let Some((_, applied)) = &fixed
        && *applied > 0
    {
        let store = open_store(config)?;
        let mut stats: UsageStats = store.load(Namespace::Stats);
        let count = u64::try_from(*applied).unwrap_or(u64::MAX);
        stats.record_replacements(ReplacementKind::Spelling, count, chrono::Utc::now());
        store
            .save(Namespace::Stats, &stats)
            .context("failed to save usage statistics")?;
    }

    if global_json {
        let report = SpellReport {
            misspelled: &misspelled,
            fixed: fixed.as_ref().map(|(text, _)| text.as_str()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some((text, _)) = &fixed {
        println!("{}", text.trim_end_matches('\n'));
        return Ok(());
    }
    if misspelled.is_empty() {
        println!("{}", "No misspellings found.".green());
        return Ok(());
    }
    for word in &misspelled {
        let suggestions = if word.suggestions.is_empty() {
            "(no suggestions)".dimmed().to_string()
        } else {
            word.suggestions.join(", ")
        };
        println!("{:>6}  {}  {suggestions}", word.index.dimmed(), word.word.red());
    }
    Ok(())
}

/// Replace each misspelling with its first suggestion. Returns the new text
/// and how many words changed.
fn apply_fixes(text: &str, misspelled: &[MisspelledWord]) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut applied = 0;
    for word in misspelled {
        let Some(best) = word.suggestions.first() else {
            continue;
        };
        if word.index < cursor {
            continue;
        }
        out.push_str(&text[cursor..word.index]);
        out.push_str(&match_leading_case(&word.word, best));
        cursor = word.index + word.length;
        applied += 1;
    }
    out.push_str(&text[cursor..]);
    (out, applied)
}

fn match_leading_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if starts_upper => first.to_uppercase().chain(chars).collect(),
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixes_use_first_suggestion_and_keep_case() {
        let session = Session::builtin();
        let text = "Teh letter will recieve today.";
        let misspelled = session.check_spelling(text);
        let (fixed, applied) = apply_fixes(text, &misspelled);
        assert_eq!(fixed, "The letter will receive today.");
        assert_eq!(applied, 2);
    }

    #[test]
    fn no_misspellings_leave_text_unchanged() {
        let (fixed, applied) = apply_fixes("plain text", &[]);
        assert_eq!(fixed, "plain text");
        assert_eq!(applied, 0);
    }
}
