//! Scan command: locate weak words, plus misspellings when spell check is on.

use clap::Args;
use lexup_core::{MisspelledWord, Session, WeakWordHit};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use super::TextInput;

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Print the highlighted text even when auto-highlight is off.
    #[arg(long)]
    pub highlight: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanReport<'a> {
    weak_words: &'a [WeakWordHit],
    #[serde(skip_serializing_if = "Option::is_none")]
    misspelled: Option<&'a [MisspelledWord]>,
}

/// List weak words with their byte offsets.
///
/// The active settings decide whether the highlighted text is printed and
/// whether misspellings are reported.
#[instrument(name = "cmd_scan", skip_all, fields(input = %args.input.label()))]
pub fn cmd_scan(
    args: ScanArgs,
    global_json: bool,
    session: &Session,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let text = args.input.read(max_input_bytes)?;
    let settings = session.settings();
    let hits = session.scan(&text);
    let misspelled = settings.spell_check.then(|| session.check_spelling(&text));
    debug!(
        hits = hits.len(),
        misspelled = misspelled.as_ref().map(Vec::len),
        "scan complete"
    );

    if global_json {
        let report = ScanReport {
            weak_words: &hits,
            misspelled: misspelled.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.highlight || settings.auto_highlight {
        println!("{}", highlight(&text, &hits));
        println!();
    }

    if hits.is_empty() {
        println!("{}", "No weak words found.".green());
    }
    for hit in &hits {
        let synonyms = session.synonyms(&hit.word, None);
        let hint = synonyms.first().map_or(String::new(), |s| format!(" -> {s}"));
        println!(
            "{:>6}  {}{}",
            hit.index.dimmed(),
            hit.word.yellow(),
            hint.dimmed()
        );
    }

    if let Some(misspelled) = misspelled.filter(|m| !m.is_empty()) {
        println!();
        println!("{}", "Misspelled".bold());
        for word in &misspelled {
            let hint = word
                .suggestions
                .first()
                .map_or(String::new(), |s| format!(" -> {s}"));
            println!("{:>6}  {}{}", word.index.dimmed(), word.word.red(), hint.dimmed());
        }
    }
    Ok(())
}

/// Wrap each non-overlapping hit in color.
fn highlight(text: &str, hits: &[WeakWordHit]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for hit in hits {
        if hit.index < cursor {
            continue;
        }
        out.push_str(&text[cursor..hit.index]);
        out.push_str(&(&text[hit.index..hit.end()]).yellow().underline().to_string());
        cursor = hit.end();
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(word: &str, index: usize) -> WeakWordHit {
        WeakWordHit {
            word: word.into(),
            index,
            length: word.len(),
        }
    }

    #[test]
    fn highlight_skips_overlapping_hits() {
        owo_colors::set_override(false);
        let text = "a lot of good";
        let out = highlight(text, &[hit("a lot", 0), hit("lot", 2), hit("good", 9)]);
        assert_eq!(out, text);
    }
}
