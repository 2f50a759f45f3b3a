//! Synonyms command.

use clap::Args;
use lexup_core::{Session, Tone};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::instrument;

/// Arguments for the `synonyms` subcommand.
#[derive(Args, Debug)]
pub struct SynonymsArgs {
    /// Word or phrase to look up.
    #[arg(required = true, num_args = 1..)]
    pub word: Vec<String>,

    /// Tone of the suggestions (defaults to the configured tone).
    #[arg(short, long, value_enum, conflicts_with = "all_tones")]
    pub tone: Option<Tone>,

    /// Show suggestions for every tone.
    #[arg(long)]
    pub all_tones: bool,
}

#[derive(Serialize)]
struct ToneSynonyms<'a> {
    tone: Tone,
    synonyms: &'a [String],
}

/// Print synonyms for a word or phrase.
#[instrument(name = "cmd_synonyms", skip_all)]
pub fn cmd_synonyms(args: SynonymsArgs, global_json: bool, session: &Session) -> anyhow::Result<()> {
    let word = args.word.join(" ");
    let tones = if args.all_tones {
        Tone::ALL.to_vec()
    } else {
        vec![args.tone.unwrap_or(session.settings().tone)]
    };
    let found: Vec<(Tone, Vec<String>)> = tones
        .into_iter()
        .map(|tone| (tone, session.synonyms(&word, Some(tone))))
        .collect();

    if global_json {
        let out: Vec<ToneSynonyms<'_>> = found
            .iter()
            .map(|(tone, synonyms)| ToneSynonyms {
                tone: *tone,
                synonyms,
            })
            .collect();
        let value = if args.all_tones {
            serde_json::json!({ "word": word, "tones": out })
        } else {
            serde_json::json!({
                "word": word,
                "tone": out[0].tone,
                "synonyms": out[0].synonyms,
            })
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if found.iter().all(|(_, synonyms)| synonyms.is_empty()) {
        println!("No synonyms for \"{word}\".");
        return Ok(());
    }
    for (tone, synonyms) in &found {
        if args.all_tones {
            println!("{:<9} {}", tone.as_str().bold(), synonyms.join(", "));
        } else {
            println!("{}", synonyms.join(", "));
        }
    }
    Ok(())
}
