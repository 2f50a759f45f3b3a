//! Review command: spaced-repetition reviews.

use anyhow::{Context, bail};
use clap::Args;
use lexup_core::progress::UserProgress;
use lexup_core::store::Namespace;
use lexup_core::{Config, Session};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{info, instrument};

use super::open_store;

/// Arguments for the `review` subcommand.
///
/// Without a word, lists the words due for review.
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Word id or headword to record a review for.
    pub word: Option<String>,

    /// The word was recalled correctly.
    #[arg(long, requires = "word", conflicts_with = "missed")]
    pub knew: bool,

    /// The word was not recalled.
    #[arg(long, requires = "word")]
    pub missed: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DueWord<'a> {
    word_id: &'a str,
    word: Option<&'a str>,
    confidence: u8,
}

/// Record a review or list due words.
#[instrument(name = "cmd_review", skip_all, fields(word = ?args.word))]
pub fn cmd_review(
    args: ReviewArgs,
    global_json: bool,
    session: &Session,
    config: &Config,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut progress: UserProgress = store.load(Namespace::Progress);
    let now = chrono::Utc::now();
    let vocabulary = session.vocabulary();

    let Some(word) = args.word else {
        let due: Vec<DueWord<'_>> = progress
            .words_to_review(now)
            .into_iter()
            .map(|id| DueWord {
                word_id: id,
                word: vocabulary.by_id(id).map(|w| w.word.as_str()),
                confidence: progress.word(id).map_or(0, |p| p.confidence),
            })
            .collect();
        if global_json {
            println!("{}", serde_json::to_string_pretty(&due)?);
        } else if due.is_empty() {
            println!("{}", "Nothing due for review.".green());
        } else {
            for entry in &due {
                println!(
                    "{:>4}  {:<14} confidence {}",
                    entry.word_id.dimmed(),
                    entry.word.unwrap_or("?").bold(),
                    entry.confidence
                );
            }
        }
        return Ok(());
    };

    if !args.knew && !args.missed {
        bail!("pass --knew or --missed to record a review of \"{word}\"");
    }
    let Some(entry) = vocabulary.by_id(&word).or_else(|| vocabulary.find_exact(&word)) else {
        bail!("no vocabulary word matches \"{word}\"");
    };

    let reviewed = progress.review(&entry.id, args.knew, now).clone();
    store
        .save(Namespace::Progress, &progress)
        .context("failed to save progress")?;
    info!(word_id = %entry.id, confidence = reviewed.confidence, "review recorded");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&reviewed)?);
    } else {
        let next = reviewed
            .next_review_date
            .map_or_else(|| "now".to_string(), |d| d.format("%Y-%m-%d").to_string());
        println!(
            "{}: confidence {} of 5, next review {next}",
            entry.word.bold(),
            reviewed.confidence
        );
    }
    Ok(())
}
