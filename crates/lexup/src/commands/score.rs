//! Score command: writing score from weak-word density.

use anyhow::bail;
use clap::Args;
use lexup_core::Session;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use super::TextInput;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Fail when the score is below this value (0-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: Option<u8>,
}

/// Score text and print suggestions.
#[instrument(name = "cmd_score", skip_all, fields(input = %args.input.label()))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    session: &Session,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let text = args.input.read(max_input_bytes)?;
    let report = session.score(&text);
    debug!(score = report.score, weak = report.weak_word_count, "score computed");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let score = report.score.to_string();
        let colored = match report.score {
            80.. => score.green().to_string(),
            50..80 => score.yellow().to_string(),
            _ => score.red().to_string(),
        };
        println!(
            "{}: {colored}/100 ({} weak of {} words)",
            "Score".bold(),
            report.weak_word_count,
            report.total_words
        );
        for suggestion in &report.suggestions {
            println!("  {} {suggestion}", "-".dimmed());
        }
    }

    if let Some(min) = args.min_score
        && report.score < min
    {
        bail!(
            "{} scores {} (min: {min}). Replace weak words to raise it.",
            args.input.label(),
            report.score
        );
    }
    Ok(())
}
