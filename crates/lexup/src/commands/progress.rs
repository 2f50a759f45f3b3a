//! Progress command: study statistics and usage counters.

use anyhow::Context;
use clap::Args;
use lexup_core::Config;
use lexup_core::progress::{ProgressStats, UserProgress};
use lexup_core::settings::UsageStats;
use lexup_core::store::Namespace;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{info, instrument};

use super::open_store;

/// Arguments for the `progress` subcommand.
#[derive(Args, Debug, Default)]
pub struct ProgressArgs {
    /// Erase study progress and usage counters.
    #[arg(long)]
    pub reset: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressReport {
    #[serde(flatten)]
    stats: ProgressStats,
    words_learned: usize,
    usage: UsageStats,
}

/// Show or reset progress.
#[instrument(name = "cmd_progress", skip_all, fields(reset = args.reset))]
pub fn cmd_progress(args: ProgressArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;

    if args.reset {
        store
            .reset(Namespace::Progress)
            .context("failed to reset progress")?;
        store
            .reset(Namespace::Stats)
            .context("failed to reset usage statistics")?;
        info!("progress reset");
        if !global_json {
            println!("Progress reset.");
        }
        return Ok(());
    }

    let progress: UserProgress = store.load(Namespace::Progress);
    let report = ProgressReport {
        stats: progress.stats(),
        words_learned: progress.total_words_learned,
        usage: store.load(Namespace::Stats),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let stats = &report.stats;
    println!("{}", "Study".bold().underline());
    println!("{}: {}", "Words reviewed".dimmed(), stats.total_reviewed);
    println!("{}: {}", "Words learned".dimmed(), report.words_learned);
    println!(
        "{}: {} mastered, {} learning, {} need work",
        "Confidence".dimmed(),
        stats.mastered.green(),
        stats.learning.yellow(),
        stats.needs_work.red()
    );
    println!("{}: {:.1}", "Average confidence".dimmed(), stats.avg_confidence);
    println!(
        "{}: {} day{}",
        "Current streak".dimmed(),
        stats.current_streak,
        if stats.current_streak == 1 { "" } else { "s" }
    );
    println!(
        "{}: {} taken, {:.0}% average (last 10)",
        "Quizzes".dimmed(),
        stats.total_quizzes_taken,
        stats.avg_quiz_score
    );

    let usage = &report.usage;
    println!();
    println!("{}", "Usage".bold().underline());
    println!("{}: {}", "Words upgraded".dimmed(), usage.words_upgraded);
    println!("{}: {}", "Spelling fixed".dimmed(), usage.spelling_fixed);
    if let Some(last) = usage.last_used {
        println!("{}: {}", "Last used".dimmed(), last.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}
