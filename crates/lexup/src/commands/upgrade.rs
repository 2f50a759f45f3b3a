//! Upgrade command: rewrite text with stronger words.

use anyhow::Context;
use clap::Args;
use lexup_core::history::UpgradeHistory;
use lexup_core::settings::{ReplacementKind, UsageStats};
use lexup_core::store::Namespace;
use lexup_core::{Config, Session, Tone};
use owo_colors::OwoColorize;
use tracing::{debug, info, instrument};

use super::{TextInput, open_store};

/// Arguments for the `upgrade` subcommand.
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Tone of the replacements (defaults to the configured tone).
    #[arg(short, long, value_enum)]
    pub tone: Option<Tone>,

    /// List each substitution after the rewritten text.
    #[arg(long)]
    pub changes: bool,

    /// Record the upgrade in history and usage statistics.
    #[arg(long)]
    pub save: bool,
}

/// Rewrite text and optionally record it.
#[instrument(name = "cmd_upgrade", skip_all, fields(input = %args.input.label(), tone = ?args.tone))]
pub fn cmd_upgrade(
    args: UpgradeArgs,
    global_json: bool,
    session: &Session,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let text = args.input.read(max_input_bytes)?;
    let tone = args.tone.unwrap_or(session.settings().tone);
    let outcome = session.upgrade(&text, Some(tone));
    debug!(replacements = outcome.replacements.len(), "upgrade complete");

    if args.save && !outcome.replacements.is_empty() {
        let store = open_store(config)?;
        let now = chrono::Utc::now();

        let mut history: UpgradeHistory = store.load(Namespace::UpgradeHistory);
        let id = history
            .push(&text, &outcome.text, tone, now, config.history_limit)
            .id
            .clone();
        store
            .save(Namespace::UpgradeHistory, &history)
            .context("failed to save upgrade history")?;

        let mut stats: UsageStats = store.load(Namespace::Stats);
        let count = u64::try_from(outcome.replacements.len()).unwrap_or(u64::MAX);
        stats.record_replacements(ReplacementKind::Upgrade, count, now);
        store
            .save(Namespace::Stats, &stats)
            .context("failed to save usage statistics")?;
        info!(%id, "upgrade saved to history");
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("{}", outcome.text.trim_end_matches('\n'));
    if args.changes {
        println!();
        if outcome.replacements.is_empty() {
            println!("{}", "No changes.".dimmed());
        }
        for change in &outcome.replacements {
            println!(
                "  {} {} {}",
                change.original.red(),
                "->".dimmed(),
                change.replacement.green()
            );
        }
    }
    Ok(())
}
