//! History command: saved upgrades.

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use lexup_core::Config;
use lexup_core::history::{HistoryItem, UpgradeHistory};
use lexup_core::store::{Namespace, Store};
use owo_colors::OwoColorize;
use tracing::{info, instrument};

use super::open_store;

/// Arguments for the `history` subcommand.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommand>,
}

/// History actions. Lists entries when omitted.
#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List saved upgrades, newest first
    List {
        /// Only starred entries.
        #[arg(long)]
        favorites: bool,
    },
    /// Star or unstar an entry
    Favorite {
        /// Entry id.
        id: String,
    },
    /// Delete an entry
    Remove {
        /// Entry id.
        id: String,
    },
    /// Delete every entry
    Clear,
}

/// Run a history action.
#[instrument(name = "cmd_history", skip_all)]
pub fn cmd_history(args: HistoryArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut history: UpgradeHistory = store.load(Namespace::UpgradeHistory);

    match args
        .command
        .unwrap_or(HistoryCommand::List { favorites: false })
    {
        HistoryCommand::List { favorites } => {
            let items: Vec<&HistoryItem> = if favorites {
                history.favorites().collect()
            } else {
                history.items().iter().collect()
            };
            print_items(&items, global_json)?;
        }
        HistoryCommand::Favorite { id } => {
            let Some(starred) = history.toggle_favorite(&id) else {
                bail!("no history entry with id {id}");
            };
            save(&store, &history)?;
            info!(%id, starred, "favorite toggled");
            if global_json {
                println!("{}", serde_json::json!({ "id": id, "favorite": starred }));
            } else {
                println!("{id} {}", if starred { "starred" } else { "unstarred" });
            }
        }
        HistoryCommand::Remove { id } => {
            if !history.remove(&id) {
                bail!("no history entry with id {id}");
            }
            save(&store, &history)?;
            if !global_json {
                println!("Removed {id}.");
            }
        }
        HistoryCommand::Clear => {
            history.clear();
            save(&store, &history)?;
            if !global_json {
                println!("History cleared.");
            }
        }
    }
    Ok(())
}

fn save(store: &Store, history: &UpgradeHistory) -> anyhow::Result<()> {
    store
        .save(Namespace::UpgradeHistory, history)
        .context("failed to save upgrade history")
}

fn print_items(items: &[&HistoryItem], global_json: bool) -> anyhow::Result<()> {
    if global_json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("No saved upgrades.");
    }
    for item in items {
        let star = if item.favorite { "*" } else { " " };
        println!(
            "{} {} {} {}",
            star.yellow(),
            item.id.dimmed(),
            item.timestamp.format("%Y-%m-%d %H:%M"),
            format!("({})", item.tone).dimmed()
        );
        println!("    {}", item.original.trim().red());
        println!("    {}", item.upgraded.trim().green());
    }
    Ok(())
}
