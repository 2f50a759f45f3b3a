//! Saved command: the learner's word list.

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use lexup_core::store::{Namespace, Store};
use lexup_core::word_list::WordList;
use lexup_core::{Config, Session};
use owo_colors::OwoColorize;
use tracing::{info, instrument};

use super::open_store;

/// Arguments for the `saved` subcommand.
#[derive(Args, Debug)]
pub struct SavedArgs {
    #[command(subcommand)]
    pub command: Option<SavedCommand>,
}

/// Word-list actions. Lists words when omitted.
#[derive(Subcommand, Debug)]
pub enum SavedCommand {
    /// List saved words
    List,
    /// Save a word
    Add {
        /// The word to save.
        word: String,
        /// Definition (looked up in the catalog when omitted).
        #[arg(short, long)]
        definition: Option<String>,
    },
    /// Forget a word
    Remove {
        /// The word to forget.
        word: String,
    },
    /// Set or clear notes on a word
    Note {
        /// The saved word.
        word: String,
        /// Notes text; empty clears them.
        notes: String,
    },
    /// Forget every word
    Clear,
}

/// Run a word-list action.
#[instrument(name = "cmd_saved", skip_all)]
pub fn cmd_saved(
    args: SavedArgs,
    global_json: bool,
    session: &Session,
    config: &Config,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut list: WordList = store.load(Namespace::WordList);

    match args.command.unwrap_or(SavedCommand::List) {
        SavedCommand::List => {
            if global_json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else if list.is_empty() {
                println!("No saved words.");
            } else {
                for saved in list.words() {
                    println!(
                        "{:<16} {}",
                        saved.word.bold(),
                        saved.definition.as_deref().unwrap_or("")
                    );
                    if let Some(notes) = &saved.notes {
                        println!("{:<16} {}", "", notes.dimmed());
                    }
                }
            }
        }
        SavedCommand::Add { word, definition } => {
            let definition = definition.or_else(|| {
                session
                    .vocabulary()
                    .find_exact(&word)
                    .map(|w| w.definition.clone())
            });
            if !list.add(&word, definition, chrono::Utc::now()) {
                bail!("\"{}\" is already saved", word.trim());
            }
            save(&store, &list)?;
            info!(word = %word.trim(), "word saved");
            if !global_json {
                println!("Saved {}.", word.trim().bold());
            }
        }
        SavedCommand::Remove { word } => {
            if !list.remove(&word) {
                bail!("\"{}\" is not saved", word.trim());
            }
            save(&store, &list)?;
            if !global_json {
                println!("Removed {}.", word.trim());
            }
        }
        SavedCommand::Note { word, notes } => {
            if !list.update_notes(&word, &notes) {
                bail!("\"{}\" is not saved", word.trim());
            }
            save(&store, &list)?;
        }
        SavedCommand::Clear => {
            list.clear();
            save(&store, &list)?;
            if !global_json {
                println!("Word list cleared.");
            }
        }
    }
    Ok(())
}

fn save(store: &Store, list: &WordList) -> anyhow::Result<()> {
    store
        .save(Namespace::WordList, list)
        .context("failed to save word list")
}
