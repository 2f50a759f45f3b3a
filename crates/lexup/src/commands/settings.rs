//! Settings command: saved preferences layered over the configuration.

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use lexup_core::settings::{SavedSettings, Settings};
use lexup_core::store::Namespace;
use lexup_core::{Config, Session, Tone};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{info, instrument};

use super::open_store;

/// Arguments for the `settings` subcommand.
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommand>,
}

/// Settings actions. Shows the active settings when omitted.
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show the active settings
    Show,
    /// Save one or more preferences
    Set {
        /// Preferred tone.
        #[arg(long, value_enum)]
        tone: Option<Tone>,
        /// Print highlighted text in `scan` output.
        #[arg(long, value_name = "BOOL")]
        auto_highlight: Option<bool>,
        /// Report misspellings in `scan` output.
        #[arg(long, value_name = "BOOL")]
        spell_check: Option<bool>,
    },
    /// Forget saved preferences
    Reset,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsReport<'a> {
    active: &'a Settings,
    saved: &'a SavedSettings,
}

/// Run a settings action.
#[instrument(name = "cmd_settings", skip_all)]
pub fn cmd_settings(
    args: SettingsArgs,
    global_json: bool,
    session: &Session,
    config: &Config,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut saved: SavedSettings = store.load(Namespace::Settings);

    match args.command.unwrap_or(SettingsCommand::Show) {
        SettingsCommand::Show => print_report(session.settings(), &saved, global_json)?,
        SettingsCommand::Set {
            tone,
            auto_highlight,
            spell_check,
        } => {
            let update = SavedSettings {
                tone,
                auto_highlight,
                spell_check,
            };
            if update.is_empty() {
                bail!("nothing to set: pass --tone, --auto-highlight, or --spell-check");
            }
            saved.merge(update);
            store
                .save(Namespace::Settings, &saved)
                .context("failed to save settings")?;
            info!(?saved, "settings saved");
            let active = session.settings().clone().overridden_by(&saved);
            print_report(&active, &saved, global_json)?;
        }
        SettingsCommand::Reset => {
            store
                .reset(Namespace::Settings)
                .context("failed to reset settings")?;
            if !global_json {
                println!("Saved settings cleared.");
            }
        }
    }
    Ok(())
}

fn print_report(active: &Settings, saved: &SavedSettings, global_json: bool) -> anyhow::Result<()> {
    if global_json {
        let report = SettingsReport { active, saved };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!(
        "{}: {}{}",
        "Tone".dimmed(),
        active.tone.as_str(),
        marker(saved.tone.is_some())
    );
    println!(
        "{}: {}{}",
        "Auto highlight".dimmed(),
        on_off(active.auto_highlight),
        marker(saved.auto_highlight.is_some())
    );
    println!(
        "{}: {}{}",
        "Spell check".dimmed(),
        on_off(active.spell_check),
        marker(saved.spell_check.is_some())
    );
    Ok(())
}

const fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

const fn marker(saved: bool) -> &'static str {
    if saved { " (saved)" } else { "" }
}
