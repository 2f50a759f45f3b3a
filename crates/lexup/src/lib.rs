//! Library interface for the `lexup` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, lexup=trace)
    LEXUP_LOG_PATH         Explicit log file path
    LEXUP_LOG_DIR          Log directory
    LEXUP_TONE             Default tone (formal, academic, business, casual)
    LEXUP_DATA_DIR         Directory for saved progress and history
";
/// Command-line interface definition for lexup.
#[derive(Parser)]
#[command(name = "lexup")]
#[command(
    about = "Find weak words, suggest stronger synonyms by tone, and track vocabulary practice",
    long_about = None
)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Locate weak words in text
    Scan(commands::scan::ScanArgs),

    /// Score writing by weak-word density
    Score(commands::score::ScoreArgs),

    /// Rewrite text with stronger words
    Upgrade(commands::upgrade::UpgradeArgs),

    /// Look up synonyms for a word or phrase
    Synonyms(commands::synonyms::SynonymsArgs),

    /// Check spelling and suggest corrections
    Spell(commands::spell::SpellArgs),

    /// Browse the vocabulary catalog
    Words(commands::words::WordsArgs),

    /// Review vocabulary words on a spaced-repetition schedule
    Review(commands::review::ReviewArgs),

    /// Take a multiple-choice definition quiz
    Quiz(commands::quiz::QuizArgs),

    /// Show study progress and usage statistics
    Progress(commands::progress::ProgressArgs),

    /// Manage saved upgrades
    History(commands::history::HistoryArgs),

    /// Manage saved words
    Saved(commands::saved::SavedArgs),

    /// Show or save preferences
    Settings(commands::settings::SettingsArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lexup", "score", "--text", "hi", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Score(_))));
    }

    #[test]
    fn parses_settings_set_values() {
        let cli = Cli::try_parse_from([
            "lexup",
            "settings",
            "set",
            "--tone",
            "casual",
            "--spell-check",
            "false",
        ])
        .unwrap();
        let Some(Commands::Settings(args)) = cli.command else {
            panic!("expected settings command");
        };
        let Some(commands::settings::SettingsCommand::Set {
            tone,
            auto_highlight,
            spell_check,
        }) = args.command
        else {
            panic!("expected set action");
        };
        assert_eq!(tone, Some(lexup_core::Tone::Casual));
        assert_eq!(auto_highlight, None);
        assert_eq!(spell_check, Some(false));
    }
}
