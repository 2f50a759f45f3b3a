//! Info command implementation

use clap::Args;
use lexup_core::config::{Config, ConfigSources};
use lexup_core::store::Store;
use lexup_core::Session;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    tone: String,
    spell_check: bool,
    auto_highlight: bool,
    quiz_length: usize,
    history_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            tone: config.tone.as_str().to_string(),
            spell_check: config.spell_check,
            auto_highlight: config.auto_highlight,
            quiz_length: config.quiz_length,
            history_limit: config.history_limit,
            data_dir: Store::from_config(config)
                .ok()
                .map(|store| store.root().to_string()),
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct DataInfo {
    synonyms_version: u32,
    synonym_words: usize,
    synonym_phrases: usize,
    weak_words: usize,
    vocabulary_version: u32,
    vocabulary_words: usize,
    dictionary_words: usize,
    misspellings: usize,
}

impl DataInfo {
    fn from_session(session: &Session) -> Self {
        let dictionary = session.spelling().dictionary();
        Self {
            synonyms_version: session.lexicon().version(),
            synonym_words: session.lexicon().available_words().count(),
            synonym_phrases: session.lexicon().available_phrases().count(),
            weak_words: session.lexicon().weak_words().len(),
            vocabulary_version: session.vocabulary().version(),
            vocabulary_words: session.vocabulary().len(),
            dictionary_words: dictionary.len(),
            misspellings: dictionary.misspelling_count(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
    data: DataInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
/// * `session` - Loaded data tables
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
    session: &Session,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
        data: DataInfo::from_session(session),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        full_info.package.name.bold(),
        full_info.package.version.green()
    );
    if !full_info.package.description.is_empty() {
        println!("{}", full_info.package.description);
    }
    if !full_info.package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), full_info.package.license);
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    if let Some(ref path) = cfg.config_file {
        println!("{}: {}", "Config file".dimmed(), path.cyan());
    } else {
        println!("{}: {}", "Config file".dimmed(), "none loaded".yellow());
    }
    println!("{}: {}", "Log level".dimmed(), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }
    println!("{}: {}", "Tone".dimmed(), cfg.tone);
    println!("{}: {}", "Spell check".dimmed(), on_off(cfg.spell_check));
    println!("{}: {}", "Auto highlight".dimmed(), on_off(cfg.auto_highlight));
    println!("{}: {}", "Quiz length".dimmed(), cfg.quiz_length);
    println!("{}: {}", "History limit".dimmed(), cfg.history_limit);
    match cfg.data_dir {
        Some(ref dir) => println!("{}: {}", "Data directory".dimmed(), dir),
        None => println!("{}: {}", "Data directory".dimmed(), "unavailable".yellow()),
    }
    match cfg.max_input_bytes {
        Some(max) => println!("{}: {max} bytes", "Input limit".dimmed()),
        None => println!("{}: {}", "Input limit".dimmed(), "disabled".yellow()),
    }

    let data = &full_info.data;
    println!();
    println!("{}", "Data".bold().underline());
    println!(
        "{}: v{}, {} words, {} phrases, {} weak words",
        "Synonyms".dimmed(),
        data.synonyms_version,
        data.synonym_words,
        data.synonym_phrases,
        data.weak_words
    );
    println!(
        "{}: v{}, {} words",
        "Vocabulary".dimmed(),
        data.vocabulary_version,
        data.vocabulary_words
    );
    println!(
        "{}: {} words, {} known misspellings",
        "Dictionary".dimmed(),
        data.dictionary_words,
        data.misspellings
    );

    Ok(())
}

const fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    fn test_sources() -> ConfigSources {
        ConfigSources::default()
    }

    #[test]
    fn test_cmd_info_text_succeeds() {
        let session = Session::builtin();
        assert!(
            cmd_info(InfoArgs::default(), false, &test_config(), &test_sources(), &session).is_ok()
        );
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        let session = Session::builtin();
        assert!(
            cmd_info(InfoArgs::default(), true, &test_config(), &test_sources(), &session).is_ok()
        );
    }

    #[test]
    fn test_config_info_no_file() {
        let info = ConfigInfo::from_config(&test_config(), &test_sources());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.tone, "formal");
        assert_eq!(info.max_input_bytes, Some(lexup_core::DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn test_data_info_counts_builtin_tables() {
        let data = DataInfo::from_session(&Session::builtin());
        assert!(data.weak_words > 0);
        assert!(data.synonym_words > 0);
        assert_eq!(data.synonym_phrases, 7);
        assert_eq!(data.vocabulary_words, 24);
        assert!(data.dictionary_words > 1000);
    }
}
