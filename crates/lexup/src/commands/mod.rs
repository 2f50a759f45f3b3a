//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use lexup_core::Config;
use lexup_core::settings::{SavedSettings, UsageStats};
use lexup_core::store::{Namespace, Store};

pub mod history;
pub mod info;
pub mod progress;
pub mod quiz;
pub mod review;
pub mod saved;
pub mod scan;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod settings;
pub mod spell;
pub mod synonyms;
pub mod upgrade;
pub mod words;

/// Where a text-processing command reads its input.
#[derive(Args, Debug, Default)]
pub struct TextInput {
    /// File to read, or `-` for stdin.
    #[arg(value_name = "FILE", required_unless_present = "text", conflicts_with = "text")]
    pub file: Option<Utf8PathBuf>,

    /// Inline text instead of a file.
    #[arg(long)]
    pub text: Option<String>,
}

impl TextInput {
    /// Short label for logs and messages.
    pub fn label(&self) -> &str {
        match (&self.text, &self.file) {
            (Some(_), _) => "<text>",
            (None, Some(path)) if path.as_str() == "-" => "<stdin>",
            (None, Some(path)) => path.as_str(),
            (None, None) => "<none>",
        }
    }

    /// Read the text, enforcing `max_bytes` when set.
    pub fn read(&self, max_bytes: Option<usize>) -> anyhow::Result<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => {
                check_size("--text", text.len(), max_bytes)?;
                Ok(text.clone())
            }
            (None, Some(path)) if path.as_str() == "-" => read_stdin(max_bytes),
            (None, Some(path)) => read_input_file(path, max_bytes),
            (None, None) => anyhow::bail!("no input: pass a FILE, `-` for stdin, or --text"),
        }
    }
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    check_size(path.as_str(), usize::try_from(metadata.len()).unwrap_or(usize::MAX), max_bytes)?;

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            stdin
                .take(limit)
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            check_size("stdin", content.len(), max_bytes)?;
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
        }
    }
    Ok(content)
}

fn check_size(what: &str, size: usize, max_bytes: Option<usize>) -> anyhow::Result<()> {
    if let Some(max) = max_bytes
        && size > max
    {
        anyhow::bail!("input too large: {what} is {size} bytes (limit: {max} bytes)");
    }
    Ok(())
}

/// Open the state store named by the configuration and count the session.
pub fn open_store(config: &Config) -> anyhow::Result<Store> {
    let store = Store::from_config(config).context("failed to locate the data directory")?;
    tracing::debug!(root = %store.root(), "using state store");
    let mut usage: UsageStats = store.load(Namespace::Stats);
    usage.record_session();
    store
        .save(Namespace::Stats, &usage)
        .context("failed to save usage stats")?;
    Ok(store)
}

/// Preferences saved with `lexup settings set`, empty when there is no data directory.
pub fn saved_settings(config: &Config) -> SavedSettings {
    match Store::from_config(config) {
        Ok(store) => store.load(Namespace::Settings),
        Err(err) => {
            tracing::debug!(error = %err, "skipping saved settings");
            SavedSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn inline_text_is_returned() {
        let input = TextInput {
            file: None,
            text: Some("very good".into()),
        };
        assert_eq!(input.read(None).unwrap(), "very good");
        assert_eq!(input.label(), "<text>");
    }

    #[test]
    fn inline_text_respects_limit() {
        let input = TextInput {
            file: None,
            text: Some("0123456789".into()),
        };
        let err = input.read(Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn file_over_limit_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a really good sentence").unwrap();
        let path = Utf8PathBuf::try_from(file.path().to_path_buf()).unwrap();
        assert!(read_input_file(&path, Some(5)).is_err());
        assert_eq!(read_input_file(&path, None).unwrap(), "a really good sentence");
    }

    fn config_in(dir: &tempfile::TempDir) -> Config {
        Config {
            data_dir: Some(Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap()),
            ..Config::default()
        }
    }

    #[test]
    fn open_store_counts_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        open_store(&config).unwrap();
        let store = open_store(&config).unwrap();
        let usage: UsageStats = store.load(Namespace::Stats);
        assert_eq!(usage.sessions_count, 2);
    }

    #[test]
    fn saved_settings_read_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        assert!(saved_settings(&config).is_empty());
        std::fs::write(dir.path().join("settings.json"), r#"{"spellCheck": false}"#).unwrap();
        assert_eq!(saved_settings(&config).spell_check, Some(false));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_input_file(Utf8Path::new("/nonexistent/input.txt"), None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/input.txt"));
    }
}
