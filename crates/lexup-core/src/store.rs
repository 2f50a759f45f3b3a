//! Local persistence for per-user state.
//!
//! Each namespace is one JSON document at `<root>/<namespace>.json`. Reads
//! never fail: a missing file yields the default value, and a corrupt one is
//! logged and replaced by the default. Writes go through a temporary file in
//! the same directory and are renamed into place.

use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::config::{Config, user_data_dir};
use crate::error::{StoreError, StoreResult};

/// Fixed keys of the persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// [`crate::settings::SavedSettings`].
    Settings,
    /// [`crate::settings::UsageStats`].
    Stats,
    /// [`crate::word_list::WordList`].
    WordList,
    /// [`crate::progress::UserProgress`].
    Progress,
    /// [`crate::history::UpgradeHistory`].
    UpgradeHistory,
}

impl Namespace {
    /// Every namespace.
    pub const ALL: [Self; 5] = [
        Self::Settings,
        Self::Stats,
        Self::WordList,
        Self::Progress,
        Self::UpgradeHistory,
    ];

    /// The namespace key, also the file stem.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Stats => "stats",
            Self::WordList => "word_list",
            Self::Progress => "progress",
            Self::UpgradeHistory => "upgrade_history",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory of namespaced JSON documents.
#[derive(Debug, Clone)]
pub struct Store {
    root: Utf8PathBuf,
}

impl Store {
    /// Store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store at the configured `data_dir`, or the platform data directory.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        config
            .data_dir
            .clone()
            .or_else(user_data_dir)
            .map(Self::new)
            .ok_or(StoreError::NoDataDir)
    }

    /// Root directory.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// File backing `namespace`.
    pub fn path(&self, namespace: Namespace) -> Utf8PathBuf {
        self.root.join(format!("{}.json", namespace.as_str()))
    }

    /// Read `namespace`, falling back to `T::default()`.
    #[tracing::instrument(skip(self), fields(root = %self.root))]
    pub fn load<T>(&self, namespace: Namespace) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(namespace);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(err) => {
                tracing::warn!(%path, error = %err, "could not read stored state; using defaults");
                return T::default();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|err| {
            tracing::warn!(%path, error = %err, "stored state is corrupt; using defaults");
            T::default()
        })
    }

    /// Write `value` to `namespace` atomically.
    #[tracing::instrument(skip(self, value), fields(root = %self.root))]
    pub fn save<T: Serialize>(&self, namespace: Namespace, value: &T) -> StoreResult<()> {
        let path = self.path(namespace);
        std::fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };
        let temp = NamedTempFile::new_in(&self.root).map_err(io_err)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
                StoreError::Serialize {
                    namespace: namespace.to_string(),
                    source,
                }
            })?;
            writer.flush().map_err(io_err)?;
        }
        temp.persist(&path).map_err(|e| io_err(e.error))?;
        tracing::debug!(%path, "state saved");
        Ok(())
    }

    /// Delete `namespace`. Returns whether a file was removed.
    pub fn reset(&self, namespace: Namespace) -> StoreResult<bool> {
        let path = self.path(namespace);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Delete every namespace.
    pub fn reset_all(&self) -> StoreResult<()> {
        for namespace in Namespace::ALL {
            self.reset(namespace)?;
        }
        Ok(())
    }
}
