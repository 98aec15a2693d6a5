//! Cache store — last seen modification time of every metadata file.
//!
//! Persisted as TOML next to the generated artifacts:
//!
//! ```toml
//! version = 1
//! config = "dirs=res/ui;pattern=*.meta;header=resources.h;..."
//!
//! [files]
//! "res/ui/button.meta" = "2026-10-16T09:12:44.123456789Z"
//! ```
//!
//! The store is loaded at the start of every invocation, updated in memory
//! while files are checked and parsed, and written back with [`CacheStore::save`].
//! `config` holds the fingerprint of the settings the artifacts were last
//! generated with.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-disk format version.
pub const CACHE_VERSION: u32 = 1;

/// File modification time as stored in the cache.
pub type Timestamp = DateTime<Utc>;

/// Convert a filesystem modification time.
pub fn timestamp(modified: SystemTime) -> Timestamp {
    DateTime::<Utc>::from(modified)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawCache {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<String>,
    #[serde(default)]
    files: BTreeMap<String, Timestamp>,
}

/// Key → timestamp store bound to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStore {
    path: PathBuf,
    config: Option<String>,
    files: BTreeMap<String, Timestamp>,
    dirty: bool,
}

impl CacheStore {
    /// Empty store that will be saved to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: None,
            files: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Load `path`, or start empty if it does not exist yet.
    ///
    /// An unreadable or corrupt cache file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no cache store yet");
            return Ok(Self::new(path));
        }

        let content = std::fs::read_to_string(&path).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;
        let raw: RawCache = toml::from_str(&content).map_err(|e| CacheError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        if raw.version != CACHE_VERSION {
            return Err(CacheError::Version {
                path,
                found: raw.version,
            });
        }

        Ok(Self {
            path,
            config: raw.config,
            files: raw.files,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fingerprint of the settings the stored artifacts were generated with.
    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Store the settings fingerprint. Returns true if it differs from the
    /// stored one.
    pub fn set_config(&mut self, fingerprint: impl Into<String>) -> bool {
        let fingerprint = fingerprint.into();
        if self.config.as_deref() == Some(fingerprint.as_str()) {
            return false;
        }
        self.config = Some(fingerprint);
        self.dirty = true;
        true
    }

    pub fn get(&self, key: &str) -> Option<Timestamp> {
        self.files.get(key).copied()
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn record(&mut self, key: impl Into<String>, value: Timestamp) -> Option<Timestamp> {
        let previous = self.files.insert(key.into(), value);
        if previous != Some(value) {
            self.dirty = true;
        }
        previous
    }

    pub fn remove(&mut self, key: &str) -> Option<Timestamp> {
        let removed = self.files.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// True if the in-memory contents differ from what was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the store to its file, creating parent directories.
    pub fn save(&mut self) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let raw = RawCache {
            version: CACHE_VERSION,
            config: self.config.clone(),
            files: self.files.clone(),
        };
        let content = toml::to_string(&raw).map_err(|e| CacheError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(io_err)?;

        self.dirty = false;
        tracing::debug!(path = %self.path.display(), entries = self.files.len(), "saved cache store");
        Ok(())
    }
}

/// Errors while reading or writing the cache store.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("Unsupported cache version {found} in {} (expected {})", .path.display(), CACHE_VERSION)]
    Version { path: PathBuf, found: u32 },
    #[error("Serialize error: {0}")]
    Serialize(String),
}
