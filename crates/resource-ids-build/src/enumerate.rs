//! Metadata file discovery.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use globset::{Glob, GlobMatcher};

/// A file matched inside one input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaFile {
    /// Full path (`<dir>/<file name>`); also the cache key.
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl MetaFile {
    /// Cache store key for this file.
    pub fn key(&self) -> String {
        cache_key(&self.path)
    }
}

/// Cache store key for a file path.
pub fn cache_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Lists files directly inside a directory whose names match a pattern.
#[derive(Debug, Clone)]
pub struct FileEnumerator {
    matcher: GlobMatcher,
}

impl FileEnumerator {
    pub fn new(pattern: &str) -> Result<Self, EnumerateError> {
        let glob = Glob::new(pattern).map_err(|e| EnumerateError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    /// Whether a bare file name matches the pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }

    /// Matching regular files in `dir`, sorted by file name.
    ///
    /// A missing directory yields no files. Subdirectories are not entered.
    pub fn list(&self, dir: &Path) -> Result<Vec<MetaFile>, EnumerateError> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(dir = %dir.display(), "input directory does not exist");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(EnumerateError::Io {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_err(dir))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !self.matches(name) {
                continue;
            }

            let path = entry.path();
            let metadata = std::fs::metadata(&path).map_err(io_err(&path))?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().map_err(io_err(&path))?;
            files.push(MetaFile { path, modified });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!(dir = %dir.display(), count = files.len(), "enumerated metadata files");
        Ok(files)
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> EnumerateError {
    let path = path.to_path_buf();
    move |source| EnumerateError::Io { path, source }
}

/// Errors while listing input directories.
#[derive(Debug, thiserror::Error)]
pub enum EnumerateError {
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
    #[error("IO error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
