//! Generator configuration (`resource-ids.toml`).

use std::path::{Path, PathBuf};

use globset::Glob;
use resource_ids::{ALIGN_COLUMN, Artifacts, INDENT_WIDTH, Layout};
use serde::Deserialize;

use crate::enumerate::cache_key;
use crate::meta_parser::is_identifier;

/// Default file name of the cache store, relative to the output directory.
pub const DEFAULT_CACHE_FILE: &str = "resources.cache.toml";

/// Default metadata file pattern, applied to each input directory.
pub const DEFAULT_PATTERN: &str = "*.meta";

/// Everything one generation pass needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directories scanned for metadata files, in order.
    pub dirs: Vec<PathBuf>,
    /// File name pattern matched inside each directory.
    pub pattern: String,
    /// Directory receiving the header and source.
    pub out_dir: PathBuf,
    /// Header (declaration stream) file name.
    pub header: String,
    /// Source (definition stream) file name.
    pub source: String,
    /// Outer wrapper instance name; the type is `<wrapper>__`.
    pub wrapper: String,
    /// Cache store path. `None` means `<out_dir>/resources.cache.toml`.
    pub cache: Option<PathBuf>,
    pub layout: Layout,
    /// Regenerate even when every input is up to date.
    pub force: bool,
}

/// Raw TOML structure. All keys optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    wrapper: Option<String>,
    header: Option<String>,
    source: Option<String>,
    pattern: Option<String>,
    cache: Option<PathBuf>,
    align_column: Option<usize>,
    indent_width: Option<usize>,
}

impl GeneratorConfig {
    /// Defaults for scanning `dirs` and writing into `out_dir`.
    pub fn new(dirs: Vec<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            dirs,
            pattern: DEFAULT_PATTERN.to_string(),
            out_dir: out_dir.into(),
            header: "resources.h".to_string(),
            source: "resources.cpp".to_string(),
            wrapper: "R".to_string(),
            cache: None,
            layout: Layout::new(ALIGN_COLUMN, INDENT_WIDTH),
            force: false,
        }
    }

    /// Apply a TOML config file on top of the defaults.
    pub fn with_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.with_toml(&content)
    }

    /// Apply TOML `content` on top of the current values.
    pub fn with_toml(mut self, content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(wrapper) = raw.wrapper {
            self.wrapper = wrapper;
        }
        if let Some(header) = raw.header {
            self.header = header;
        }
        if let Some(source) = raw.source {
            self.source = source;
        }
        if let Some(pattern) = raw.pattern {
            self.pattern = pattern;
        }
        if raw.cache.is_some() {
            self.cache = raw.cache;
        }
        if let Some(align_column) = raw.align_column {
            self.layout.align_column = align_column;
        }
        if let Some(indent_width) = raw.indent_width {
            self.layout.indent_width = indent_width;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check names and the pattern before anything touches the disk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.wrapper) {
            return Err(ConfigError::Validation(format!(
                "Invalid wrapper '{}': must be an identifier",
                self.wrapper
            )));
        }
        for (key, name) in [("header", &self.header), ("source", &self.source)] {
            if name.is_empty() {
                return Err(ConfigError::Validation(format!("Empty {} file name", key)));
            }
        }
        if self.header == self.source {
            return Err(ConfigError::Validation(format!(
                "header and source both name '{}'",
                self.header
            )));
        }
        if self.layout.indent_width == 0 {
            return Err(ConfigError::Validation("indent_width must be non-zero".into()));
        }
        Glob::new(&self.pattern).map_err(|e| {
            ConfigError::Validation(format!("Invalid pattern '{}': {}", self.pattern, e))
        })?;
        Ok(())
    }

    pub fn header_path(&self) -> PathBuf {
        self.out_dir.join(&self.header)
    }

    pub fn source_path(&self) -> PathBuf {
        self.out_dir.join(&self.source)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.cache
            .clone()
            .unwrap_or_else(|| self.out_dir.join(DEFAULT_CACHE_FILE))
    }

    /// Every setting that changes what the artifacts contain, as one string.
    ///
    /// Stored in the cache store; a different fingerprint forces
    /// regeneration. `out_dir`, `cache` and `force` are not part of it.
    pub fn fingerprint(&self) -> String {
        let dirs: Vec<String> = self.dirs.iter().map(|d| cache_key(d)).collect();
        format!(
            "dirs={};pattern={};header={};source={};wrapper={};align_column={};indent_width={}",
            dirs.join(","),
            self.pattern,
            self.header,
            self.source,
            self.wrapper,
            self.layout.align_column,
            self.layout.indent_width
        )
    }

    pub fn artifacts(&self) -> Artifacts {
        Artifacts {
            wrapper: self.wrapper.clone(),
            header_name: self.header.clone(),
        }
    }
}

/// Errors while loading the generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}
