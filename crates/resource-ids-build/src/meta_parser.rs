//! YAML parser for `*.meta` resource descriptions.
//!
//! A metadata file is a YAML mapping carrying at least `tag`, `name` and
//! `guid`; `path` is optional. Other keys belong to other tools and are
//! ignored, as are custom YAML tags such as `!Texture`:
//!
//! ```yaml
//! --- !Texture
//! tag: ui
//! name: btn_ok
//! path: /button
//! guid: 0x1a2b
//! format: rgba8
//! ```

use std::path::{Path, PathBuf};

use resource_ids::{PATH_SEPARATOR, ResourceDocument};
use serde_yaml::Value;

/// Parse one metadata file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ResourceDocument, DocumentError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&content).map_err(|e| e.at(path))
}

/// Parse metadata from a YAML string.
pub fn parse_str(content: &str) -> Result<ResourceDocument, DocumentError> {
    let value: Value = serde_yaml::from_str(content).map_err(DocumentError::parse)?;
    let doc: ResourceDocument =
        serde_yaml::from_value(strip_tags(value)).map_err(DocumentError::parse)?;
    validate(&doc)?;
    Ok(doc)
}

/// Drop custom tags, keeping the tagged values.
fn strip_tags(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => strip_tags(tagged.value),
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(k, v)| (strip_tags(k), strip_tags(v)))
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(strip_tags).collect()),
        other => other,
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`, the names the emitted header can declare.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate(doc: &ResourceDocument) -> Result<(), DocumentError> {
    if doc.tag.is_empty() {
        return Err(DocumentError::validation("Empty tag not allowed"));
    }
    if !is_identifier(&doc.tag) {
        return Err(DocumentError::validation(format!(
            "Invalid tag '{}': must be an identifier",
            doc.tag
        )));
    }
    if !is_identifier(&doc.name) {
        return Err(DocumentError::validation(format!(
            "Invalid name '{}': must be an identifier",
            doc.name
        )));
    }

    if doc.path.is_empty() {
        return Ok(());
    }
    if !doc.path.starts_with(PATH_SEPARATOR) {
        return Err(DocumentError::validation(format!(
            "Invalid path '{}': must start with '{}'",
            doc.path, PATH_SEPARATOR
        )));
    }
    for seg in doc.segments() {
        if seg.is_empty() {
            return Err(DocumentError::validation(format!(
                "Invalid path '{}': empty segment",
                doc.path
            )));
        }
        if !is_identifier(seg) {
            return Err(DocumentError::validation(format!(
                "Invalid path '{}': segment '{}' must be an identifier",
                doc.path, seg
            )));
        }
    }
    Ok(())
}

/// Errors while reading a metadata file.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("IO error: failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
    #[error("Validation error{}: {message}", location(.path))]
    Validation {
        path: Option<PathBuf>,
        message: String,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl DocumentError {
    fn parse(e: serde_yaml::Error) -> Self {
        Self::Parse {
            path: None,
            message: e.to_string(),
        }
    }

    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            path: None,
            message: message.into(),
        }
    }

    /// Attach the file the error came from.
    fn at(self, file: &Path) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse {
                path: Some(file.to_path_buf()),
                message,
            },
            Self::Validation { message, .. } => Self::Validation {
                path: Some(file.to_path_buf()),
                message,
            },
            io => io,
        }
    }
}
