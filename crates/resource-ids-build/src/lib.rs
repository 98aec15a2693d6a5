//! Build-time generator for resource-ids.
//!
//! This crate provides tools for:
//! - Discovering `*.meta` resource descriptions in a set of directories
//! - Parsing them (YAML) into [`ResourceDocument`]s
//! - Skipping regeneration when no metadata file changed since the last pass
//! - Writing the `resources.h` / `resources.cpp` pair
//!
//! # Usage in build.rs
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     let config = resource_ids_build::GeneratorConfig::new(vec!["res/ui".into()], "gen");
//!     for line in resource_ids_build::rerun_if_changed(&config) {
//!         println!("{}", line);
//!     }
//!     resource_ids_build::generate_with_config(&config)
//!         .expect("Failed to generate resource IDs");
//! }
//! ```
//!
//! # Incremental Rebuilds
//!
//! Every pass records the modification time of each metadata file in a
//! cache store (`resources.cache.toml` in the output directory by default):
//!
//! - First pass: everything is new, artifacts are generated
//! - Later passes: if every file still carries its recorded timestamp, no
//!   file removed, and both artifacts exist, nothing is written
//! - Any added, modified or removed file: full regeneration
//! - Changed generator settings (wrapper, file names, layout, pattern or
//!   directory list): full regeneration
//!
//! The cache is only written after the artifacts were generated
//! successfully, so a failed pass is always retried.

mod cache;
mod config;
mod enumerate;
pub mod logging;
mod meta_parser;
mod staleness;

pub use cache::{CACHE_VERSION, CacheError, CacheStore, Timestamp, timestamp};
pub use config::{ConfigError, DEFAULT_CACHE_FILE, DEFAULT_PATTERN, GeneratorConfig};
pub use enumerate::{EnumerateError, FileEnumerator, MetaFile, cache_key};
pub use meta_parser::{DocumentError, is_identifier, parse_file, parse_str};
pub use staleness::{Staleness, check};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use resource_ids::{Emitter, ResourceDocument, Tree};

/// Result of a generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing changed; artifacts left untouched.
    UpToDate,
    /// Artifacts were (re)written.
    Regenerated,
}

impl Status {
    /// Process exit code: `0` regenerated, `1` up to date.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Regenerated => 0,
            Self::UpToDate => 1,
        }
    }
}

/// Exit code for any failed pass.
pub const EXIT_FAILURE: i32 = 2;

/// Main entry point for build.rs integration.
///
/// Scans `dirs` for `*.meta` files and writes `resources.h` and
/// `resources.cpp` into `out_dir`, unless every input is up to date.
///
/// # Errors
///
/// Returns an error if:
/// - a metadata file cannot be read or parsed
/// - the cache store cannot be read or written
/// - an artifact cannot be written
///
/// # Example
///
/// ```ignore
/// // build.rs
/// fn main() {
///     resource_ids_build::generate(["res/ui", "res/sound"], "gen")
///         .expect("Failed to generate resource IDs");
/// }
/// ```
pub fn generate<I, P>(dirs: I, out_dir: impl Into<PathBuf>) -> Result<Status, GenerateError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let dirs = dirs.into_iter().map(Into::into).collect();
    generate_with_config(&GeneratorConfig::new(dirs, out_dir))
}

/// Generate with an explicit configuration.
pub fn generate_with_config(config: &GeneratorConfig) -> Result<Status, GenerateError> {
    config.validate()?;
    let enumerator = FileEnumerator::new(&config.pattern)?;

    // 1. Load the cache store
    let mut cache = CacheStore::open(config.cache_path())?;

    // 2. Skip if nothing changed
    let mut staleness = check(&config.dirs, &enumerator, &mut cache)?;
    staleness.config_changed = cache.set_config(config.fingerprint());
    if staleness.config_changed {
        tracing::info!(fingerprint = %config.fingerprint(), "generator settings changed");
    }
    let outputs_exist = config.header_path().exists() && config.source_path().exists();
    if staleness.is_up_to_date() && outputs_exist && !config.force {
        tracing::info!("resources up to date, skipping generation");
        return Ok(Status::UpToDate);
    }
    if !outputs_exist {
        tracing::info!("artifacts missing, regenerating");
    } else if config.force {
        tracing::info!("regeneration forced");
    }

    // 3. Open both artifacts and write their prologues
    std::fs::create_dir_all(&config.out_dir).map_err(|source| GenerateError::Io {
        path: config.out_dir.clone(),
        source,
    })?;
    let header_path = config.header_path();
    let source_path = config.source_path();
    let mut header = create(&header_path)?;
    let mut source = create(&source_path)?;

    let artifacts = config.artifacts();
    let mut emitter = Emitter::new(config.layout, &mut header, &mut source);
    emitter.write_prologue(&artifacts)?;

    // 4. Parse every metadata file, recording its timestamp
    let docs = load_documents(config, &enumerator, &mut cache)?;

    // 5. Build the tree and emit it
    let tree = Tree::build(&docs);
    tracing::info!(
        documents = docs.len(),
        tags = tree.len(),
        header = %header_path.display(),
        "emitting resource table"
    );
    emitter.emit_tree(&tree)?;
    emitter.write_epilogue(&artifacts)?;
    header.flush()?;
    source.flush()?;

    // 6. Persist the cache
    cache.save()?;

    Ok(Status::Regenerated)
}

/// Parse all metadata files of `config.dirs`, in directory order.
fn load_documents(
    config: &GeneratorConfig,
    enumerator: &FileEnumerator,
    cache: &mut CacheStore,
) -> Result<Vec<ResourceDocument>, GenerateError> {
    let mut docs = Vec::new();
    for dir in &config.dirs {
        for file in enumerator.list(dir)? {
            cache.record(file.key(), timestamp(file.modified));
            tracing::debug!(file = %file.path.display(), "parsing metadata");
            docs.push(parse_file(&file.path)?);
        }
    }
    Ok(docs)
}

fn create(path: &Path) -> Result<BufWriter<File>, GenerateError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| GenerateError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// `cargo:rerun-if-changed` lines for a build script, one per input
/// directory.
pub fn rerun_if_changed(config: &GeneratorConfig) -> Vec<String> {
    config
        .dirs
        .iter()
        .map(|dir| format!("cargo:rerun-if-changed={}", dir.display()))
        .collect()
}

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Invalid generator configuration
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
    /// Failed to list an input directory
    #[error("Enumerate error: {0}")]
    EnumerateError(#[from] EnumerateError),
    /// Failed to read or parse a metadata file
    #[error("Document error: {0}")]
    DocumentError(#[from] DocumentError),
    /// Failed to read/write the cache store
    #[error("Cache error: {0}")]
    CacheError(#[from] CacheError),
    /// Failed to create an artifact or the output directory
    #[error("IO error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed while writing artifact contents
    #[error("IO error while writing artifacts: {0}")]
    Write(#[from] std::io::Error),
}
