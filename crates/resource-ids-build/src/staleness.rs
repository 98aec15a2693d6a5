//! Incremental rebuild check.
//!
//! Compares the modification time of every matched metadata file with the
//! value recorded in the [`CacheStore`]. Any new, changed or vanished file
//! makes the whole set stale, as does a change of the generator settings. Every checked file's current timestamp is
//! recorded, whatever the verdict, so the next check compares against this
//! pass.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::cache::{CacheStore, timestamp};
use crate::enumerate::{EnumerateError, FileEnumerator};

/// Outcome of a staleness check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Staleness {
    /// Files with no recorded timestamp.
    pub added: Vec<String>,
    /// Files whose timestamp differs from the recorded one.
    pub modified: Vec<String>,
    /// Recorded files not matched by this pass: deleted, renamed, or in a
    /// directory that is no longer scanned.
    pub removed: Vec<String>,
    /// The generator settings differ from those of the last generation.
    pub config_changed: bool,
    /// Number of files matched across all directories.
    pub checked: usize,
}

impl Staleness {
    pub fn is_up_to_date(&self) -> bool {
        !self.config_changed
            && self.added.is_empty()
            && self.modified.is_empty()
            && self.removed.is_empty()
    }
}

/// Check every file matched in `dirs` against `cache`.
///
/// A directory matching nothing contributes nothing. Cached keys not matched
/// in this pass are pruned. The cache is only updated in memory; persisting
/// it is up to the caller.
pub fn check(
    dirs: &[PathBuf],
    enumerator: &FileEnumerator,
    cache: &mut CacheStore,
) -> Result<Staleness, EnumerateError> {
    let mut result = Staleness::default();
    let mut seen: HashSet<String> = HashSet::new();

    for dir in dirs {
        for file in enumerator.list(dir)? {
            let key = file.key();
            let current = timestamp(file.modified);

            match cache.record(key.clone(), current) {
                None => {
                    tracing::debug!(file = %key, "new metadata file");
                    result.added.push(key.clone());
                }
                Some(previous) if previous != current => {
                    tracing::debug!(file = %key, %previous, %current, "metadata file changed");
                    result.modified.push(key.clone());
                }
                Some(_) => {}
            }

            result.checked += 1;
            seen.insert(key);
        }
    }

    let vanished: Vec<String> = cache
        .keys()
        .filter(|key| !seen.contains(*key))
        .map(str::to_string)
        .collect();
    for key in vanished {
        tracing::debug!(file = %key, "metadata file removed");
        cache.remove(&key);
        result.removed.push(key);
    }

    tracing::info!(
        checked = result.checked,
        added = result.added.len(),
        modified = result.modified.len(),
        removed = result.removed.len(),
        up_to_date = result.is_up_to_date(),
        "staleness check"
    );
    Ok(result)
}
