//! Locating pipeline tool binaries
//!
//! The generator stages shell out to native tools (generator_tool, osm2ft,
//! mwm_diff_tool) that live somewhere under a build directory. Lookups walk
//! the tree once and are memoized per `(root, name)` for the life of the
//! finder, including negative outcomes.

use crate::error::{UtilError, UtilResult};
use std::collections::HashMap;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use walkdir::WalkDir;

/// True iff `path` names an existing regular file with an execute bit set.
pub fn is_executable(path: &Path) -> bool {
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// Memoized outcome of a single lookup
#[derive(Debug, Clone)]
enum Lookup {
    Found(PathBuf),
    Missing,
}

/// Executable finder with a per-instance memoization cache
///
/// Outcomes (hits and misses alike) are remembered per `(root, name)` pair;
/// a repeated call never re-touches the filesystem. Shareable across threads;
/// the cache is guarded by a mutex.
#[derive(Debug, Default)]
pub struct ExecFinder {
    cache: Mutex<HashMap<(PathBuf, Option<String>), Lookup>>,
}

impl ExecFinder {
    /// Create a finder with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Locate an executable.
    ///
    /// With `exe = None`, `root` itself is the candidate and is returned iff
    /// it is executable. With `exe = Some(name)`, the subtree under `root` is
    /// walked in lexical order and the first executable entry named exactly
    /// `name` wins.
    pub fn find(&self, root: &Path, exe: Option<&str>) -> UtilResult<PathBuf> {
        let key = (root.to_path_buf(), exe.map(str::to_string));

        let mut cache = self.cache.lock().expect("exec cache poisoned");
        if let Some(hit) = cache.get(&key) {
            debug!("Executable lookup cache hit: {:?}", key);
            return Self::replay(&key, hit);
        }

        let outcome = match Self::scan(root, exe) {
            Some(path) => Lookup::Found(path),
            None => Lookup::Missing,
        };
        let result = Self::replay(&key, &outcome);
        cache.insert(key, outcome);
        result
    }

    /// Forget all memoized outcomes
    pub fn clear(&self) {
        self.cache.lock().expect("exec cache poisoned").clear();
    }

    fn scan(root: &Path, exe: Option<&str>) -> Option<PathBuf> {
        let Some(name) = exe else {
            return is_executable(root).then(|| root.to_path_buf());
        };

        debug!("Searching for {} under {}", name, root.display());
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_name() == name && is_executable(entry.path()))
            .map(|entry| entry.into_path())
    }

    // Turn a memoized outcome back into the caller-visible result. Failures
    // are reconstructed from the cache key so they replay identically.
    fn replay(key: &(PathBuf, Option<String>), outcome: &Lookup) -> UtilResult<PathBuf> {
        match (outcome, &key.1) {
            (Lookup::Found(path), _) => Ok(path.clone()),
            (Lookup::Missing, None) => Err(UtilError::ExecutableNotFound(key.0.clone())),
            (Lookup::Missing, Some(name)) => Err(UtilError::ExecutableNotFoundUnder {
                name: name.clone(),
                root: key.0.clone(),
            }),
        }
    }
}
