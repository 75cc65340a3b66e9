//! Directory replacement and symlink maintenance
//!
//! The pipeline publishes each build into a versioned directory and keeps a
//! `latest`-style symlink pointing at it. Both operations here are
//! deliberately blunt: `copy_overwrite` is not atomic and performs no
//! rollback, and `symlink_force` converges on the desired link instead of
//! failing when one already exists.

use crate::error::{UtilError, UtilResult};
use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::Path;
use tracing::debug;

/// Replace `dest` with a recursive copy of `source`.
///
/// An existing `dest` (file or directory) is removed first. A crash midway
/// can leave `dest` partial or absent; callers that need atomicity must
/// stage into a temporary path themselves.
pub fn copy_overwrite(source: &Path, dest: &Path) -> UtilResult<()> {
    if dest.symlink_metadata().is_ok() {
        debug!("Removing existing destination {}", dest.display());
        remove_any(dest)?;
    }

    debug!("Copying {} -> {}", source.display(), dest.display());
    copy_dir_recursive(source, dest)
        .map_err(|e| UtilError::io(format!("copying {} to {}", source.display(), dest.display()), e))
}

fn remove_any(path: &Path) -> UtilResult<()> {
    let meta = path
        .symlink_metadata()
        .map_err(|e| UtilError::io(format!("inspecting {}", path.display()), e))?;
    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| UtilError::io(format!("removing {}", path.display()), e))
}

fn copy_dir_recursive(source: &Path, target: &Path) -> io::Result<()> {
    fs::create_dir_all(target)?;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let source_path = entry.path();
        let target_path = target.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            copy_dir_recursive(&source_path, &target_path)?;
        } else if file_type.is_symlink() {
            let referent = fs::read_link(&source_path)?;
            symlink(referent, target_path)?;
        } else {
            fs::copy(source_path, target_path)?;
        }
    }

    Ok(())
}

/// Create a symlink at `link_name` pointing to `target`.
///
/// If `link_name` already exists it is removed and creation retried exactly
/// once, so repeated calls converge on the same end state. Every other
/// failure kind propagates untouched.
pub fn symlink_force(target: &Path, link_name: &Path) -> UtilResult<()> {
    match symlink(target, link_name) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!("Replacing existing link {}", link_name.display());
            fs::remove_file(link_name)
                .map_err(|e| UtilError::io(format!("removing {}", link_name.display()), e))?;
            symlink(target, link_name).map_err(|e| {
                UtilError::io(
                    format!("linking {} -> {}", link_name.display(), target.display()),
                    e,
                )
            })
        }
        Err(e) => Err(UtilError::io(
            format!("linking {} -> {}", link_name.display(), target.display()),
            e,
        )),
    }
}
