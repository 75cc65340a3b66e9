//! Tarball creation for publishing build artifacts
//!
//! Finished map directories are shipped as gzip-compressed tarballs. Entries
//! are rooted at the source directory's base name, so extraction recreates a
//! single top-level directory rather than an absolute-path hierarchy.

use crate::error::{UtilError, UtilResult};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Create a gzip-compressed tar archive of `source_dir` at `output`.
///
/// An existing file at `output` is overwritten.
pub fn make_tarfile(output: &Path, source_dir: &Path) -> UtilResult<()> {
    let base = source_dir.file_name().unwrap_or(OsStr::new("."));
    debug!(
        "Archiving {} -> {}",
        source_dir.display(),
        output.display()
    );

    let file = fs::File::create(output)
        .map_err(|e| UtilError::io(format!("creating {}", output.display()), e))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    builder
        .append_dir_all(base, source_dir)
        .map_err(|e| UtilError::io(format!("archiving {}", source_dir.display()), e))?;

    // finish() flushes the tar trailer and the gzip stream.
    let encoder = builder
        .into_inner()
        .map_err(|e| UtilError::io(format!("finalizing {}", output.display()), e))?;
    encoder
        .finish()
        .map_err(|e| UtilError::io(format!("finalizing {}", output.display()), e))?;

    Ok(())
}
