//! Asynchronous file downloads via curl
//!
//! Downloads run as detached curl processes so a generation stage can kick
//! off several planet/subway fetches and keep preparing while they run. The
//! returned handle is the caller's responsibility: wait on it, inspect the
//! exit status, kill it for a timeout. Network and HTTP failures never raise
//! here; they only show up as a non-zero exit status.

use crate::error::{UtilError, UtilResult};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Child;
use tokio::process::Command;
use tracing::debug;

/// Spawn a silent curl download of `url` into `dest`.
///
/// Follows redirects. Stdout and stderr are discarded; use
/// [`download_file_with_output`] to capture them. Returns immediately with
/// the child handle; the only error is a failure to spawn curl itself.
///
/// Must be called from within a Tokio runtime; `tokio::process::Command`
/// panics otherwise.
pub fn download_file(url: &str, dest: &Path) -> UtilResult<Child> {
    download_file_with_output(url, dest, Stdio::null(), Stdio::null())
}

/// Spawn a curl download with caller-supplied stdio redirections.
///
/// Must be called from within a Tokio runtime, like [`download_file`].
pub fn download_file_with_output(
    url: &str,
    dest: &Path,
    stdout: Stdio,
    stderr: Stdio,
) -> UtilResult<Child> {
    debug!("Downloading {} -> {}", url, dest.display());

    Command::new("curl")
        .arg("-s")
        .arg("-L")
        .arg("-o")
        .arg(dest)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .spawn()
        .map_err(|e| UtilError::command_failed(format!("curl -s -L -o {} {}", dest.display(), url), e))
}
