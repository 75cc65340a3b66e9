//! Digest sidecar files
//!
//! Every downloaded planet or intermediate artifact gets a companion
//! checksum file next to it, so later runs can detect corruption or
//! staleness without re-downloading. Sidecars use the `sha256sum` text
//! format (`<hex>  <basename>`), so they can be checked by hand too.

use crate::error::{UtilError, UtilResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix appended to a data file's name to form its sidecar path
pub const DIGEST_SUFFIX: &str = ".sha256";

/// Sidecar path for a data file: the same name with [`DIGEST_SUFFIX`] appended
pub fn digest_path(name: &Path) -> PathBuf {
    let mut os = name.as_os_str().to_os_string();
    os.push(DIGEST_SUFFIX);
    PathBuf::from(os)
}

/// Hash a file's contents with SHA-256, streaming
fn hash_file(path: &Path) -> UtilResult<String> {
    let mut file = fs::File::open(path)
        .map_err(|e| UtilError::io(format!("opening {} for hashing", path.display()), e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)
        .map_err(|e| UtilError::io(format!("hashing {}", path.display()), e))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Write (or overwrite) the digest sidecar for `name`
pub fn write_digest(name: &Path) -> UtilResult<()> {
    let digest = hash_file(name)?;
    let basename = name
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let sidecar = digest_path(name);
    debug!("Writing digest sidecar {}", sidecar.display());
    fs::write(&sidecar, format!("{}  {}\n", digest, basename))
        .map_err(|e| UtilError::io(format!("writing {}", sidecar.display()), e))
}

/// Recompute `name`'s digest and compare it to the one stored at `sidecar`.
///
/// Only the first whitespace-separated token of the sidecar is compared, so
/// both bare hashes and full `sha256sum` lines are accepted.
pub fn check_digest(name: &Path, sidecar: &Path) -> UtilResult<bool> {
    let stored = fs::read_to_string(sidecar)
        .map_err(|e| UtilError::io(format!("reading {}", sidecar.display()), e))?;
    let stored = stored
        .split_whitespace()
        .next()
        .ok_or_else(|| UtilError::DigestMalformed(sidecar.to_path_buf()))?
        .to_ascii_lowercase();

    Ok(hash_file(name)? == stored)
}

/// True iff both `name` and its digest sidecar exist as regular files
pub fn has_file_and_digest(name: &Path) -> bool {
    name.is_file() && digest_path(name).is_file()
}

/// Check `name` against its sidecar.
///
/// `Ok(false)` when either file is missing; no hashing happens in that case.
pub fn is_verified(name: &Path) -> UtilResult<bool> {
    if !has_file_and_digest(name) {
        return Ok(false);
    }
    check_digest(name, &digest_path(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sidecar_path_appends_suffix() {
        assert_eq!(
            digest_path(Path::new("/maps/planet.o5m")),
            PathBuf::from("/maps/planet.o5m.sha256")
        );
    }

    #[test]
    fn write_then_verify() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("planet.o5m");
        fs::write(&file, b"osm data").unwrap();

        write_digest(&file).unwrap();
        assert!(has_file_and_digest(&file));
        assert!(is_verified(&file).unwrap());
    }

    #[test]
    fn stale_digest_fails_verification() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("planet.o5m");
        fs::write(&file, b"osm data").unwrap();
        write_digest(&file).unwrap();

        fs::write(&file, b"different osm data").unwrap();
        assert!(!is_verified(&file).unwrap());
    }

    #[test]
    fn missing_sidecar_is_false_not_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("planet.o5m");
        fs::write(&file, b"osm data").unwrap();

        assert!(!has_file_and_digest(&file));
        assert!(!is_verified(&file).unwrap());
    }

    #[test]
    fn missing_data_file_is_false_not_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("planet.o5m");
        fs::write(digest_path(&file), "deadbeef  planet.o5m\n").unwrap();

        assert!(!has_file_and_digest(&file));
        assert!(!is_verified(&file).unwrap());
    }

    #[test]
    fn bare_hash_sidecar_accepted() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("data.bin");
        fs::write(&file, b"payload").unwrap();
        write_digest(&file).unwrap();

        // Rewrite the sidecar with just the hex token.
        let sidecar = digest_path(&file);
        let line = fs::read_to_string(&sidecar).unwrap();
        let token = line.split_whitespace().next().unwrap().to_string();
        fs::write(&sidecar, token).unwrap();

        assert!(is_verified(&file).unwrap());
    }

    #[test]
    fn empty_sidecar_is_malformed() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("data.bin");
        fs::write(&file, b"payload").unwrap();
        fs::write(digest_path(&file), "").unwrap();

        let err = check_digest(&file, &digest_path(&file)).unwrap_err();
        assert!(matches!(err, UtilError::DigestMalformed(_)));
    }
}
