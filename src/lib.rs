//! mapgen-util - Filesystem and process utilities for map generation
//!
//! Thin wrappers over OS primitives used throughout the pipeline: locating
//! tool binaries, spawning background downloads, digest sidecar bookkeeping,
//! directory publishing, and tarball creation.

pub mod archive;
pub mod checksum;
pub mod download;
pub mod error;
pub mod exec;
pub mod fsops;

pub use archive::make_tarfile;
pub use checksum::{digest_path, has_file_and_digest, is_verified, write_digest};
pub use download::{download_file, download_file_with_output};
pub use error::{UtilError, UtilResult};
pub use exec::{is_executable, ExecFinder};
pub use fsops::{copy_overwrite, symlink_force};
