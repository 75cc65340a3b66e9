//! Error types for mapgen-util
//!
//! All modules use `UtilResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mapgen-util operations
pub type UtilResult<T> = Result<T, UtilError>;

/// All errors that can occur in mapgen-util
#[derive(Error, Debug)]
pub enum UtilError {
    // Executable lookup errors
    #[error("Executable not found: {0}")]
    ExecutableNotFound(PathBuf),

    #[error("Executable not found: {name} under {root}")]
    ExecutableNotFoundUnder { name: String, root: PathBuf },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed to spawn: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Checksum errors
    #[error("Malformed digest sidecar: {0}")]
    DigestMalformed(PathBuf),
}

impl UtilError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Check if this is an executable-lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ExecutableNotFound(_) | Self::ExecutableNotFoundUnder { .. }
        )
    }
}
