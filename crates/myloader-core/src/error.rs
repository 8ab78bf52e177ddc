//! Core error types shared by the scheduling and data-model layers.

/// Errors that can occur while building or validating the restore state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A purge-mode string did not match one of the known variants.
    #[error("unknown purge mode {0:?}, expected one of NONE, DROP, TRUNCATE, DELETE")]
    UnknownPurgeMode(String),

    /// A `.metadata` file did not contain a parseable row count.
    #[error("invalid row count in metadata file {path}: {reason}")]
    InvalidRowCount {
        /// The metadata file that failed to parse.
        path: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The dump directory did not exist or was not a directory.
    #[error("directory does not exist: {0}")]
    DirectoryNotFound(String),

    /// The dump directory did not contain a `metadata` sentinel file.
    #[error("{0} is not a mydumper-style backup (no metadata file found)")]
    NotABackup(String),
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
