//! Errors surfaced while walking a dump directory or streaming a dump file.

/// Failures from the walker and script reader.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// A file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// The file that failed to open.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A read from an already-open file failed (not EOF).
    #[error("read error: {0}")]
    Read(String),

    /// The directory itself could not be listed.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        /// The directory that failed to list.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A structural problem with the dump directory or its contents.
    #[error(transparent)]
    Core(#[from] myloader_core::CoreError),
}
