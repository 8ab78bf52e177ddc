//! Errors from connecting to and executing statements against the server.

/// Failures from the connection and statement-execution layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Opening the connection failed.
    #[error("failed to connect: {0}")]
    Connect(#[source] mysql::Error),

    /// A statement failed to execute.
    #[error("statement failed: {statement}: {source}")]
    Query {
        /// The statement that failed.
        statement: String,
        /// The underlying driver error.
        source: mysql::Error,
    },

    /// A statement failed in [`crate::testing::RecordingConnection`], which
    /// has no real driver error to report.
    #[error("statement failed: {0}")]
    Simulated(String),
}
