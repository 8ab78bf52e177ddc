//! Error type for the SQL-text rewriters.

/// Errors that can occur while rewriting a statement.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// [`crate::rewrite_create_table`] was called on a statement that is
    /// not a `CREATE TABLE` statement.
    #[error("not a CREATE TABLE statement: {0:?}")]
    NotCreateTable(String),
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, RewriteError>;
