//! An in-memory [`SqlConnection`] fake, for exercising the scheduler and
//! orchestrator without a live server.
//!
//! Not behind `#[cfg(test)]`: downstream crates' test suites depend on it
//! from outside this crate.

use std::collections::HashMap;

use crate::connection::SqlConnection;
use crate::error::DbError;

/// Records every statement it is asked to execute, in order, and lets a
/// test script specific statements to fail on and canned
/// `SHOW CREATE DATABASE` responses.
#[derive(Debug, Default)]
pub struct RecordingConnection {
    statements: Vec<String>,
    failing_statements: Vec<String>,
    show_create_database: HashMap<String, Vec<String>>,
}

impl RecordingConnection {
    /// A connection that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A connection that fails `execute` for exactly this statement text,
    /// and accepts everything else.
    pub fn failing_on(statement: &str) -> Self {
        Self { failing_statements: vec![statement.to_string()], ..Self::default() }
    }

    /// Every statement executed so far, in call order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Arranges for `show_create_database(database)` to return `rows`.
    pub fn stub_show_create_database(&mut self, database: &str, rows: Vec<String>) {
        self.show_create_database.insert(database.to_string(), rows);
    }
}

impl SqlConnection for RecordingConnection {
    fn execute(&mut self, statement: &str) -> Result<(), DbError> {
        self.statements.push(statement.to_string());
        if self.failing_statements.iter().any(|s| s == statement) {
            return Err(DbError::Simulated(statement.to_string()));
        }
        Ok(())
    }

    fn show_create_database(&mut self, database: &str) -> Result<Vec<String>, DbError> {
        Ok(self.show_create_database.get(database).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_statements_in_order() {
        let mut conn = RecordingConnection::new();
        conn.execute("A").unwrap();
        conn.execute("B").unwrap();
        assert_eq!(conn.statements(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn failing_on_rejects_only_the_named_statement() {
        let mut conn = RecordingConnection::failing_on("BAD");
        assert!(conn.execute("BAD").is_err());
        assert!(conn.execute("GOOD").is_ok());
    }

    #[test]
    fn show_create_database_defaults_to_empty() {
        let mut conn = RecordingConnection::new();
        assert!(conn.show_create_database("d").unwrap().is_empty());
    }
}
