//! SQL-text rewriting for the myloader restore engine: the fast
//! index-creation `CREATE TABLE` split and the `INSERT` row splitter.
//!
//! Both operate on statement text directly rather than through a SQL
//! parser, matching the known, narrow shape mysqldump-style dumps produce.

pub mod create_table;
pub mod error;
pub mod insert_split;

pub use create_table::{is_create_table_statement, rewrite_create_table, RewriteOutcome};
pub use error::RewriteError;
pub use insert_split::split_insert;
