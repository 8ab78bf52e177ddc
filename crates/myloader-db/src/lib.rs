//! Connection management, session settings, statement execution, and purge
//! policy -- everything that talks to the server.

pub mod connection;
pub mod error;
pub mod executor;
pub mod purge;
pub mod session;
pub mod testing;

pub use connection::{ConnectLock, ConnectionParams, MysqlConnection, SqlConnection};
pub use error::DbError;
pub use executor::StatementExecutor;
pub use purge::{apply_purge, ensure_database};
pub use session::{redo_log_statement, session_statements};
