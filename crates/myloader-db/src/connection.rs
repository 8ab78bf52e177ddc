//! The connection abstraction every worker and the orchestrator execute
//! statements through.
//!
//! Kept as a trait so the scheduler and orchestrator can be exercised
//! against [`crate::testing::RecordingConnection`] without a live server.

use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder};

use crate::error::DbError;

/// What any connection to the server -- real or fake -- must support.
pub trait SqlConnection {
    /// Executes `statement`, discarding any result set.
    fn execute(&mut self, statement: &str) -> Result<(), DbError>;

    /// Runs `SHOW CREATE DATABASE` for `database`, returning the create
    /// statement if the database exists, or an empty vector if the query
    /// succeeded but returned no rows.
    fn show_create_database(&mut self, database: &str) -> Result<Vec<String>, DbError>;
}

/// Serializes client-library init across threads (spec §4.6, §5): the
/// underlying `mysql` client is not safe for parallel connection setup, so
/// the orchestrator and every worker open their connection while holding
/// this lock and release it immediately afterwards.
#[derive(Default)]
pub struct ConnectLock(std::sync::Mutex<()>);

impl ConnectLock {
    /// A fresh, unheld lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `connect` while holding the lock. A prior panic while holding
    /// this lock poisons it; a poisoned lock still protects correctness
    /// here (it only ever guards a short, non-reentrant init call), so we
    /// recover the guard rather than propagate the poison.
    pub fn guarded<T>(&self, connect: impl FnOnce() -> Result<T, DbError>) -> Result<T, DbError> {
        let _guard = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        connect()
    }
}

/// Connection parameters common to the orchestrator connection and every
/// worker connection.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub socket: Option<String>,
}

/// A real connection to the server, backed by the `mysql` crate's
/// synchronous client.
pub struct MysqlConnection {
    conn: Conn,
}

impl MysqlConnection {
    /// Opens a new connection. Client-library init is not thread-safe; the
    /// caller is responsible for serializing concurrent calls to this
    /// function with a mutex (spec §4.6, §5).
    pub fn connect(params: &ConnectionParams) -> Result<Self, DbError> {
        let mut builder = OptsBuilder::new()
            .ip_or_hostname(Some(params.host.clone()))
            .tcp_port(params.port)
            .user(Some(params.user.clone()))
            .pass(params.password.clone());
        if let Some(socket) = &params.socket {
            builder = builder.socket(Some(socket.clone()));
        }
        let conn = Conn::new(builder).map_err(DbError::Connect)?;
        Ok(Self { conn })
    }
}

impl SqlConnection for MysqlConnection {
    fn execute(&mut self, statement: &str) -> Result<(), DbError> {
        self.conn
            .query_drop(statement)
            .map_err(|source| DbError::Query { statement: statement.to_string(), source })
    }

    fn show_create_database(&mut self, database: &str) -> Result<Vec<String>, DbError> {
        let stmt = format!("SHOW CREATE DATABASE `{database}`");
        let rows: Vec<(String, String)> =
            self.conn.query(&stmt).map_err(|source| DbError::Query { statement: stmt.clone(), source })?;
        Ok(rows.into_iter().map(|(_, create)| create).collect())
    }
}
