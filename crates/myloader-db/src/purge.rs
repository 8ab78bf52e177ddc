//! Execution of the purge policy and database-creation logic (spec §4.8).

use myloader_core::{ErrorCounter, PurgeMode};
use tracing::{error, warn};

use crate::connection::SqlConnection;

/// Applies `mode` to `database`.`table` before its `CREATE TABLE` would run.
///
/// Returns `true` if the subsequent create should be skipped because the
/// table was truncated/emptied rather than dropped.
pub fn apply_purge<C: SqlConnection>(
    conn: &mut C,
    mode: PurgeMode,
    database: &str,
    table: &str,
    errors: &ErrorCounter,
) -> bool {
    match mode {
        PurgeMode::None => false,
        PurgeMode::Drop => {
            for statement in [
                format!("DROP TABLE IF EXISTS `{database}`.`{table}`"),
                format!("DROP VIEW IF EXISTS `{database}`.`{table}`"),
            ] {
                if let Err(e) = conn.execute(&statement) {
                    error!(%database, %table, error = %e, "purge statement failed");
                    errors.increment();
                }
            }
            false
        }
        PurgeMode::Truncate => {
            let statement = format!("TRUNCATE TABLE `{database}`.`{table}`");
            match conn.execute(&statement) {
                Ok(()) => mode.skips_create_on_success(),
                Err(e) => {
                    warn!(%database, %table, error = %e, "truncate failed, falling through to create");
                    false
                }
            }
        }
        PurgeMode::Delete => {
            let statement = format!("DELETE FROM `{database}`.`{table}`");
            match conn.execute(&statement) {
                Ok(()) => mode.skips_create_on_success(),
                Err(e) => {
                    warn!(%database, %table, error = %e, "delete failed, falling through to create");
                    false
                }
            }
        }
    }
}

/// Ensures `database` exists, creating it from `schema_create_sql` if given
/// or a bare `CREATE DATABASE` otherwise, unless `SHOW CREATE DATABASE`
/// already reports it present.
pub fn ensure_database<C: SqlConnection>(
    conn: &mut C,
    database: &str,
    schema_create_sql: Option<&str>,
    errors: &ErrorCounter,
) {
    let exists = matches!(conn.show_create_database(database), Ok(rows) if !rows.is_empty());
    if exists {
        return;
    }
    let create = match schema_create_sql {
        Some(sql) => sql.to_string(),
        None => format!("CREATE DATABASE `{database}`"),
    };
    if let Err(e) = conn.execute(&create) {
        error!(%database, error = %e, "database creation failed");
        errors.increment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingConnection;

    #[test]
    fn drop_mode_issues_both_drop_statements_and_does_not_skip_create() {
        let mut conn = RecordingConnection::new();
        let errors = ErrorCounter::new();
        let skip = apply_purge(&mut conn, PurgeMode::Drop, "d", "t", &errors);
        assert!(!skip);
        assert_eq!(
            conn.statements(),
            &["DROP TABLE IF EXISTS `d`.`t`".to_string(), "DROP VIEW IF EXISTS `d`.`t`".to_string()]
        );
        assert_eq!(errors.count(), 0);
    }

    #[test]
    fn successful_truncate_skips_create() {
        let mut conn = RecordingConnection::new();
        let errors = ErrorCounter::new();
        let skip = apply_purge(&mut conn, PurgeMode::Truncate, "d", "t", &errors);
        assert!(skip);
        assert_eq!(errors.count(), 0);
    }

    #[test]
    fn failing_truncate_falls_through_without_error_increment() {
        let mut conn = RecordingConnection::failing_on("TRUNCATE TABLE `d`.`t`");
        let errors = ErrorCounter::new();
        let skip = apply_purge(&mut conn, PurgeMode::Truncate, "d", "t", &errors);
        assert!(!skip);
        assert_eq!(errors.count(), 0);
    }

    #[test]
    fn none_mode_issues_nothing() {
        let mut conn = RecordingConnection::new();
        let errors = ErrorCounter::new();
        let skip = apply_purge(&mut conn, PurgeMode::None, "d", "t", &errors);
        assert!(!skip);
        assert!(conn.statements().is_empty());
    }

    #[test]
    fn ensure_database_skips_create_when_it_already_exists() {
        let mut conn = RecordingConnection::new();
        conn.stub_show_create_database("d", vec!["CREATE DATABASE d".to_string()]);
        let errors = ErrorCounter::new();
        ensure_database(&mut conn, "d", None, &errors);
        assert!(conn.statements().is_empty());
    }

    #[test]
    fn ensure_database_uses_schema_create_file_when_present() {
        let mut conn = RecordingConnection::new();
        let errors = ErrorCounter::new();
        ensure_database(&mut conn, "d", Some("CREATE DATABASE `d` /*!40100 DEFAULT CHARACTER SET utf8 */"), &errors);
        assert_eq!(conn.statements(), &["CREATE DATABASE `d` /*!40100 DEFAULT CHARACTER SET utf8 */".to_string()]);
    }

    #[test]
    fn ensure_database_falls_back_to_bare_create() {
        let mut conn = RecordingConnection::new();
        let errors = ErrorCounter::new();
        ensure_database(&mut conn, "d", None, &errors);
        assert_eq!(conn.statements(), &["CREATE DATABASE `d`".to_string()]);
    }
}
