//! Per-connection session settings applied once at worker and orchestrator
//! startup (spec §6).

use myloader_core::RestoreConfig;

/// The statements every connection issues right after opening, in order.
pub fn session_statements(config: &RestoreConfig) -> Vec<String> {
    let mut statements = vec!["SET SESSION wait_timeout = 2147483".to_string()];
    if !config.enable_binlog {
        statements.push("SET SQL_LOG_BIN=0".to_string());
    }
    statements.push(config.set_names_statement());
    statements.push("SET SQL_MODE='NO_AUTO_VALUE_ON_ZERO'".to_string());
    statements.push("SET UNIQUE_CHECKS=0".to_string());
    statements.push("SET FOREIGN_KEY_CHECKS=0".to_string());
    if config.commit_count > 1 {
        statements.push("SET autocommit=0".to_string());
    }
    statements
}

/// The `ALTER INSTANCE ... INNODB REDO_LOG` statement to bracket the run
/// with, when `--disable-redo-log` is set.
pub fn redo_log_statement(disable: bool) -> &'static str {
    if disable {
        "ALTER INSTANCE DISABLE INNODB REDO_LOG"
    } else {
        "ALTER INSTANCE ENABLE INNODB REDO_LOG"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn base_config() -> RestoreConfig {
        RestoreConfig {
            directory: PathBuf::from("/tmp/dump"),
            num_threads: 4,
            commit_count: 1000,
            overwrite_tables: false,
            database: None,
            source_db: None,
            enable_binlog: false,
            innodb_optimize_keys: false,
            set_names: "binary".to_string(),
            purge_mode: myloader_core::PurgeMode::None,
            sync_before_add_index: false,
            disable_redo_log: false,
            rows: 0,
        }
    }

    #[test]
    fn disables_binlog_by_default() {
        let statements = session_statements(&base_config());
        assert!(statements.contains(&"SET SQL_LOG_BIN=0".to_string()));
    }

    #[test]
    fn enable_binlog_skips_the_disable_statement() {
        let mut config = base_config();
        config.enable_binlog = true;
        let statements = session_statements(&config);
        assert!(!statements.contains(&"SET SQL_LOG_BIN=0".to_string()));
    }

    #[test]
    fn commit_batching_enables_manual_autocommit() {
        let mut config = base_config();
        config.commit_count = 500;
        let statements = session_statements(&config);
        assert!(statements.contains(&"SET autocommit=0".to_string()));
    }

    #[test]
    fn commit_count_of_one_leaves_autocommit_alone() {
        let mut config = base_config();
        config.commit_count = 1;
        let statements = session_statements(&config);
        assert!(!statements.iter().any(|s| s.contains("autocommit")));
    }

    #[test]
    fn set_names_is_version_gated() {
        let statements = session_statements(&base_config());
        assert!(statements.contains(&"/*!40101 SET NAMES binary*/".to_string()));
    }

    #[test]
    fn redo_log_toggle_picks_direction() {
        assert_eq!(redo_log_statement(true), "ALTER INSTANCE DISABLE INNODB REDO_LOG");
        assert_eq!(redo_log_statement(false), "ALTER INSTANCE ENABLE INNODB REDO_LOG");
    }
}
