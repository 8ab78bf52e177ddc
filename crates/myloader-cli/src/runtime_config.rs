//! Builds the immutable [`RestoreConfig`] from parsed CLI flags.

use myloader_core::{PurgeMode, RestoreConfig};

use crate::cli::Cli;

/// Resolves purge-mode precedence and the worker thread count, then
/// assembles the run-wide configuration every phase shares by reference.
pub fn build(cli: &Cli) -> anyhow::Result<RestoreConfig> {
    let purge_mode = PurgeMode::resolve(cli.purge_mode.as_deref(), cli.overwrite_tables)?;
    let num_threads = cli.threads.unwrap_or_else(num_cpus::get).max(1);
    Ok(RestoreConfig {
        directory: cli.directory.clone(),
        num_threads,
        commit_count: cli.queries_per_transaction,
        overwrite_tables: cli.overwrite_tables,
        database: cli.database.clone(),
        source_db: cli.source_db.clone(),
        enable_binlog: cli.enable_binlog,
        innodb_optimize_keys: cli.innodb_optimize_keys,
        set_names: cli.set_names.clone(),
        purge_mode,
        sync_before_add_index: cli.sync_before_add_index,
        disable_redo_log: cli.disable_redo_log,
        rows: cli.rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn base_cli() -> Cli {
        Cli {
            directory: PathBuf::from("/tmp/dump"),
            queries_per_transaction: 1000,
            overwrite_tables: false,
            database: None,
            source_db: None,
            enable_binlog: false,
            innodb_optimize_keys: false,
            set_names: "binary".to_string(),
            logfile: None,
            purge_mode: None,
            sync_before_add_index: false,
            disable_redo_log: false,
            rows: 0,
            connection: crate::cli::ConnectionArgs {
                host: "localhost".to_string(),
                port: 3306,
                user: "root".to_string(),
                password: None,
                socket: None,
                ask_password: false,
            },
            threads: None,
            verbose: false,
        }
    }

    #[test]
    fn defaults_thread_count_to_cpu_count() {
        let config = build(&base_cli()).unwrap();
        assert_eq!(config.num_threads, num_cpus::get().max(1));
    }

    #[test]
    fn explicit_thread_count_wins() {
        let mut cli = base_cli();
        cli.threads = Some(7);
        let config = build(&cli).unwrap();
        assert_eq!(config.num_threads, 7);
    }

    #[test]
    fn zero_threads_is_clamped_to_one() {
        let mut cli = base_cli();
        cli.threads = Some(0);
        let config = build(&cli).unwrap();
        assert_eq!(config.num_threads, 1);
    }

    #[test]
    fn overwrite_tables_resolves_to_drop_purge_mode() {
        let mut cli = base_cli();
        cli.overwrite_tables = true;
        let config = build(&cli).unwrap();
        assert_eq!(config.purge_mode, PurgeMode::Drop);
    }

    #[test]
    fn unknown_purge_mode_string_is_an_error() {
        let mut cli = base_cli();
        cli.purge_mode = Some("WAT".to_string());
        assert!(build(&cli).is_err());
    }
}
