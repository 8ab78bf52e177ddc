//! Four-pass dump directory walk (spec §4.5): schema files, a count of data
//! files, per-table row counts, and the ordered list of data jobs.

use std::fs;
use std::path::{Path, PathBuf};

use myloader_core::{CoreError, RestoreConfig, RestoreJob, TableInfo, TableMap};

use crate::dump_file::{self, DumpFile};
use crate::error::WalkError;

/// A table-scoped schema file (`-schema.sql`, `-schema-view.sql`, or
/// `-schema-triggers.sql`).
#[derive(Debug, Clone)]
pub struct SchemaFile {
    pub database: String,
    pub table: String,
    pub path: PathBuf,
}

/// A database-scoped schema file (`-schema-create.sql` or
/// `-schema-post.sql`).
#[derive(Debug, Clone)]
pub struct DatabaseSchemaFile {
    pub database: String,
    pub path: PathBuf,
}

/// Everything the walker collects from one pass over a dump directory.
#[derive(Debug, Default)]
pub struct WalkResult {
    pub schema_create_files: Vec<DatabaseSchemaFile>,
    pub schema_files: Vec<SchemaFile>,
    pub schema_post_files: Vec<DatabaseSchemaFile>,
    pub schema_view_files: Vec<SchemaFile>,
    pub schema_trigger_files: Vec<SchemaFile>,
    pub total_data_sql_files: usize,
    pub tables: TableMap,
    /// Data jobs ordered for pass-4 submission: descending by the owning
    /// table's row count, ties broken by directory-enumeration order.
    pub data_jobs: Vec<RestoreJob>,
}

/// Confirms `directory` exists and contains the `metadata` sentinel file
/// mydumper-style dumps are required to carry.
pub fn ensure_backup_directory(directory: &Path) -> Result<(), WalkError> {
    if !directory.is_dir() {
        return Err(CoreError::DirectoryNotFound(directory.display().to_string()).into());
    }
    if !directory.join("metadata").is_file() {
        return Err(CoreError::NotABackup(directory.display().to_string()).into());
    }
    Ok(())
}

/// Runs all four passes and returns the combined result.
pub fn walk(directory: &Path, config: &RestoreConfig) -> Result<WalkResult, WalkError> {
    ensure_backup_directory(directory)?;
    let entries = list_entries(directory)?;

    let mut result = WalkResult::default();
    let mut data_entries: Vec<(String, String, u64, String)> = Vec::new();

    for name in &entries {
        if !config.accepts_source(name) {
            continue;
        }
        match dump_file::classify(name) {
            Some(DumpFile::SchemaCreate { database }) => {
                result.schema_create_files.push(DatabaseSchemaFile { database, path: directory.join(name) });
            }
            Some(DumpFile::SchemaPost { database }) => {
                result.schema_post_files.push(DatabaseSchemaFile { database, path: directory.join(name) });
            }
            Some(DumpFile::Schema { database, table }) => {
                result.schema_files.push(SchemaFile { database, table, path: directory.join(name) });
            }
            Some(DumpFile::SchemaView { database, table }) => {
                result.schema_view_files.push(SchemaFile { database, table, path: directory.join(name) });
            }
            Some(DumpFile::SchemaTriggers { database, table }) => {
                result.schema_trigger_files.push(SchemaFile { database, table, path: directory.join(name) });
            }
            Some(DumpFile::Data { database, table, part }) => {
                data_entries.push((database, table, part, name.clone()));
            }
            _ => {}
        }
    }

    result.total_data_sql_files = data_entries.len();

    for name in &entries {
        if let Some(DumpFile::Metadata { database, table }) = dump_file::classify(name) {
            let rows = read_row_count(&directory.join(name))?;
            result.tables.insert(&database, &table, TableInfo { rows });
        }
    }

    let mut indexed: Vec<usize> = (0..data_entries.len()).collect();
    indexed.sort_by(|&a, &b| {
        let (db_a, table_a, ..) = &data_entries[a];
        let (db_b, table_b, ..) = &data_entries[b];
        let rows_a = result.tables.rows_for(db_a, table_a);
        let rows_b = result.tables.rows_for(db_b, table_b);
        rows_b.cmp(&rows_a).then(a.cmp(&b))
    });

    result.data_jobs = indexed
        .into_iter()
        .map(|i| {
            let (db, table, part, filename) = &data_entries[i];
            let target_db = config.target_database(db);
            RestoreJob::from_file(filename.clone(), target_db.to_string(), table.clone(), *part)
        })
        .collect();

    Ok(result)
}

/// Lists file (not directory) names directly under `directory`, in
/// whatever order the OS returns them.
fn list_entries(directory: &Path) -> Result<Vec<String>, WalkError> {
    let read_dir = fs::read_dir(directory).map_err(|source| WalkError::ReadDir {
        path: directory.display().to_string(),
        source,
    })?;
    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| WalkError::ReadDir {
            path: directory.display().to_string(),
            source,
        })?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

fn read_row_count(path: &Path) -> Result<u64, WalkError> {
    let text = fs::read_to_string(path).map_err(|source| WalkError::Open {
        path: path.display().to_string(),
        source,
    })?;
    text.trim().parse::<u64>().map_err(|e| {
        CoreError::InvalidRowCount {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn base_config(dir: &Path) -> RestoreConfig {
        RestoreConfig {
            directory: dir.to_path_buf(),
            num_threads: 2,
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

    fn touch(dir: &Path, name: &str, contents: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn missing_metadata_sentinel_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_backup_directory(dir.path());
        assert!(err.is_err());
    }

    #[test]
    fn empty_backup_walks_to_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "metadata", "");
        let config = base_config(dir.path());
        let result = walk(dir.path(), &config).unwrap();
        assert_eq!(result.total_data_sql_files, 0);
        assert!(result.data_jobs.is_empty());
        assert!(result.schema_files.is_empty());
    }

    #[test]
    fn orders_data_jobs_by_descending_row_count() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "metadata", "");
        touch(dir.path(), "d.small.0.sql", "INSERT INTO small VALUES(1);\n");
        touch(dir.path(), "d.big.0.sql", "INSERT INTO big VALUES(1);\n");
        touch(dir.path(), "d.small.metadata", "5");
        touch(dir.path(), "d.big.metadata", "500");

        let config = base_config(dir.path());
        let result = walk(dir.path(), &config).unwrap();
        assert_eq!(result.total_data_sql_files, 2);
        assert_eq!(result.data_jobs.len(), 2);
        assert_eq!(result.data_jobs[0].table.as_deref(), Some("big"));
        assert_eq!(result.data_jobs[1].table.as_deref(), Some("small"));
    }

    #[test]
    fn ties_preserve_directory_enumeration_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "metadata", "");
        touch(dir.path(), "d.t.0.sql", "INSERT INTO t VALUES(1);\n");
        touch(dir.path(), "d.t.1.sql", "INSERT INTO t VALUES(2);\n");
        touch(dir.path(), "d.t.metadata", "10");

        let config = base_config(dir.path());
        let result = walk(dir.path(), &config).unwrap();
        assert_eq!(result.data_jobs.len(), 2);
        // Neither has a row-count tiebreaker advantage; both map to the
        // same table, so original enumeration order is preserved.
        let parts: Vec<u64> = result.data_jobs.iter().map(|j| j.part).collect();
        let mut sorted = parts.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1]);
    }

    #[test]
    fn source_db_filter_excludes_other_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "metadata", "");
        touch(dir.path(), "wanted.t.0.sql", "INSERT INTO t VALUES(1);\n");
        touch(dir.path(), "other.t.0.sql", "INSERT INTO t VALUES(1);\n");

        let mut config = base_config(dir.path());
        config.source_db = Some("wanted".to_string());
        let result = walk(dir.path(), &config).unwrap();
        assert_eq!(result.total_data_sql_files, 1);
        assert_eq!(result.data_jobs[0].database, "wanted");
    }

    #[test]
    fn database_remap_applies_to_data_job_targets() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "metadata", "");
        touch(dir.path(), "src.t.0.sql", "INSERT INTO t VALUES(1);\n");

        let mut config = base_config(dir.path());
        config.database = Some("dest".to_string());
        let result = walk(dir.path(), &config).unwrap();
        assert_eq!(result.data_jobs[0].database, "dest");
    }

    #[test]
    fn invalid_metadata_contents_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "metadata", "");
        touch(dir.path(), "d.t.metadata", "not-a-number");
        let config = base_config(dir.path());
        assert!(walk(dir.path(), &config).is_err());
    }
}
