//! Classifies a dump filename by the naming convention described in spec §3.

/// What one dump-directory entry is, once its filename is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpFile {
    /// `<db>-schema-create.sql[.gz]`
    SchemaCreate { database: String },
    /// `<db>.<table>-schema.sql[.gz]`
    Schema { database: String, table: String },
    /// `<db>.<table>.<part>.sql[.gz]`
    Data { database: String, table: String, part: u64 },
    /// `<db>.<table>-schema-view.sql[.gz]`
    SchemaView { database: String, table: String },
    /// `<db>.<table>-schema-triggers.sql[.gz]`
    SchemaTriggers { database: String, table: String },
    /// `<db>-schema-post.sql[.gz]`
    SchemaPost { database: String },
    /// `<db>.<table>.metadata`
    Metadata { database: String, table: String },
    /// The root `metadata` signature file.
    MetadataSentinel,
}

/// Parses `filename` (a bare name, no directory component) into a
/// [`DumpFile`], or `None` if it matches none of the known shapes.
pub fn classify(filename: &str) -> Option<DumpFile> {
    if filename == "metadata" {
        return Some(DumpFile::MetadataSentinel);
    }

    let stem = filename.strip_suffix(".gz").unwrap_or(filename);

    if let Some(db) = stem.strip_suffix("-schema-create.sql") {
        return Some(DumpFile::SchemaCreate { database: db.to_string() });
    }
    if let Some(db) = stem.strip_suffix("-schema-post.sql") {
        return Some(DumpFile::SchemaPost { database: db.to_string() });
    }
    if let Some(rest) = stem.strip_suffix("-schema-view.sql") {
        let (db, table) = split_db_table(rest)?;
        return Some(DumpFile::SchemaView { database: db, table });
    }
    if let Some(rest) = stem.strip_suffix("-schema-triggers.sql") {
        let (db, table) = split_db_table(rest)?;
        return Some(DumpFile::SchemaTriggers { database: db, table });
    }
    if let Some(rest) = stem.strip_suffix("-schema.sql") {
        let (db, table) = split_db_table(rest)?;
        return Some(DumpFile::Schema { database: db, table });
    }
    if let Some(rest) = stem.strip_suffix(".metadata") {
        let (db, table) = split_db_table(rest)?;
        return Some(DumpFile::Metadata { database: db, table });
    }
    if let Some(rest) = stem.strip_suffix(".sql") {
        let (left, part_str) = rest.rsplit_once('.')?;
        let part: u64 = part_str.parse().ok()?;
        let (db, table) = split_db_table(left)?;
        return Some(DumpFile::Data { database: db, table, part });
    }

    None
}

/// Splits `"<db>.<table>"` on the first `.`, assuming database and table
/// names themselves contain no dots (the mydumper convention).
fn split_db_table(s: &str) -> Option<(String, String)> {
    let (db, table) = s.split_once('.')?;
    if db.is_empty() || table.is_empty() {
        return None;
    }
    Some((db.to_string(), table.to_string()))
}

/// Whether `filename` is gzip-compressed, per its `.gz` suffix.
pub fn is_compressed(filename: &str) -> bool {
    filename.ends_with(".gz")
}
