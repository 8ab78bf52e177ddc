//! Per-table metadata read from `.metadata` files, used only to order data
//! jobs so the slowest tables start first.

use std::collections::HashMap;

/// Expected row count for one `(database, table)` pair, as recorded in the
/// dump's `<db>.<table>.metadata` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableInfo {
    /// Row count read from the `.metadata` file.
    pub rows: u64,
}

/// Maps `"<db>_<table>"` to its [`TableInfo`].
///
/// Populated once during walker pass 3 (single-threaded) and read-only for
/// the remainder of the run.
#[derive(Debug, Default)]
pub struct TableMap {
    inner: HashMap<String, TableInfo>,
}

impl TableMap {
    /// Creates an empty table map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The key a `(database, table)` pair is stored under.
    pub fn key(database: &str, table: &str) -> String {
        format!("{database}_{table}")
    }

    /// Records the row count for a table, keyed by `<db>_<table>`.
    pub fn insert(&mut self, database: &str, table: &str, info: TableInfo) {
        self.inner.insert(Self::key(database, table), info);
    }

    /// Looks up the row count for a table. Tables with no `.metadata` file
    /// are treated as zero rows, so they sort after every table that has
    /// one.
    pub fn rows_for(&self, database: &str, table: &str) -> u64 {
        self.inner
            .get(&Self::key(database, table))
            .map(|info| info.rows)
            .unwrap_or(0)
    }

    /// Number of tables with known metadata.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_table_has_zero_rows() {
        let map = TableMap::new();
        assert_eq!(map.rows_for("d", "t"), 0);
    }

    #[test]
    fn insert_and_lookup_roundtrip() {
        let mut map = TableMap::new();
        map.insert("d", "t", TableInfo { rows: 42 });
        assert_eq!(map.rows_for("d", "t"), 42);
        assert_eq!(map.len(), 1);
    }
}
