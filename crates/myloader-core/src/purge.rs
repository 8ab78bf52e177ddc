//! Purge-mode policy: what to do with a pre-existing table before restoring it.

use std::str::FromStr;

use crate::error::CoreError;

/// Policy applied to a pre-existing table before its `CREATE TABLE` is
/// replayed. Only consulted when `--overwrite-tables` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PurgeMode {
    /// Leave any pre-existing table alone.
    #[default]
    None,
    /// `DROP TABLE IF EXISTS` / `DROP VIEW IF EXISTS` before creating.
    Drop,
    /// `TRUNCATE TABLE`; on failure, fall through to a normal create.
    Truncate,
    /// `DELETE FROM`; on failure, fall through to a normal create.
    Delete,
}

impl PurgeMode {
    /// Derives the effective purge mode from the `--purge-mode` string (if
    /// any) and the `--overwrite-tables` flag.
    ///
    /// Explicit `--purge-mode` always wins. Otherwise `--overwrite-tables`
    /// defaults to [`PurgeMode::Drop`]; with neither set, the mode is
    /// [`PurgeMode::None`].
    pub fn resolve(explicit: Option<&str>, overwrite_tables: bool) -> Result<Self, CoreError> {
        if let Some(s) = explicit {
            return s.parse();
        }
        if overwrite_tables {
            return Ok(PurgeMode::Drop);
        }
        Ok(PurgeMode::None)
    }

    /// Whether this mode, after a successful purge, should skip the
    /// subsequent `CREATE TABLE` (the table is assumed to already have a
    /// compatible schema).
    pub fn skips_create_on_success(self) -> bool {
        matches!(self, PurgeMode::Truncate | PurgeMode::Delete)
    }
}

impl FromStr for PurgeMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(PurgeMode::None),
            "DROP" => Ok(PurgeMode::Drop),
            "TRUNCATE" => Ok(PurgeMode::Truncate),
            "DELETE" => Ok(PurgeMode::Delete),
            other => Err(CoreError::UnknownPurgeMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_purge_mode_wins() {
        assert_eq!(
            PurgeMode::resolve(Some("TRUNCATE"), false).unwrap(),
            PurgeMode::Truncate
        );
        assert_eq!(
            PurgeMode::resolve(Some("NONE"), true).unwrap(),
            PurgeMode::None
        );
    }

    #[test]
    fn overwrite_tables_defaults_to_drop() {
        assert_eq!(PurgeMode::resolve(None, true).unwrap(), PurgeMode::Drop);
    }

    #[test]
    fn neither_set_defaults_to_none() {
        assert_eq!(PurgeMode::resolve(None, false).unwrap(), PurgeMode::None);
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(PurgeMode::resolve(Some("WAT"), false).is_err());
    }

    #[test]
    fn truncate_and_delete_skip_create() {
        assert!(PurgeMode::Truncate.skips_create_on_success());
        assert!(PurgeMode::Delete.skips_create_on_success());
        assert!(!PurgeMode::Drop.skips_create_on_success());
        assert!(!PurgeMode::None.skips_create_on_success());
    }
}
