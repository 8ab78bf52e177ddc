//! The "innodb-optimize-keys" fast index-creation rewrite (spec §4.3).
//!
//! Parsing is deliberately line-prefix matching against the known shape of
//! a mysqldump-style `CREATE TABLE` statement, not a SQL parser -- spec §9
//! calls this out explicitly as "brittle but faithful to the dump's known
//! formatting."

use crate::error::RewriteError;

/// What a `CREATE TABLE` statement rewrites to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Not an InnoDB table, or the rewrite is disabled: execute the
    /// original statement unchanged, no side jobs.
    Passthrough,
    /// An InnoDB table: the no-index create plus the deferred index and
    /// constraint `ALTER` statements.
    FastIndex {
        /// The rewritten `CREATE TABLE`, with index clauses removed
        /// (except the auto-increment exception).
        no_index_create: String,
        /// `ALTER TABLE ... ADD <index> ...` statement(s), if any index
        /// clauses were extracted. May contain more than one
        /// `;\n`-terminated `ALTER TABLE` if more than one `FULLTEXT`
        /// index was present (engine limitation: one fulltext per alter).
        index_alter: Option<String>,
        /// `ALTER TABLE ... ADD CONSTRAINT ...` statement, if any
        /// constraint clauses were present.
        constraint_alter: Option<String>,
    },
}

/// Returns true if `statement` looks like a `CREATE TABLE` statement (as
/// opposed to a `/*!40101 SET ...*/`-style version-gated comment statement
/// that a schema file also contains).
pub fn is_create_table_statement(statement: &str) -> bool {
    statement.trim_start().starts_with("CREATE TABLE")
}

const INDEX_PREFIXES: [&str; 5] = ["  KEY", "  UNIQUE", "  SPATIAL", "  FULLTEXT", "  INDEX"];
const CONSTRAINT_PREFIX: &str = "  CONSTRAINT";

/// Rewrites a `CREATE TABLE` statement into a no-index create plus deferred
/// index/constraint alters, if `database.table` turns out to be an InnoDB
/// table. Non-InnoDB tables are returned as [`RewriteOutcome::Passthrough`].
///
/// Returns [`RewriteError::NotCreateTable`] if `statement` is not a
/// `CREATE TABLE` statement per [`is_create_table_statement`].
pub fn rewrite_create_table(
    statement: &str,
    database: &str,
    table: &str,
) -> Result<RewriteOutcome, RewriteError> {
    if !is_create_table_statement(statement) {
        return Err(RewriteError::NotCreateTable(statement.to_string()));
    }
    Ok(rewrite_create_table_unchecked(statement, database, table))
}

fn rewrite_create_table_unchecked(statement: &str, database: &str, table: &str) -> RewriteOutcome {
    let mut table_without_indexes = String::with_capacity(statement.len());
    let mut alter_index = String::new();
    let mut alter_constraint = String::new();
    append_alter_header(&mut alter_index, database, table);
    append_alter_header(&mut alter_constraint, database, table);

    let mut autoinc_column: Option<String> = None;
    let mut fulltext_counter = 0u32;
    let mut has_index_clause = false;
    let mut has_constraint_clause = false;
    let mut is_innodb = false;

    for line in statement.split('\n') {
        if let Some(prefix) = INDEX_PREFIXES.iter().find(|p| line.starts_with(**p)) {
            let is_autoinc_exception = autoinc_column
                .as_deref()
                .map(|col| line.contains(col))
                .unwrap_or(false);
            if is_autoinc_exception {
                table_without_indexes.push_str(line);
                table_without_indexes.push('\n');
            } else {
                if *prefix == "  FULLTEXT" {
                    fulltext_counter += 1;
                }
                if fulltext_counter > 1 {
                    fulltext_counter = 1;
                    finish_alter(&mut alter_index);
                    append_alter_header(&mut alter_index, database, table);
                }
                alter_index.push_str("\n ADD");
                alter_index.push_str(line);
                has_index_clause = true;
            }
        } else if line.starts_with(CONSTRAINT_PREFIX) {
            has_constraint_clause = true;
            alter_constraint.push_str("\n ADD");
            alter_constraint.push_str(line);
        } else {
            if let Some(col) = extract_autoincrement_column(line) {
                autoinc_column = Some(col);
            }
            table_without_indexes.push_str(line);
            table_without_indexes.push('\n');
        }

        if line.contains("ENGINE=InnoDB") {
            is_innodb = true;
        }
    }

    if !is_innodb {
        return RewriteOutcome::Passthrough;
    }

    finish_alter(&mut alter_index);
    finish_alter(&mut alter_constraint);

    let no_index_create = strip_trailing_comma_before_close(&table_without_indexes);

    RewriteOutcome::FastIndex {
        no_index_create,
        index_alter: has_index_clause.then_some(alter_index),
        constraint_alter: has_constraint_clause.then_some(alter_constraint),
    }
}

fn append_alter_header(buf: &mut String, database: &str, table: &str) {
    buf.push_str("ALTER TABLE `");
    buf.push_str(database);
    buf.push_str("`.`");
    buf.push_str(table);
    buf.push_str("` ");
}

/// Closes an accumulated `ALTER TABLE` buffer: replaces the last comma
/// within the final five characters with `;` (spec §4.3), or appends a
/// bare `;` if no such comma exists.
fn finish_alter(buf: &mut String) {
    let window_start = buf.len().saturating_sub(5);
    if let Some(rel) = buf[window_start..].rfind(',') {
        let pos = window_start + rel;
        buf.replace_range(pos..pos + 1, ";");
        buf.push('\n');
    } else {
        buf.push_str(";\n");
    }
}

/// Extracts the backtick-quoted column name from a column-definition line
/// containing `AUTO_INCREMENT`, e.g. "  `id` int ... AUTO_INCREMENT," ->
/// `` (`id` ``, the substring index lines are checked against.
fn extract_autoincrement_column(line: &str) -> Option<String> {
    if !line.contains("AUTO_INCREMENT") {
        return None;
    }
    line.split('`').nth(1).map(|name| format!("(`{name}`"))
}

/// Removes a comma that immediately precedes a closing-paren line, left
/// dangling when one or more trailing lines were extracted out of the
/// table body.
fn strip_trailing_comma_before_close(body: &str) -> String {
    body.replace(",\n)", "\n)")
}
