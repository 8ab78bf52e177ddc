//! Splits a single multi-row `INSERT` statement into several smaller ones
//! when `--rows` is set (spec §4.4).
//!
//! The header -- everything up to the first `(` -- is not SQL-parsed, just
//! reused verbatim on every chunk. Row tuples are located by tracking
//! paren balance rather than splitting on newlines, so this handles both a
//! dump that puts one tuple per line and one that packs every tuple onto a
//! single line.

/// Splits `statement` into chunks of at most `rows` value-tuples each.
///
/// `rows == 0` disables splitting and returns the statement unchanged.
/// A statement with no parenthesized tuple (not a multi-row `INSERT`, or
/// malformed) is also returned unchanged.
pub fn split_insert(statement: &str, rows: u64) -> Vec<String> {
    if rows == 0 {
        return vec![statement.to_string()];
    }
    let Some(first_paren) = statement.find('(') else {
        return vec![statement.to_string()];
    };
    let header = &statement[..first_paren];
    let tuples = scan_tuples(&statement[first_paren..]);
    if tuples.is_empty() {
        return vec![statement.to_string()];
    }

    tuples
        .chunks(rows as usize)
        .map(|chunk| {
            let mut out = String::with_capacity(header.len() + chunk.iter().map(|t| t.len() + 1).sum::<usize>() + 2);
            out.push_str(header);
            out.push_str(&chunk.join(","));
            out.push_str(";\n");
            out
        })
        .collect()
}

/// Finds each top-level, paren-balanced `(...)` tuple in `body`, ignoring
/// any separating commas and the trailing `;`. Does not special-case
/// parens inside string literals; spec §4.4 records this as a known edge
/// case, not something this scanner needs to solve.
fn scan_tuples(body: &str) -> Vec<&str> {
    let mut tuples = Vec::new();
    let bytes = body.as_bytes();
    let mut depth = 0i32;
    let mut start = 0usize;

    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'(' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    tuples.push(&body[start..=i]);
                }
            }
            _ => {}
        }
    }

    tuples
}
