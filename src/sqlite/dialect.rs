//! Rewrites the MySQL write forms emitted by [`crate::write_query`] into `SQLite` syntax.
//!
//! - `` INSERT `t` SET `a`=?, `b`=? `` becomes `` INSERT INTO `t` (`a`, `b`) VALUES (?, ?) ``.
//! - `` ON DUPLICATE KEY UPDATE `b`=VALUES(`b`) `` becomes
//!   `` ON CONFLICT DO UPDATE SET `b`=excluded.`b` ``.
//!
//! Placeholders keep their left-to-right order, so bound parameters are unaffected.
//! Anything else passes through untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static INSERT_SET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?is)^\s*INSERT\s+(?:INTO\s+)?",
        r#"(?P<table>`(?:[^`]|``)+`|"(?:[^"]|"")+"|[\w.]+)"#,
        r"\s+SET\s+(?P<assignments>.+)$",
    ))
    .expect("insert set pattern")
});

static ON_DUPLICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+ON\s+DUPLICATE\s+KEY\s+UPDATE\s+").expect("on duplicate pattern")
});

static VALUES_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bVALUES\s*\(\s*(?P<col>`(?:[^`]|``)+`|\w+)\s*\)").expect("values() pattern")
});

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Backticked,
}

/// Byte offsets of `delim` outside quotes, identifiers and parentheses.
fn top_level_positions(text: &str, delim: u8) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut positions = Vec::new();
    let mut state = State::Normal;
    let mut depth = 0usize;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'`' => state = State::Backticked,
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                _ if b == delim && depth == 0 => positions.push(idx),
                _ => {}
            },
            State::SingleQuoted | State::DoubleQuoted | State::Backticked => {
                let close = match state {
                    State::SingleQuoted => b'\'',
                    State::DoubleQuoted => b'"',
                    _ => b'`',
                };
                if b == close {
                    if bytes.get(idx + 1) == Some(&close) {
                        idx += 1; // doubled quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
        }
        idx += 1;
    }
    positions
}

fn split_top_level(text: &str, delim: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for pos in top_level_positions(text, delim) {
        parts.push(&text[start..pos]);
        start = pos + 1;
    }
    parts.push(&text[start..]);
    parts
}

/// `INSERT … SET` assignments as column/value lists, or `None` if they don't parse.
fn insert_set_to_values(table: &str, assignments: &str) -> Option<String> {
    let mut columns = Vec::new();
    let mut values = Vec::new();
    for assignment in split_top_level(assignments, b',') {
        let eq = *top_level_positions(assignment, b'=').first()?;
        let column = assignment[..eq].trim();
        let value = assignment[eq + 1..].trim();
        if column.is_empty() || value.is_empty() {
            return None;
        }
        columns.push(column);
        values.push(value);
    }
    Some(format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        values.join(", ")
    ))
}

/// Rewrite MySQL-only write syntax into its `SQLite` equivalent.
///
/// Returns a borrowed `Cow` when the statement needs no change.
#[must_use]
pub fn translate_write(sql: &str) -> Cow<'_, str> {
    let (head, upsert) = match ON_DUPLICATE.find(sql) {
        Some(m) => (&sql[..m.start()], Some(&sql[m.end()..])),
        None => (sql, None),
    };

    let insert = INSERT_SET.captures(head).and_then(|caps| {
        insert_set_to_values(caps.name("table")?.as_str(), caps.name("assignments")?.as_str())
    });
    if insert.is_none() && upsert.is_none() {
        return Cow::Borrowed(sql);
    }

    let mut out = insert.unwrap_or_else(|| head.to_string());
    if let Some(updates) = upsert {
        out.push_str(" ON CONFLICT DO UPDATE SET ");
        out.push_str(&VALUES_REF.replace_all(updates, "excluded.${col}"));
    }
    tracing::trace!(target: "sql_adapter", from = sql, to = %out, "rewrote write for SQLite");
    Cow::Owned(out)
}
