//! `INSERT`/`UPDATE` synthesis from row data.
//!
//! [`build_write`] turns a [`WriteSpec`] into a [`QueryAndParams`] pair with `?`
//! placeholders and backtick-quoted identifiers. Degenerate input (an empty table name
//! or no row data) yields [`QueryAndParams::noop`] rather than an error so batch callers
//! can skip a write without special-casing it.

use crate::query::QueryAndParams;
use crate::row::Row;
use crate::types::RowValues;

mod assignments;
mod multi;
mod single;

pub use assignments::{build_assignments, build_delete, build_set_fragment, build_where_fragment};

/// Key column used by [`Target::by_id`].
pub const DEFAULT_INDEX_KEY: &str = "id";

/// Row data for a write: one row, or several rows sharing the first row's columns.
#[derive(Debug, Clone, PartialEq)]
pub enum RowData {
    Single(Row),
    /// Every row must carry the same columns in the same order as the first one; the
    /// builder reads column names from the first row only.
    Multi(Vec<Row>),
}

impl RowData {
    /// True when there is nothing to write.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            RowData::Single(row) => row.is_empty(),
            RowData::Multi(rows) => rows.first().is_none_or(Row::is_empty),
        }
    }
}

impl From<Row> for RowData {
    fn from(row: Row) -> Self {
        RowData::Single(row)
    }
}

impl From<Vec<Row>> for RowData {
    fn from(rows: Vec<Row>) -> Self {
        RowData::Multi(rows)
    }
}

/// Which rows a single-row write touches.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Target {
    /// Insert a new row.
    #[default]
    Insert,
    /// Update the row whose `key` column equals `value`.
    ByIndex { key: String, value: RowValues },
    /// Update the rows matched by a hand-written condition.
    ///
    /// `clause` is used verbatim, with or without a leading `WHERE`; `params` bind its
    /// placeholders and are appended after the assignment values. A blank clause selects
    /// nothing and the write falls back to an insert.
    Where {
        clause: String,
        params: Vec<RowValues>,
    },
}

impl Target {
    /// Update by primary key on the [`DEFAULT_INDEX_KEY`] column.
    pub fn by_id(value: impl Into<RowValues>) -> Self {
        Self::by_index(DEFAULT_INDEX_KEY, value)
    }

    pub fn by_index(key: impl Into<String>, value: impl Into<RowValues>) -> Self {
        Target::ByIndex {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn where_clause(clause: impl Into<String>, params: Vec<RowValues>) -> Self {
        Target::Where {
            clause: clause.into(),
            params,
        }
    }
}

/// Everything the write builder needs to produce one statement.
///
/// ```rust
/// use sql_adapter::prelude::*;
///
/// let spec = WriteSpec::new("t", Row::new().with("a", 1)).target(Target::by_id(5));
/// let qp = build_write(&spec);
/// assert_eq!(qp.query, "UPDATE `t` SET `a`=? WHERE `id`=?");
/// assert_eq!(qp.params, vec![RowValues::Int(1), RowValues::Int(5)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WriteSpec {
    pub table: String,
    pub data: RowData,
    pub target: Target,
    /// Columns refreshed from the incoming values when an insert hits a duplicate key.
    pub on_duplicate: Vec<String>,
}

impl WriteSpec {
    /// An insert of `data` into `table`.
    pub fn new(table: impl Into<String>, data: impl Into<RowData>) -> Self {
        Self {
            table: table.into(),
            data: data.into(),
            target: Target::Insert,
            on_duplicate: Vec::new(),
        }
    }

    #[must_use]
    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn on_duplicate_key_update<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_duplicate = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Build the `INSERT`/`UPDATE` statement described by `spec`.
#[must_use]
pub fn build_write(spec: &WriteSpec) -> QueryAndParams {
    if spec.table.trim().is_empty() || spec.data.is_empty() {
        tracing::debug!(
            target: "sql_adapter",
            table = %spec.table,
            "nothing to write; returning no-op query"
        );
        return QueryAndParams::noop();
    }

    match &spec.data {
        RowData::Single(row) => single::build(&spec.table, row, &spec.target, &spec.on_duplicate),
        RowData::Multi(rows) => {
            if spec.target != Target::Insert {
                tracing::warn!(
                    target: "sql_adapter",
                    table = %spec.table,
                    "multi-row writes always insert; ignoring update target"
                );
            }
            multi::build(&spec.table, rows, &spec.on_duplicate)
        }
    }
}

/// Backtick-quote an identifier, doubling embedded backticks.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// ` ON DUPLICATE KEY UPDATE ...` with a leading space, or empty when no columns are given.
fn duplicate_clause(columns: &[String]) -> String {
    if columns.is_empty() {
        return String::new();
    }
    let updates = columns
        .iter()
        .map(|col| {
            let quoted = quote_ident(col);
            format!("{quoted}=VALUES({quoted})")
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(" ON DUPLICATE KEY UPDATE {updates}")
}
