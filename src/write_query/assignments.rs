use crate::query::QueryAndParams;
use crate::row::Row;
use crate::types::RowValues;

use super::quote_ident;

/// Build `` `col` = ? `` fragments from `row`, joined by `separator`.
///
/// A NULL value is written as `` `col` = NULL `` with no placeholder and no parameter,
/// since binding NULL to an equality is not portable across drivers.
/// ```rust
/// use sql_adapter::prelude::*;
///
/// let row = Row::new().with("a", RowValues::Null).with("b", 1);
/// let (sql, params) = build_assignments(&row, ", ");
/// assert_eq!(sql, "`a` = NULL, `b` = ?");
/// assert_eq!(params, vec![RowValues::Int(1)]);
/// ```
#[must_use]
pub fn build_assignments(row: &Row, separator: &str) -> (String, Vec<RowValues>) {
    let mut params = Vec::with_capacity(row.len());
    let sql = row
        .iter()
        .map(|(col, value)| {
            if value.is_null() {
                format!("{} = NULL", quote_ident(col))
            } else {
                params.push(value.clone());
                format!("{} = ?", quote_ident(col))
            }
        })
        .collect::<Vec<_>>()
        .join(separator);
    (sql, params)
}

/// Comma-separated assignments for a `SET` clause.
#[must_use]
pub fn build_set_fragment(row: &Row) -> (String, Vec<RowValues>) {
    build_assignments(row, ", ")
}

/// `AND`-joined equality conditions for a `WHERE` clause.
#[must_use]
pub fn build_where_fragment(row: &Row) -> (String, Vec<RowValues>) {
    build_assignments(row, " AND ")
}

/// `DELETE FROM` the rows of `table` matching every column of `conditions`.
///
/// A NULL condition is tested with `IS NULL`, so it matches NULL cells. An empty table
/// name or an empty condition row is a no-op: this never produces an unconditional
/// delete.
#[must_use]
pub fn build_delete(table: &str, conditions: &Row) -> QueryAndParams {
    if table.trim().is_empty() || conditions.is_empty() {
        return QueryAndParams::noop();
    }
    let (clause, params) = match_conditions(conditions);
    QueryAndParams::new(
        format!("DELETE FROM {} WHERE {clause}", quote_ident(table)),
        params,
    )
}

fn match_conditions(row: &Row) -> (String, Vec<RowValues>) {
    let mut params = Vec::with_capacity(row.len());
    let mut predicates = Vec::with_capacity(row.len());
    for (col, value) in row.iter() {
        if value.is_null() {
            predicates.push(format!("{} IS NULL", quote_ident(col)));
        } else {
            params.push(value.clone());
            predicates.push(format!("{} = ?", quote_ident(col)));
        }
    }
    (predicates.join(" AND "), params)
}
