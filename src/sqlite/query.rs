use std::sync::Arc;

use rusqlite::Statement;
use rusqlite::types::{Value, ValueRef};

use crate::error::SqlAdapterError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Read column `idx` of a rusqlite row as a [`RowValues`].
///
/// `SQLite` has no boolean, timestamp or JSON storage class, so those come back as
/// integers or text.
///
/// # Errors
/// Returns the driver error if the column cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, SqlAdapterError> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => RowValues::Null,
        ValueRef::Integer(i) => RowValues::Int(i),
        ValueRef::Real(f) => RowValues::Float(f),
        ValueRef::Text(bytes) => RowValues::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => RowValues::Blob(bytes.to_vec()),
    })
}

/// Run a prepared statement and collect every row into a [`ResultSet`].
///
/// # Errors
/// Returns the driver error if binding, stepping or reading a column fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &[Value],
) -> Result<ResultSet, SqlAdapterError> {
    let columns: Arc<Vec<String>> = Arc::new(
        stmt.column_names()
            .into_iter()
            .map(str::to_owned)
            .collect(),
    );
    let width = columns.len();

    let mut result_set = ResultSet::with_capacity(8);
    result_set.set_column_names(Arc::clone(&columns));

    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;
    while let Some(row) = rows.next()? {
        let values = (0..width)
            .map(|idx| sqlite_extract_value_sync(row, idx))
            .collect::<Result<Vec<_>, _>>()?;
        result_set.add_row_values(values);
    }
    Ok(result_set)
}
