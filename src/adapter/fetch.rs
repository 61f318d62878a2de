use crate::connection::Connector;
use crate::count_query::count_query;
use crate::error::SqlAdapterError;
use crate::row::Row;
use crate::types::RowValues;

use super::Adapter;

/// One page of rows together with the total the unpaged query would return.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountedRows {
    pub count: i64,
    pub items: Vec<Row>,
}

impl<C: Connector> Adapter<C> {
    /// First column of the first row, or `RowValues::Text("")` when nothing matched.
    ///
    /// # Errors
    /// Returns the driver error unchanged if the query fails.
    pub fn fetch_scalar(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<RowValues, SqlAdapterError> {
        let rs = self.query(query, params)?;
        Ok(rs
            .first()
            .and_then(|row| row.get_by_index(0))
            .cloned()
            .unwrap_or_else(|| RowValues::Text(String::new())))
    }

    /// First row as a column mapping, or an empty [`Row`] when nothing matched.
    ///
    /// # Errors
    /// Returns the driver error unchanged if the query fails.
    pub fn fetch_row(&mut self, query: &str, params: &[RowValues]) -> Result<Row, SqlAdapterError> {
        let rs = self.query(query, params)?;
        Ok(rs.first().map(|row| row.to_row()).unwrap_or_default())
    }

    /// Every row as a column mapping.
    ///
    /// # Errors
    /// Returns the driver error unchanged if the query fails.
    pub fn fetch_all(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<Vec<Row>, SqlAdapterError> {
        let rs = self.query(query, params)?;
        Ok(rs.results.into_iter().map(|row| row.into_row()).collect())
    }

    /// Number of rows `query` would return, ignoring its ordering and limit.
    ///
    /// # Errors
    /// Returns the driver error if the count query fails, or
    /// `SqlAdapterError::ExecutionError` if it does not yield an integer.
    pub fn count(&mut self, query: &str, params: &[RowValues]) -> Result<i64, SqlAdapterError> {
        let counted = count_query(query);
        let value = self.fetch_scalar(&counted, params)?;
        value.coerce_int().ok_or_else(|| {
            SqlAdapterError::ExecutionError(format!(
                "count query `{counted}` returned a non-integer value: {value:?}"
            ))
        })
    }

    /// [`fetch_all`](Self::fetch_all) plus the total from a derived count query run with
    /// the same parameters.
    ///
    /// The two statements run independently; concurrent writers can make `count` and
    /// `items` disagree.
    ///
    /// # Errors
    /// Returns the first error from either statement.
    pub fn fetch_all_with_count(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<CountedRows, SqlAdapterError> {
        let items = self.fetch_all(query, params)?;
        let count = self.count(query, params)?;
        Ok(CountedRows { count, items })
    }
}
