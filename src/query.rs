use crate::types::RowValues;

/// A SQL string and its bound parameters bundled together.
///
/// Both the write builder and the count-query synthesizer hand their output to the
/// executor in this shape, so placeholders and values never drift apart:
/// ```rust
/// use sql_adapter::prelude::*;
///
/// let qp = QueryAndParams::new(
///     "INSERT INTO t (id, name) VALUES (?, ?)",
///     vec![RowValues::Int(1), RowValues::Text("alice".into())],
/// );
/// assert!(!qp.is_noop());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters to be bound to the query, in placeholder order
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given query string and parameters
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    /// The "nothing to do" result: empty query text and no parameters.
    #[must_use]
    pub fn noop() -> Self {
        Self::default()
    }

    /// True when there is no statement to run.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.query.trim().is_empty()
    }
}
