//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::adapter::{Adapter, CountedRows, TxState};
pub use crate::config::{ConnectionSettings, Setting};
pub use crate::connection::{Connector, DbConnection, ExecOutcome};
pub use crate::count_query::{count_query, count_query_and_params};
pub use crate::error::SqlAdapterError;
pub use crate::query::QueryAndParams;
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::row::Row;
pub use crate::types::RowValues;
pub use crate::write_query::{
    RowData, Target, WriteSpec, build_assignments, build_delete, build_set_fragment,
    build_where_fragment, build_write,
};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteConnector;
