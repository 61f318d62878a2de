//! Blocking data-access helper with SQL synthesis.
//!
//! - [`adapter::Adapter`] runs statements over one lazily opened connection and
//!   normalizes results into scalars, [`Row`]s and row lists.
//! - [`count_query`](count_query::count_query) derives a row-count query from a `SELECT`.
//! - [`write_query::build_write`] builds `INSERT`/`UPDATE` statements from row data.
//!
//! The synthesizers are textual and backend-free; the `sqlite` feature (on by default)
//! supplies a rusqlite-backed [`connection::Connector`].

pub mod adapter;
pub mod config;
pub mod connection;
pub mod count_query;
pub mod error;
pub mod prelude;
pub mod query;
pub mod results;
pub mod row;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod types;
pub mod write_query;

pub use adapter::{Adapter, CountedRows, TxState};
pub use error::SqlAdapterError;
pub use query::QueryAndParams;
pub use row::Row;
pub use types::RowValues;
