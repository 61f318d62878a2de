//! `SQLite` backend built on rusqlite.
//!
//! `SQLite` accepts the backtick identifiers and `?` placeholders the builders emit, and
//! multi-row `INSERT INTO ... VALUES` statements. The MySQL-only `INSERT ... SET` and
//! `ON DUPLICATE KEY UPDATE` forms are rewritten by [`translate_write`] before they
//! reach the engine; [`SqliteConnector::with_translation`] turns that off.

mod config;
mod connection;
mod dialect;
mod params;
mod query;

pub use config::{MEMORY_PATH, SqliteConnector};
pub use connection::SqliteConnection;
pub use dialect::translate_write;
pub use params::{Params, row_value_to_sqlite_value};
pub use query::{build_result_set, sqlite_extract_value_sync};
