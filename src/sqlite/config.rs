use crate::config::{ConnectionSettings, Setting};
use crate::connection::Connector;
use crate::error::SqlAdapterError;

use super::connection::SqliteConnection;

/// Path that opens a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Opens `SQLite` databases; the `database` setting is the file path (or `:memory:`).
///
/// Host, username, password and charset do not apply to `SQLite` and are ignored.
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    wal: bool,
    translate: bool,
}

impl Default for SqliteConnector {
    fn default() -> Self {
        Self {
            wal: false,
            translate: true,
        }
    }
}

impl SqliteConnector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite MySQL-style `INSERT … SET` and `ON DUPLICATE KEY UPDATE` into `SQLite`
    /// syntax before running writes. On by default.
    #[must_use]
    pub fn with_translation(mut self, translate: bool) -> Self {
        self.translate = translate;
        self
    }

    /// Switch file-backed databases to WAL journaling when they are opened.
    #[must_use]
    pub fn with_wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }
}

impl Connector for SqliteConnector {
    type Connection = SqliteConnection;

    fn required_settings(&self) -> &'static [Setting] {
        &[Setting::Database]
    }

    fn connect(&self, settings: &ConnectionSettings) -> Result<SqliteConnection, SqlAdapterError> {
        let path = settings.get(Setting::Database).ok_or_else(|| {
            SqlAdapterError::ConfigError("missing mandatory connection setting `database`".into())
        })?;

        let opened = if path == MEMORY_PATH {
            rusqlite::Connection::open_in_memory()
        } else {
            rusqlite::Connection::open(path)
        };
        let conn = opened.map_err(|e| {
            SqlAdapterError::ConnectionError(format!(
                "Failed to open SQLite database `{path}`: {e}"
            ))
        })?;
        tracing::debug!(
            target: "sql_adapter",
            path,
            wal = self.wal,
            translate = self.translate,
            "opened SQLite connection"
        );

        if self.wal && path != MEMORY_PATH {
            conn.execute_batch("PRAGMA journal_mode = WAL;").map_err(|e| {
                SqlAdapterError::ConnectionError(format!("Failed to enable WAL on `{path}`: {e}"))
            })?;
        }

        Ok(SqliteConnection::new(conn).with_translation(self.translate))
    }
}
