//! Statement execution over one lazily opened connection.

use crate::config::ConnectionSettings;
use crate::connection::{Connector, DbConnection, ExecOutcome};
use crate::error::SqlAdapterError;
use crate::query::QueryAndParams;
use crate::results::ResultSet;
use crate::row::Row;
use crate::types::RowValues;
use crate::write_query::{WriteSpec, build_delete, build_write};

mod fetch;
mod tx;

pub use fetch::CountedRows;
pub use tx::TxState;

/// Data-access helper bound to a single connection.
///
/// Settings are validated when the adapter is created; the connection itself is opened
/// on first use and reused for the adapter's lifetime. Every call is blocking and
/// takes `&mut self`: share an adapter across threads only behind your own lock, or
/// give each task its own.
///
/// ```rust
/// # #[cfg(feature = "sqlite")]
/// # fn main() -> Result<(), sql_adapter::SqlAdapterError> {
/// use sql_adapter::prelude::*;
/// use sql_adapter::sqlite::SqliteConnector;
///
/// let settings = ConnectionSettings::builder().database(":memory:").finish();
/// let mut db = Adapter::new(SqliteConnector::new(), settings)?;
/// db.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, a INTEGER)")?;
///
/// let rows = vec![Row::new().with("a", 1), Row::new().with("a", 2)];
/// let outcome = db.write(&WriteSpec::new("t", rows))?;
/// assert_eq!(outcome.affected_rows, 2);
///
/// let page = db.fetch_all_with_count("SELECT a FROM t ORDER BY a LIMIT 1", &[])?;
/// assert_eq!((page.count, page.items.len()), (2, 1));
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "sqlite"))]
/// # fn main() {}
/// ```
pub struct Adapter<C: Connector> {
    connector: C,
    settings: ConnectionSettings,
    conn: Option<C::Connection>,
    tx_state: TxState,
}

impl<C: Connector> Adapter<C> {
    /// Create an adapter without connecting.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConfigError` if a setting the connector requires is missing.
    pub fn new(connector: C, settings: ConnectionSettings) -> Result<Self, SqlAdapterError> {
        settings.require(connector.required_settings())?;
        Ok(Self {
            connector,
            settings,
            conn: None,
            tx_state: TxState::Idle,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// True once the first operation has opened the connection.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// The live connection, opening it on first use.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConnectionError` if the connection cannot be opened.
    pub fn connection(&mut self) -> Result<&mut C::Connection, SqlAdapterError> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                let conn = self.connector.connect(&self.settings).map_err(|err| match err {
                    SqlAdapterError::ConnectionError(_) => err,
                    other => SqlAdapterError::ConnectionError(other.to_string()),
                })?;
                tracing::debug!(
                    target: "sql_adapter",
                    database = self.settings.database.as_deref().unwrap_or_default(),
                    "connection opened"
                );
                conn
            }
        };
        Ok(self.conn.insert(conn))
    }

    /// Run a statement, binding `params` positionally when there are any.
    ///
    /// # Errors
    /// Returns the driver error unchanged if the statement fails.
    pub fn execute(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlAdapterError> {
        tracing::debug!(target: "sql_adapter", sql = query, params = params.len(), "execute");
        let conn = self.connection()?;
        if params.is_empty() {
            conn.execute_direct(query)
        } else {
            conn.execute_prepared(query, params)
        }
    }

    /// Run a synthesized statement; a no-op pair never reaches the connection.
    ///
    /// # Errors
    /// Returns the driver error unchanged if the statement fails.
    pub fn execute_query(&mut self, qp: &QueryAndParams) -> Result<ExecOutcome, SqlAdapterError> {
        if qp.is_noop() {
            return Ok(ExecOutcome::noop());
        }
        self.execute(&qp.query, &qp.params)
    }

    /// Run a multi-statement script, e.g. schema setup.
    ///
    /// # Errors
    /// Returns the driver error from the first failing statement.
    pub fn execute_batch(&mut self, script: &str) -> Result<(), SqlAdapterError> {
        tracing::debug!(target: "sql_adapter", sql = script, "execute batch");
        self.connection()?.execute_batch(script)
    }

    /// Run a row-returning statement and return the full result set.
    ///
    /// # Errors
    /// Returns the driver error unchanged if the query fails.
    pub fn query(
        &mut self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlAdapterError> {
        tracing::debug!(target: "sql_adapter", sql = query, params = params.len(), "query");
        self.connection()?.query(query, params)
    }

    /// Build and run the `INSERT`/`UPDATE` described by `spec`.
    ///
    /// Degenerate specs (no table, no rows) return [`ExecOutcome::noop`].
    ///
    /// # Errors
    /// Returns the driver error unchanged if the statement fails.
    pub fn write(&mut self, spec: &WriteSpec) -> Result<ExecOutcome, SqlAdapterError> {
        self.execute_query(&build_write(spec))
    }

    /// Delete the rows of `table` matching every column of `conditions`.
    ///
    /// # Errors
    /// Returns the driver error unchanged if the statement fails.
    pub fn delete(
        &mut self,
        table: &str,
        conditions: &Row,
    ) -> Result<ExecOutcome, SqlAdapterError> {
        self.execute_query(&build_delete(table, conditions))
    }
}

impl<C> std::fmt::Debug for Adapter<C>
where
    C: Connector + std::fmt::Debug,
    C::Connection: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("connector", &self.connector)
            .field("settings", &self.settings)
            .field("conn", &self.conn)
            .field("tx_state", &self.tx_state)
            .finish()
    }
}
