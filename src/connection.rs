use crate::config::{ConnectionSettings, Setting};
use crate::error::SqlAdapterError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// What a write statement did.
///
/// Bundles the affected-row count with the generated key instead of leaving them as
/// state on the connection, so the numbers always belong to the statement that
/// returned them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Rows inserted, updated or deleted.
    pub affected_rows: usize,
    /// Auto-generated key, when the statement produced a new one.
    pub insert_id: Option<i64>,
    executed: bool,
}

impl ExecOutcome {
    #[must_use]
    pub fn new(affected_rows: usize, insert_id: Option<i64>) -> Self {
        Self {
            affected_rows,
            insert_id,
            executed: true,
        }
    }

    /// Outcome for a write that had nothing to do and never reached the database.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            affected_rows: 0,
            insert_id: None,
            executed: false,
        }
    }

    /// True when a statement actually ran. Failures surface as errors, so the only
    /// `false` outcome is [`ExecOutcome::noop`].
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.executed
    }
}

/// Driver primitives the adapter is written against.
///
/// Calls are blocking. Implementations report driver failures unchanged and never
/// retry.
pub trait DbConnection {
    /// Run `sql` as-is, without binding.
    ///
    /// # Errors
    /// Returns the driver error if the statement fails.
    fn execute_direct(&mut self, sql: &str) -> Result<ExecOutcome, SqlAdapterError>;

    /// Prepare `sql` and bind `params` positionally before running it.
    ///
    /// # Errors
    /// Returns the driver error if preparing, binding or executing fails.
    fn execute_prepared(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlAdapterError>;

    /// Run a script of one or more statements.
    ///
    /// # Errors
    /// Returns the driver error from the first failing statement.
    fn execute_batch(&mut self, sql: &str) -> Result<(), SqlAdapterError>;

    /// Run a row-returning statement and materialize every row.
    ///
    /// # Errors
    /// Returns the driver error if preparing or executing the query fails.
    fn query(&mut self, sql: &str, params: &[RowValues]) -> Result<ResultSet, SqlAdapterError>;

    /// # Errors
    /// Returns the driver error if the transaction cannot be started.
    fn begin(&mut self) -> Result<(), SqlAdapterError>;

    /// # Errors
    /// Returns the driver error if the commit fails.
    fn commit(&mut self) -> Result<(), SqlAdapterError>;

    /// # Errors
    /// Returns the driver error if the rollback fails.
    fn rollback(&mut self) -> Result<(), SqlAdapterError>;
}

/// Opens connections for an [`Adapter`](crate::adapter::Adapter).
pub trait Connector {
    type Connection: DbConnection;

    /// Settings that must be present before a connection is attempted.
    fn required_settings(&self) -> &'static [Setting] {
        &[Setting::Host, Setting::Database, Setting::Username]
    }

    /// Open a live connection.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConnectionError` if the connection cannot be opened.
    fn connect(&self, settings: &ConnectionSettings) -> Result<Self::Connection, SqlAdapterError>;
}
