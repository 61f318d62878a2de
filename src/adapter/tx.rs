use crate::connection::{Connector, DbConnection};
use crate::error::SqlAdapterError;

use super::Adapter;

/// Transaction state of an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxState {
    #[default]
    Idle,
    Active,
    /// Held only while `COMMIT` is in flight.
    Committing,
    /// Held only while `ROLLBACK` is in flight.
    RollingBack,
}

impl<C: Connector> Adapter<C> {
    #[must_use]
    pub fn tx_state(&self) -> TxState {
        self.tx_state
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.tx_state == TxState::Active
    }

    /// Start a transaction.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::TransactionError` if one is already active, or the driver
    /// error if `BEGIN` fails.
    pub fn begin(&mut self) -> Result<(), SqlAdapterError> {
        if self.tx_state != TxState::Idle {
            return Err(SqlAdapterError::TransactionError(format!(
                "cannot begin a transaction while {:?}",
                self.tx_state
            )));
        }
        self.connection()?.begin()?;
        self.tx_state = TxState::Active;
        tracing::debug!(target: "sql_adapter", "transaction started");
        Ok(())
    }

    /// Commit the active transaction.
    ///
    /// A failed `COMMIT` leaves the transaction active so the caller can roll back.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::TransactionError` if no transaction is active, or the
    /// driver error if `COMMIT` fails.
    pub fn commit(&mut self) -> Result<(), SqlAdapterError> {
        self.ensure_active("commit")?;
        self.tx_state = TxState::Committing;
        let result = self.connection().and_then(DbConnection::commit);
        self.tx_state = if result.is_ok() {
            TxState::Idle
        } else {
            TxState::Active
        };
        tracing::debug!(target: "sql_adapter", ok = result.is_ok(), "transaction commit");
        result
    }

    /// Roll back the active transaction. The adapter is idle afterwards even if the
    /// driver reports an error.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::TransactionError` if no transaction is active, or the
    /// driver error if `ROLLBACK` fails.
    pub fn rollback(&mut self) -> Result<(), SqlAdapterError> {
        self.ensure_active("rollback")?;
        self.tx_state = TxState::RollingBack;
        let result = self.connection().and_then(DbConnection::rollback);
        self.tx_state = TxState::Idle;
        if let Err(err) = &result {
            tracing::warn!(target: "sql_adapter", error = %err, "transaction rollback failed");
        } else {
            tracing::debug!(target: "sql_adapter", "transaction rolled back");
        }
        result
    }

    fn ensure_active(&self, ctx: &str) -> Result<(), SqlAdapterError> {
        if self.tx_state == TxState::Active {
            Ok(())
        } else {
            Err(SqlAdapterError::TransactionError(format!(
                "cannot {ctx}: no active transaction ({:?})",
                self.tx_state
            )))
        }
    }
}
