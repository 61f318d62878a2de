use std::borrow::Cow;
use std::fmt;

use crate::connection::{DbConnection, ExecOutcome};
use crate::error::SqlAdapterError;
use crate::results::ResultSet;
use crate::types::RowValues;

use super::dialect::translate_write;
use super::params::Params;
use super::query::build_result_set;

/// A single blocking rusqlite connection.
///
/// Write statements are passed through [`translate_write`] unless translation is turned
/// off, so the builders' `INSERT … SET` and `ON DUPLICATE KEY UPDATE` forms run here.
pub struct SqliteConnection {
    conn: rusqlite::Connection,
    translate: bool,
}

impl SqliteConnection {
    #[must_use]
    pub fn new(conn: rusqlite::Connection) -> Self {
        Self {
            conn,
            translate: true,
        }
    }

    #[must_use]
    pub fn with_translation(mut self, translate: bool) -> Self {
        self.translate = translate;
        self
    }

    fn write_sql<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        if self.translate {
            translate_write(sql)
        } else {
            Cow::Borrowed(sql)
        }
    }

    /// `SQLite` keeps the last rowid across statements, so a key is only reported when
    /// the statement moved it.
    fn outcome(&self, rowid_before: i64, affected: usize) -> ExecOutcome {
        let rowid_after = self.conn.last_insert_rowid();
        let insert_id = (affected > 0 && rowid_after != rowid_before && rowid_after != 0)
            .then_some(rowid_after);
        ExecOutcome::new(affected, insert_id)
    }
}

impl DbConnection for SqliteConnection {
    fn execute_direct(&mut self, sql: &str) -> Result<ExecOutcome, SqlAdapterError> {
        let sql = self.write_sql(sql);
        let rowid_before = self.conn.last_insert_rowid();
        let affected = self.conn.execute(&sql, rusqlite::params![])?;
        Ok(self.outcome(rowid_before, affected))
    }

    fn execute_prepared(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ExecOutcome, SqlAdapterError> {
        let converted = Params::convert(params);
        let sql = self.write_sql(sql);
        let rowid_before = self.conn.last_insert_rowid();
        let affected = {
            let mut stmt = self.conn.prepare_cached(&sql)?;
            stmt.execute(&converted.as_refs()[..])?
        };
        Ok(self.outcome(rowid_before, affected))
    }

    fn execute_batch(&mut self, sql: &str) -> Result<(), SqlAdapterError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn query(&mut self, sql: &str, params: &[RowValues]) -> Result<ResultSet, SqlAdapterError> {
        let converted = Params::convert(params);
        let mut stmt = self.conn.prepare(sql)?;
        build_result_set(&mut stmt, converted.as_values())
    }

    fn begin(&mut self) -> Result<(), SqlAdapterError> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SqlAdapterError> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), SqlAdapterError> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("path", &self.conn.path())
            .field("autocommit", &self.conn.is_autocommit())
            .field("translate", &self.translate)
            .finish()
    }
}
