//! Storage handle owning the single engine connection.
//!
//! One [`Storage`] is opened at process start and dropped on every exit
//! path; all commands serialize through it. Results are fully materialized
//! before they are returned.

use std::path::Path;

use duckdb::Connection;
use tracing::debug;

use crate::error::Result;
use crate::value::Value;

/// Fully materialized output of one query execution.
///
/// Row order follows engine emission order and is never re-sorted. A
/// statement that returns no rows leaves `columns` empty as well, which is
/// all the encoder needs to emit `[]`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Exclusively owned handle to the database file.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the engine cannot be initialized; there is no
    /// recovery path for this at startup.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory engine. Used by tests in place of the file-backed
    /// handle; everything downstream takes `&Storage` and cannot tell the
    /// difference.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Run one SQL statement and materialize its full result.
    ///
    /// # Errors
    /// Engine failures carry the engine's message text verbatim. A failed
    /// statement leaves the connection open and usable.
    pub fn execute(&self, sql: &str) -> Result<ResultSet> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;

        let mut result = ResultSet::default();
        while let Some(row) = rows.next()? {
            let stmt = row.as_ref();
            if result.columns.is_empty() {
                for idx in 0..stmt.column_count() {
                    result.columns.push(stmt.column_name(idx)?.to_string());
                }
            }
            let mut values = Vec::with_capacity(result.columns.len());
            for idx in 0..result.columns.len() {
                values.push(Value::from_engine(row.get_ref(idx)?)?);
            }
            result.rows.push(values);
        }

        debug!(rows = result.rows.len(), "query materialized");
        Ok(result)
    }
}
