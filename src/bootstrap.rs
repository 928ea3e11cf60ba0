//! One-time schema creation and seeding.
//!
//! Runs unconditionally at startup, before the loop announces `READY`. Any
//! failure here is fatal: there is no client connection yet to report a
//! recoverable error to.

use tracing::{debug, info};

use crate::db::Storage;
use crate::error::{Error, Result};
use crate::value::Value;

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS dummy_data (
    id INTEGER,
    name VARCHAR,
    value DOUBLE,
    date_created DATE
)";

const COUNT_ROWS: &str = "SELECT COUNT(*) FROM dummy_data";

const SEED_ROWS: &str = "\
INSERT INTO dummy_data VALUES
    (1, 'Item One', 10.5, '2023-01-15'),
    (2, 'Item Two', 20.75, '2023-02-20'),
    (3, 'Item Three', 30.0, '2023-03-25'),
    (4, 'Item Four', 40.25, '2023-04-30'),
    (5, 'Item Five', 50.5, '2023-05-05')";

/// Ensure the baseline table exists and is seeded exactly once.
///
/// Idempotent on restart: the table is created with `IF NOT EXISTS` and the
/// sample rows are only inserted when the table is empty. An existing
/// non-empty table is never altered.
pub fn run(storage: &Storage) -> Result<()> {
    storage.execute(CREATE_TABLE)?;

    let count = row_count(storage)?;
    if count == 0 {
        storage.execute(SEED_ROWS)?;
        info!(rows = 5, "seeded baseline table");
    } else {
        debug!(rows = count, "baseline table already populated");
    }
    Ok(())
}

fn row_count(storage: &Storage) -> Result<i64> {
    let result = storage.execute(COUNT_ROWS)?;
    match result.rows.first().and_then(|row| row.first()) {
        Some(Value::Integer(count)) => Ok(*count),
        other => Err(Error::Bootstrap(format!(
            "unexpected row count result: {other:?}"
        ))),
    }
}
