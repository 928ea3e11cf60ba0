//! Dynamically-typed scalars at the engine boundary.
//!
//! The engine reports each cell with its native column type; everything the
//! wire format can carry collapses into [`Value`] here. Conversion rules:
//!
//! 1. All integer widths → `Integer`; 128-bit and `u64` values that overflow
//!    `i64` fall back to their decimal rendering as `Text`
//! 2. `FLOAT`/`DOUBLE` → `Float`; `DECIMAL` → `Float` (or `Text` when not
//!    representable as an f64)
//! 3. `DATE` → `Date`, `TIME` → `Time`, `TIMESTAMP` of any unit → `Timestamp`
//! 4. `BLOB`, nested, and interval types have no JSON scalar shape and are
//!    reported as encoding errors on the command that produced them

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use duckdb::types::{TimeUnit, ValueRef};
use rust_decimal::prelude::ToPrimitive;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Days between 0001-01-01 (chrono's day zero) and 1970-01-01 (the engine's).
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A single column value as read back from the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Convert one engine cell into its scalar representation.
    pub fn from_engine(cell: ValueRef<'_>) -> Result<Self> {
        match cell {
            ValueRef::Null => Ok(Value::Null),
            ValueRef::Boolean(b) => Ok(Value::Boolean(b)),
            ValueRef::TinyInt(i) => Ok(Value::Integer(i64::from(i))),
            ValueRef::SmallInt(i) => Ok(Value::Integer(i64::from(i))),
            ValueRef::Int(i) => Ok(Value::Integer(i64::from(i))),
            ValueRef::BigInt(i) => Ok(Value::Integer(i)),
            ValueRef::HugeInt(i) => Ok(i64::try_from(i)
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(i.to_string()))),
            ValueRef::UTinyInt(i) => Ok(Value::Integer(i64::from(i))),
            ValueRef::USmallInt(i) => Ok(Value::Integer(i64::from(i))),
            ValueRef::UInt(i) => Ok(Value::Integer(i64::from(i))),
            ValueRef::UBigInt(i) => Ok(i64::try_from(i)
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::Text(i.to_string()))),
            ValueRef::Float(f) => Ok(Value::Float(f64::from(f))),
            ValueRef::Double(f) => Ok(Value::Float(f)),
            ValueRef::Decimal(d) => Ok(rust_decimal::Decimal::try_from(d)
                .ok()
                .and_then(|decimal| decimal.to_f64())
                .map(Value::Float)
                .unwrap_or_else(|| Value::Text(d.to_string()))),
            ValueRef::Text(bytes) => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| Error::Encoding(format!("invalid UTF-8 in text column: {e}")))?;
                Ok(Value::Text(text.to_owned()))
            }
            ValueRef::Date32(days) => {
                NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
                    .map(Value::Date)
                    .ok_or_else(|| Error::Encoding(format!("date out of range: {days}")))
            }
            ValueRef::Time64(unit, raw) => {
                let micros = to_micros(unit, raw);
                NaiveTime::from_num_seconds_from_midnight_opt(
                    (micros / 1_000_000) as u32,
                    ((micros % 1_000_000) * 1_000) as u32,
                )
                .map(Value::Time)
                .ok_or_else(|| Error::Encoding(format!("time out of range: {raw}")))
            }
            ValueRef::Timestamp(unit, raw) => DateTime::from_timestamp_micros(to_micros(unit, raw))
                .map(|ts| Value::Timestamp(ts.naive_utc()))
                .ok_or_else(|| Error::Encoding(format!("timestamp out of range: {raw}"))),
            ValueRef::Blob(_) => Err(Error::Encoding(
                "BLOB values have no JSON representation".to_owned(),
            )),
            _ => Err(Error::Encoding(
                "unsupported column type for JSON output".to_owned(),
            )),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(f) => Err(S::Error::custom(format!(
                "non-finite value {f} cannot be encoded as JSON"
            ))),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.collect_str(d),
            Value::Time(t) => serializer.collect_str(t),
            Value::Timestamp(ts) => serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

fn to_micros(unit: TimeUnit, raw: i64) -> i64 {
    match unit {
        TimeUnit::Second => raw.saturating_mul(1_000_000),
        TimeUnit::Millisecond => raw.saturating_mul(1_000),
        TimeUnit::Microsecond => raw,
        TimeUnit::Nanosecond => raw / 1_000,
    }
}
