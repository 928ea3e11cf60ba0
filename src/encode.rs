//! Result set → single-line JSON.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::db::ResultSet;
use crate::error::Result;
use crate::value::Value;

/// One row serialized as an object, keys in statement column order.
struct JsonRow<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl Serialize for JsonRow<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Encode a result set as one JSON array of row objects on a single line.
///
/// Rows keep engine emission order, keys keep statement column order, and
/// zero rows encode to the literal `[]`.
///
/// # Errors
/// Returns an error for values with no JSON representation (e.g. a
/// non-finite float); the command loop reports it in-band.
pub fn encode(result: &ResultSet) -> Result<String> {
    let rows: Vec<JsonRow<'_>> = result
        .rows
        .iter()
        .map(|values| JsonRow {
            columns: &result.columns,
            values,
        })
        .collect();
    Ok(serde_json::to_string(&rows)?)
}
