use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// Builds query pairs from a filter struct.
///
/// Only defined keys are kept: `None` fields, blank strings and nested objects are dropped.
/// Arrays are sent comma-separated. Keys come out in lexicographic order so identical filters
/// always produce identical URLs.
///
/// # Arguments
/// - `filters` - Any serializable filter, typically a struct of `Option` fields; `()` yields no pairs
///
/// # Returns
/// - `Ok(Vec<(String, String)>)` - Query pairs ready for `RequestOptions::with_query`
/// - `Err(Error::DecodeError)` - Filter failed to serialize
pub fn query_pairs<F: Serialize + ?Sized>(filters: &F) -> Result<Vec<(String, String)>, Error> {
    let Value::Object(map) = serde_json::to_value(filters)? else {
        return Ok(Vec::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| scalar_text(value).map(|text| (key, text)))
        .collect())
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(scalar_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
    }
}
