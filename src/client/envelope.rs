//! Response envelope normalization.
//!
//! The API wraps payloads inconsistently: some endpoints answer with the bare record or array,
//! some with `{success, data}`, list endpoints with `{data, meta}`, and the breed catalog with a
//! double-wrapped `{data: {data, meta}}`. Everything is normalized here, once, so services never
//! inspect response shapes themselves.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    error::Error,
    model::api::{Page, PaginationMeta},
};

/// Strips `{success, data}` envelopes, repeatedly for double-wrapped payloads.
///
/// Objects that merely have a `data` key (list envelopes) are left untouched; only objects with
/// a boolean `success` flag next to `data` count as envelopes.
pub fn unwrap_payload(mut value: Value) -> Value {
    while let Value::Object(map) = &mut value {
        if !is_success_envelope(map) {
            break;
        }
        let inner = map.remove("data").unwrap_or(Value::Null);
        value = inner;
    }
    value
}

fn is_success_envelope(map: &Map<String, Value>) -> bool {
    matches!(map.get("success"), Some(Value::Bool(_))) && map.contains_key("data")
}

/// Normalizes a list payload into a [`Page`].
///
/// # Accepted shapes
/// - `[...]` - bare array, no pagination
/// - `{data: [...]}` - wrapped array
/// - `{data: [...], meta: {...}}` - paginated envelope
/// - `{data: {data: [...], meta: {...}}}` - double-wrapped envelope
/// - `null` - empty body, treated as an empty page
///
/// # Returns
/// - `Ok(Page<T>)` - Items and, for paginated responses, their metadata
/// - `Err(Error::InvalidEnvelope)` - Any other shape
/// - `Err(Error::DecodeError)` - Items or metadata don't match their types
pub fn into_page<T: DeserializeOwned>(value: Value) -> Result<Page<T>, Error> {
    match unwrap_payload(value) {
        Value::Null => Ok(Page::empty()),
        items @ Value::Array(_) => Ok(Page::unpaginated(serde_json::from_value(items)?)),
        Value::Object(mut map) => match map.remove("data") {
            Some(items @ Value::Array(_)) => {
                let meta = map
                    .remove("meta")
                    .filter(|meta| !meta.is_null())
                    .map(serde_json::from_value::<PaginationMeta>)
                    .transpose()?;

                Ok(Page {
                    items: serde_json::from_value(items)?,
                    meta,
                })
            }
            Some(inner @ Value::Object(_)) => into_page(inner),
            Some(other) => Err(Error::InvalidEnvelope(format!(
                "expected list under `data`, found {}",
                type_name(&other)
            ))),
            None => Err(Error::InvalidEnvelope(
                "object without `data` field where a list was expected".to_string(),
            )),
        },
        other => Err(Error::InvalidEnvelope(format!(
            "expected list, found {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
