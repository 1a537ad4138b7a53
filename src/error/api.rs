use serde_json::Value;
use thiserror::Error;

/// Error returned by the API for any non-2xx response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Request failed with status {status}: {message}")]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Human-readable message extracted from the response body
    pub message: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Builds an API error from a raw response body.
    ///
    /// The backend is not consistent about where it puts the error message, so the body is
    /// checked for `message`, `error` and `error.message` in that order. When the body isn't
    /// JSON or carries none of these fields the raw text is used, and an empty body falls back
    /// to a generic message.
    ///
    /// # Arguments
    /// - `status` - HTTP status code of the failed response
    /// - `body` - Raw response body
    ///
    /// # Returns
    /// - `ApiError` - Error carrying the status and the best available message
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| extract_message(&value))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "Unknown error".to_string()
                } else {
                    trimmed.to_string()
                }
            });

        Self::new(status, message)
    }
}

fn extract_message(value: &Value) -> Option<String> {
    if let Some(message) = value.get("message").and_then(message_text) {
        return Some(message);
    }

    match value.get("error") {
        Some(Value::String(error)) => Some(error.clone()),
        Some(error @ Value::Object(_)) => error.get("message").and_then(message_text),
        _ => None,
    }
}

// NestJS-style validation errors send `message` as an array of strings
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}
