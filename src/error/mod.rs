//! Error types for the herdbook client.
//!
//! This module provides the error taxonomy shared by the API client, entity services and
//! data hooks. Errors are defined with `thiserror`, aggregate into a single [`Error`] type via
//! `#[from]` conversions, and classify into an [`ErrorKind`] so callers can tell a not-found
//! read, a stale-version conflict and a transport failure apart without matching on strings.

pub mod api;
pub mod config;
pub mod kind;

use thiserror::Error;

pub use api::ApiError;
pub use config::ConfigError;
pub use kind::{ErrorKind, HookError};

/// Main error type for the herdbook client.
///
/// Aggregates configuration, HTTP status, transport and decoding failures into one type so
/// service methods can use the `?` operator across every layer.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - API errors (non-2xx responses carrying the server's status and message)
/// - Transport errors (connection failures, invalid requests)
/// - Decode errors (response bodies that don't match the expected shape)
/// - Cancellation (a newer request superseded this one)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// The API answered with a non-2xx status.
    #[error(transparent)]
    ApiError(#[from] ApiError),
    /// HTTP transport error (connection refused, DNS, invalid request).
    #[error(transparent)]
    RequestError(#[from] reqwest::Error),
    /// Response body could not be decoded into the expected type.
    #[error(transparent)]
    DecodeError(#[from] serde_json::Error),
    /// Response body was valid JSON but not a recognised envelope shape.
    #[error("Unrecognised response envelope: {0}")]
    InvalidEnvelope(String),
    /// A farm-scoped resource was requested without a farm ID.
    #[error("Resource {0} is farm-scoped but no farm ID was provided")]
    MissingFarmId(&'static str),
    /// A record hook was asked to mutate before any record was loaded.
    #[error("No {0} is loaded")]
    NoRecordLoaded(&'static str),
    /// The request was cancelled before it completed.
    #[error("Request was cancelled")]
    Cancelled,
}

impl Error {
    /// Returns the HTTP status of an API error, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError(err) => Some(err.status),
            Self::RequestError(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Returns true when the server answered 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Returns true when the server rejected a write with 409 Conflict.
    ///
    /// Raised for stale `version` values on optimistically locked resources and for
    /// referential constraints such as deleting a record that still has dependents.
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}
