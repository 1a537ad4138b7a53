use std::fmt;

use super::Error;

/// Classification of an [`Error`] for callers deciding how to present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 404 - the resource doesn't exist (reads normalize this to empty/absent)
    NotFound,
    /// 409 - stale `version` or a referential constraint
    Conflict,
    /// 400/422 - the request payload was rejected
    Validation,
    /// 401/403 - missing or insufficient credentials
    Unauthorized,
    /// 5xx - the API failed to handle the request
    Server,
    /// Connection failures and any other unexpected status
    Transport,
    /// Response body didn't match the expected shape
    Decode,
    /// Request superseded by a newer one
    Cancelled,
    /// Client misconfiguration (missing environment or farm ID)
    Config,
}

impl Error {
    /// Determine the error kind based upon the application Error type
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ApiError(err) => match err.status {
                404 => ErrorKind::NotFound,
                409 => ErrorKind::Conflict,
                400 | 422 => ErrorKind::Validation,
                401 | 403 => ErrorKind::Unauthorized,
                s if s >= 500 => ErrorKind::Server,
                _ => ErrorKind::Transport,
            },

            // reqwest only carries a status when `error_for_status` produced the error,
            // otherwise it's a connection or request building failure
            Self::RequestError(err) => match err.status() {
                Some(status) if status.is_server_error() => ErrorKind::Server,
                _ if err.is_decode() => ErrorKind::Decode,
                _ => ErrorKind::Transport,
            },

            Self::DecodeError(_) => ErrorKind::Decode,
            Self::InvalidEnvelope(_) => ErrorKind::Decode,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::ConfigError(_) => ErrorKind::Config,
            Self::MissingFarmId(_) | Self::NoRecordLoaded(_) => ErrorKind::Config,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::Unauthorized => "unauthorized",
            Self::Server => "server",
            Self::Transport => "transport",
            Self::Decode => "decode",
            Self::Cancelled => "cancelled",
            Self::Config => "config",
        };
        f.write_str(label)
    }
}

/// Cloneable snapshot of an [`Error`] kept in hook state.
///
/// `Error` wraps `reqwest::Error` which isn't `Clone`, so hooks store the kind and the rendered
/// message instead of the error itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl From<&Error> for HookError {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)
    }
}
