use crate::core::types::ErrorEnvelope;
use std::fmt;
use thiserror::Error;

/// Sentinel used when an application code or HTTP status is not available.
pub const UNKNOWN_CODE: i32 = -1;

/// Application code the platform uses for an insufficient-balance rejection
pub const INSUFFICIENT_BALANCE_CODE: i32 = 1002;

const INSUFFICIENT_BALANCE_TEXT: &str = "insufficient balance";

/// Raw context attached to every error returned by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    pub message: String,
    /// Service-defined code from the error envelope, `-1` when absent
    pub code: i32,
    /// HTTP status of the response, `-1` when the failure did not come from HTTP
    pub http_status: i32,
}

impl ErrorDetails {
    pub fn new(message: impl Into<String>, code: i32, http_status: i32) -> Self {
        Self {
            message: message.into(),
            code,
            http_status,
        }
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Discriminant of [`MudrexError`] for callers that only need to branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    RateLimit,
    Validation,
    InsufficientBalance,
    NotFound,
    Conflict,
    Server,
    Generic,
}

#[derive(Error, Debug)]
pub enum MudrexError {
    #[error("Authentication failed: {0}")]
    Authentication(ErrorDetails),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(ErrorDetails),

    #[error("Validation error: {0}")]
    Validation(ErrorDetails),

    #[error("Insufficient balance: {0}")]
    InsufficientBalance(ErrorDetails),

    #[error("Not found: {0}")]
    NotFound(ErrorDetails),

    #[error("Conflict: {0}")]
    Conflict(ErrorDetails),

    #[error("Server error: {0}")]
    Server(ErrorDetails),

    #[error("API error: {0}")]
    Api(ErrorDetails),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] crate::core::config::ConfigError),
}

impl MudrexError {
    /// Map a response with status >= 400 to its error kind.
    ///
    /// `body` is decoded as a response envelope. The message is the envelope's
    /// top-level `message`, or the raw body when that is absent. A body that is
    /// not JSON (including an empty one) yields a generic [`MudrexError::Api`]
    /// carrying the raw text.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let http_status = i32::from(status);
        let raw = String::from_utf8_lossy(body);

        let envelope = match serde_json::from_slice::<Option<ErrorEnvelope>>(body) {
            Ok(envelope) => envelope,
            Err(_) => {
                return Self::Api(ErrorDetails::new(
                    format!("Failed to parse error response: {}", raw),
                    UNKNOWN_CODE,
                    http_status,
                ));
            }
        };

        let code = envelope
            .as_ref()
            .and_then(|e| e.error.as_ref())
            .and_then(|e| e.code)
            .unwrap_or(UNKNOWN_CODE);
        let message = envelope
            .and_then(|e| e.message)
            .unwrap_or_else(|| raw.into_owned());

        Self::from_status(http_status, code, message)
    }

    /// Pick the error kind for an HTTP failure whose envelope has been decoded
    pub fn from_status(http_status: i32, code: i32, message: String) -> Self {
        let details = ErrorDetails::new(message, code, http_status);
        match http_status {
            401 => Self::Authentication(details),
            429 => Self::RateLimit(details),
            400 if code == INSUFFICIENT_BALANCE_CODE
                || details.message.contains(INSUFFICIENT_BALANCE_TEXT) =>
            {
                Self::InsufficientBalance(details)
            }
            400 => Self::Validation(details),
            404 => Self::NotFound(details),
            409 => Self::Conflict(details),
            s if s >= 500 => Self::Server(details),
            _ => Self::Api(details),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Validation(_) => ErrorKind::Validation,
            Self::InsufficientBalance(_) => ErrorKind::InsufficientBalance,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Server(_) => ErrorKind::Server,
            Self::Api(_)
            | Self::Transport(_)
            | Self::Json(_)
            | Self::InvalidResponse(_)
            | Self::InvalidParameters(_)
            | Self::Configuration(_) => ErrorKind::Generic,
        }
    }

    /// Details reported by the platform, if this error came from an HTTP response
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Authentication(d)
            | Self::RateLimit(d)
            | Self::Validation(d)
            | Self::InsufficientBalance(d)
            | Self::NotFound(d)
            | Self::Conflict(d)
            | Self::Server(d)
            | Self::Api(d) => Some(d),
            _ => None,
        }
    }

    /// Application code from the error envelope, `-1` when absent
    pub fn code(&self) -> i32 {
        self.details().map_or(UNKNOWN_CODE, |d| d.code)
    }

    /// HTTP status of the failed response, `-1` for failures outside HTTP
    pub fn http_status(&self) -> i32 {
        self.details().map_or(UNKNOWN_CODE, |d| d.http_status)
    }

    /// Human-readable message; the platform's own text for HTTP failures
    pub fn message(&self) -> String {
        self.details()
            .map_or_else(|| self.to_string(), |d| d.message.clone())
    }

    /// True for validation failures, including insufficient balance
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InsufficientBalance(_))
    }
}
