//! Unified application error types for dirbrowse.
//!
//! All crates map their internal errors into [`AppError`] so the HTTP layer
//! has exactly one type to translate into a response.

use std::fmt;
use thiserror::Error;

/// Error categories shared by every dirbrowse crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Malformed request input (bad body, missing fields).
    Validation,
    /// Bad password or unknown user. Both look identical from outside.
    InvalidCredentials,
    /// No session cookie, or the session is unknown or expired.
    Unauthenticated,
    /// The requested path escapes the root or is not well-formed.
    PathRejected,
    /// The confined path does not exist.
    NotFound,
    /// The confined path exists but is not a directory.
    NotADirectory,
    /// The HTTP method is not supported on this route.
    MethodNotAllowed,
    /// Invalid or unreadable configuration.
    Configuration,
    /// The secure random source failed; no credential can be issued.
    EntropyUnavailable,
    /// Any other unexpected failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::PathRejected => write!(f, "PATH_REJECTED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::NotADirectory => write!(f, "NOT_A_DIRECTORY"),
            Self::MethodNotAllowed => write!(f, "METHOD_NOT_ALLOWED"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::EntropyUnavailable => write!(f, "ENTROPY_UNAVAILABLE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout dirbrowse.
///
/// `message` is the text shown to clients for 4xx kinds. For server-side
/// kinds it is only logged; the HTTP layer replaces it with a generic one.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create the single invalid-credentials error.
    ///
    /// The message is fixed so an unknown user and a wrong password
    /// produce byte-identical responses.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials, "Invalid credentials")
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated() -> Self {
        Self::new(ErrorKind::Unauthenticated, "Unauthorized")
    }

    /// Create a path-rejected error. The detail is for logs only.
    pub fn path_rejected(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::PathRejected, detail)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a not-a-directory error.
    pub fn not_a_directory(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotADirectory, message)
    }

    /// Create a method-not-allowed error.
    pub fn method_not_allowed(method: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::MethodNotAllowed,
            format!("Method not allowed: {method}"),
        )
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an entropy-unavailable error.
    pub fn entropy_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EntropyUnavailable, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error is a server-side failure whose detail must not be
    /// shown to clients.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Configuration | ErrorKind::EntropyUnavailable | ErrorKind::Internal
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
