//! Convenience result type alias for dirbrowse.

use crate::error::AppError;

/// A specialized `Result` type for dirbrowse operations.
pub type AppResult<T> = Result<T, AppError>;
