//! Fallbacks for unsupported methods.

use axum::http::Method;

use dirbrowse_core::error::AppError;

use crate::error::ApiError;

/// Method fallback for every API route.
pub async fn method_not_allowed(method: Method) -> ApiError {
    AppError::method_not_allowed(method).into()
}
