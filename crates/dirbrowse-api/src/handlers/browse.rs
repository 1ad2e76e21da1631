//! Directory browsing handler.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use dirbrowse_core::error::AppError;
use dirbrowse_entity::listing::DirectoryListing;

use crate::dto::request::BrowseQuery;
use crate::error::ApiError;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// GET /api/v1/browse?path=<p>
///
/// The query string is percent-decoded before the path reaches the
/// resolver, so encoded parent segments are checked like plain ones.
pub async fn browse(
    State(state): State<AppState>,
    user: SessionUser,
    query: Result<Query<BrowseQuery>, QueryRejection>,
) -> Result<Json<DirectoryListing>, ApiError> {
    let Query(query) =
        query.map_err(|e| AppError::validation(format!("Invalid query: {}", e.body_text())))?;
    let path = query.path_or_root();

    let listing = state.resolver.list(path).await?;
    tracing::debug!(user = %user.user_id(), entries = listing.contents.len(), "Browse");

    Ok(Json(listing))
}
