//! Route definitions for the dirbrowse HTTP API.
//!
//! All routes are mounted under `/api/v1`. Unsupported methods on a known
//! route get a JSON 405; the session gate runs only once the method matched.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(browse_routes(state.clone()))
        .merge(health_routes());

    Router::new()
        .nest(API_PREFIX, api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login and logout. Both are public.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            post(handlers::auth::login).fallback(handlers::fallback::method_not_allowed),
        )
        .route(
            "/logout",
            post(handlers::auth::logout).fallback(handlers::fallback::method_not_allowed),
        )
}

/// Directory listing, behind the session gate.
fn browse_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/browse",
        get(handlers::browse::browse)
            .route_layer(axum_middleware::from_fn_with_state(
                state,
                middleware::auth::require_session,
            ))
            .fallback(handlers::fallback::method_not_allowed),
    )
}

/// Liveness probe.
fn health_routes() -> Router<AppState> {
    Router::new().route(
        "/health",
        get(handlers::health::health).fallback(handlers::fallback::method_not_allowed),
    )
}
