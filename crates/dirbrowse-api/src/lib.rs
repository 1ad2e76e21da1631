//! # dirbrowse-api
//!
//! HTTP API layer for dirbrowse built on Axum.
//!
//! Provides the login, logout, browse and health endpoints, the session
//! gate that guards protected routes, cookie handling, and the mapping from
//! [`AppError`](dirbrowse_core::AppError) to JSON error responses.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
