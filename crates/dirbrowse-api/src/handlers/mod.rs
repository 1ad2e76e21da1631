//! Route handlers organized by domain.

pub mod auth;
pub mod browse;
pub mod fallback;
pub mod health;
