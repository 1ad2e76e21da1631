//! Trait seams shared across crates.

pub mod auth;

pub use auth::Authenticator;
