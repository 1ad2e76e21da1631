//! Session lifecycle management.

pub mod store;
pub mod token;

pub use store::SessionStore;
pub use token::{OsTokenGenerator, TOKEN_BYTES, TokenGenerator};
