//! # dirbrowse-auth
//!
//! Authentication and session management for dirbrowse.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `credential`: timing-safe username/password validation
//! - `session`: opaque session tokens and the in-memory session store

pub mod credential;
pub mod password;
pub mod session;

pub use credential::CredentialValidator;
pub use password::PasswordHasher;
pub use session::{OsTokenGenerator, SessionStore, TokenGenerator};
