//! Credential validation.

pub mod validator;

pub use validator::CredentialValidator;
