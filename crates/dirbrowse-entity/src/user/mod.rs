//! Credential entity.

pub mod credential;

pub use credential::CredentialRecord;
