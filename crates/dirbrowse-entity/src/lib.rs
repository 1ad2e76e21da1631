//! # dirbrowse-entity
//!
//! Plain domain models shared by the auth, storage, and API crates.

pub mod listing;
pub mod session;
pub mod user;

pub use listing::{DirectoryListing, EntryInfo, EntryKind};
pub use session::Session;
pub use user::CredentialRecord;
