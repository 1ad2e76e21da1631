//! Directory listing models.

pub mod model;

pub use model::{DirectoryListing, EntryInfo, EntryKind};
