//! # dirbrowse-storage
//!
//! Confines client-supplied paths to a single root directory and lists the
//! directories found there.
//!
//! ## Modules
//!
//! - `confine`: lexical normalization and the [`PathResolver`]
//! - `listing`: directory enumeration for confined paths

pub mod confine;
pub mod listing;

pub use confine::PathResolver;
