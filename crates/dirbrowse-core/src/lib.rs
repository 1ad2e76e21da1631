//! # dirbrowse-core
//!
//! Core crate for dirbrowse. Contains the configuration schemas, the
//! credential backend trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other dirbrowse crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
