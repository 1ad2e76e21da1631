//! Path confinement.

pub mod normalize;
pub mod resolver;

pub use normalize::{clean_absolute, escapes_base, lexical_relative, normalize_request_path};
pub use resolver::PathResolver;
