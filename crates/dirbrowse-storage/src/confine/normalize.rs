//! Purely lexical path handling. Nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

use dirbrowse_core::error::AppError;
use dirbrowse_core::result::AppResult;

/// Splits a client path into confined segments.
///
/// The path must be absolute in URL form (start with `/`) and contain no
/// NUL byte. Empty and `.` segments are dropped and `..` removes the previous
/// segment. A `..` with nothing left to remove would climb above the root
/// and rejects the whole path. An empty result means the root itself.
///
/// Every other character, including backslashes and look-alike dots such as
/// `‥`, is part of an ordinary name.
pub fn normalize_request_path(raw: &str) -> AppResult<Vec<String>> {
    if !raw.starts_with('/') {
        return Err(AppError::path_rejected(format!(
            "Path must start with '/': {raw:?}"
        )));
    }
    if raw.contains('\0') {
        return Err(AppError::path_rejected("Path contains a NUL byte"));
    }

    let mut segments: Vec<String> = Vec::new();
    for part in raw.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(AppError::path_rejected(format!(
                        "Path climbs above the root: {raw:?}"
                    )));
                }
            }
            name => segments.push(name.to_owned()),
        }
    }
    Ok(segments)
}

/// Returns the absolute, lexically cleaned form of `path`.
///
/// Relative paths are taken against the current working directory. `..`
/// at the top stays at the top. Symlinks are not resolved.
pub fn clean_absolute(path: &Path) -> AppResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                cleaned.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(cleaned.components().next_back(), Some(Component::Normal(_))) {
                    cleaned.pop();
                }
            }
        }
    }
    Ok(cleaned)
}

/// Lexical path of `target` relative to `base`, both clean and absolute.
///
/// Returns `None` when the two share no root (different drive prefixes).
/// A target outside `base` yields a path starting with `..`.
pub fn lexical_relative(base: &Path, target: &Path) -> Option<PathBuf> {
    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    // Absolute paths start with their prefix or root; no shared start, no relation.
    if common == 0 {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

/// Whether a relative path produced by [`lexical_relative`] leaves its base.
pub fn escapes_base(relative: &Path) -> bool {
    matches!(relative.components().next(), Some(Component::ParentDir))
}
