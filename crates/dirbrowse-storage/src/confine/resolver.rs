//! Resolution of client paths against the configured root.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use dirbrowse_core::error::{AppError, ErrorKind};
use dirbrowse_core::result::AppResult;

use super::normalize::{clean_absolute, escapes_base, lexical_relative, normalize_request_path};

/// Dangling symlinks followed before a missing path counts as outside.
const MAX_LINK_HOPS: usize = 40;

/// Confines client-supplied paths to a single root directory.
///
/// Every request path is checked lexically before the filesystem is
/// consulted. After the target is known to exist, its canonical form must
/// still sit under the canonical root, so a symlink inside the tree cannot
/// point a request outside it.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Lexically cleaned absolute root.
    root: PathBuf,
    /// Root with symlinks resolved.
    canonical_root: PathBuf,
}

/// A directory that passed every confinement check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConfinedDir {
    /// Canonical location on disk.
    pub path: PathBuf,
    /// Normalized request segments; empty for the root.
    pub segments: Vec<String>,
}

impl PathResolver {
    /// Creates a resolver for `root`, which must be an existing directory.
    pub fn new(root: impl AsRef<Path>) -> AppResult<Self> {
        let given = root.as_ref();
        let root = clean_absolute(given)?;

        let canonical_root = std::fs::canonicalize(&root).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Browse root is not accessible: {}", root.display()),
                e,
            )
        })?;
        if !canonical_root.is_dir() {
            return Err(AppError::configuration(format!(
                "Browse root is not a directory: {}",
                root.display()
            )));
        }

        Ok(Self {
            root,
            canonical_root,
        })
    }

    /// The lexically cleaned absolute root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `request_path` to a directory inside the root.
    ///
    /// Rejected paths fail with [`ErrorKind::PathRejected`] before any
    /// filesystem call. Missing paths give [`ErrorKind::NotFound`], anything
    /// that is not a directory gives [`ErrorKind::NotADirectory`].
    pub async fn resolve(&self, request_path: &str) -> AppResult<PathBuf> {
        self.confine(request_path).await.map(|dir| dir.path)
    }

    pub(crate) async fn confine(&self, request_path: &str) -> AppResult<ConfinedDir> {
        let segments = normalize_request_path(request_path).inspect_err(|e| {
            debug!(path = request_path, reason = %e.message, "Rejected request path");
        })?;

        let joined = self.join_lexically(&segments)?;

        // First filesystem access.
        let canonical = match fs::canonicalize(&joined).await {
            Ok(canonical) => canonical,
            Err(e) => {
                if is_missing(&e) && !self.missing_is_confined(&joined).await {
                    debug!(path = request_path, "Missing request path lies outside the root");
                    return Err(AppError::path_rejected(format!(
                        "Path resolves outside the root: {request_path:?}"
                    )));
                }
                return Err(lookup_error(e, request_path));
            }
        };
        if !canonical.starts_with(&self.canonical_root) {
            debug!(path = request_path, "Request path resolves outside the root");
            return Err(AppError::path_rejected(format!(
                "Path resolves outside the root: {request_path:?}"
            )));
        }

        let metadata = fs::metadata(&canonical)
            .await
            .map_err(|e| lookup_error(e, request_path))?;
        if !metadata.is_dir() {
            return Err(AppError::not_a_directory(format!(
                "Not a directory: {request_path:?}"
            )));
        }

        Ok(ConfinedDir {
            path: canonical,
            segments,
        })
    }

    /// Whether a path that does not exist would still have been inside the
    /// root.
    ///
    /// The deepest existing ancestor decides. A dangling symlink on the way
    /// is followed through its target, so a missing path behind a link out
    /// of the root is rejected the same way as an existing one.
    async fn missing_is_confined(&self, missing: &Path) -> bool {
        let mut probe = missing.to_path_buf();

        for _ in 0..MAX_LINK_HOPS {
            let mut current = probe.as_path();
            let dangling = loop {
                match fs::symlink_metadata(current).await {
                    Ok(_) => match fs::canonicalize(current).await {
                        Ok(canonical) => return canonical.starts_with(&self.canonical_root),
                        Err(_) => break current.to_path_buf(),
                    },
                    Err(_) => match current.parent() {
                        Some(parent) => current = parent,
                        None => return false,
                    },
                }
            };

            let Ok(target) = fs::read_link(&dangling).await else {
                return false;
            };
            let target = match dangling.parent() {
                Some(parent) => parent.join(target),
                None => target,
            };
            probe = match clean_absolute(&target) {
                Ok(cleaned) => cleaned,
                Err(_) => return false,
            };
        }

        false
    }

    fn join_lexically(&self, segments: &[String]) -> AppResult<PathBuf> {
        let mut joined = self.root.clone();
        joined.extend(segments);

        let within = lexical_relative(&self.root, &joined).is_some_and(|rel| !escapes_base(&rel));
        if !within {
            return Err(AppError::path_rejected(format!(
                "Path leaves the root: {}",
                joined.display()
            )));
        }
        Ok(joined)
    }
}

fn is_missing(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Maps a lookup failure on a confined path.
///
/// A regular file used as an intermediate component means the path does not
/// exist as a directory tree.
fn lookup_error(err: io::Error, request_path: &str) -> AppError {
    if is_missing(&err) {
        return AppError::not_found(format!("Path not found: {request_path:?}"));
    }
    AppError::with_source(
        ErrorKind::Internal,
        format!("Failed to stat path: {request_path:?}"),
        err,
    )
}
