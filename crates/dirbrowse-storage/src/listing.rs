//! Directory listing for confined paths.

use tokio::fs;
use tracing::{debug, warn};

use dirbrowse_core::error::{AppError, ErrorKind};
use dirbrowse_core::result::AppResult;
use dirbrowse_entity::listing::{DirectoryListing, EntryInfo, EntryKind};

use crate::confine::PathResolver;

/// Name reported for the root directory.
pub const ROOT_NAME: &str = "/";

impl PathResolver {
    /// Lists the immediate children of the directory at `request_path`.
    ///
    /// Entries are sorted by name. Entry metadata does not follow symlinks,
    /// and entries whose metadata cannot be read are skipped.
    pub async fn list(&self, request_path: &str) -> AppResult<DirectoryListing> {
        let dir = self.confine(request_path).await?;

        let mut reader = fs::read_dir(&dir.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to list directory: {request_path:?}"),
                e,
            )
        })?;

        let mut contents = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to read directory entry", e)
        })? {
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(entry = ?entry.file_name(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            contents.push(EntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: EntryKind::from_is_dir(metadata.is_dir()),
                size: metadata.len(),
            });
        }
        contents.sort_by(|a, b| a.name.cmp(&b.name));

        let name = dir
            .segments
            .last()
            .map_or_else(|| ROOT_NAME.to_string(), Clone::clone);

        debug!(path = request_path, entries = contents.len(), "Listed directory");
        Ok(DirectoryListing::new(name, contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root/
    ///   dir1/ file1.txt (100) file2.txt (200) subdir/ file3.txt (300)
    ///   empty/
    fn fixture() -> (tempfile::TempDir, PathResolver) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("dir1/subdir")).unwrap();
        std::fs::create_dir(root.join("empty")).unwrap();
        std::fs::write(root.join("dir1/file1.txt"), vec![b'a'; 100]).unwrap();
        std::fs::write(root.join("dir1/file2.txt"), vec![b'b'; 200]).unwrap();
        std::fs::write(root.join("dir1/subdir/file3.txt"), vec![b'c'; 300]).unwrap();
        let resolver = PathResolver::new(root).unwrap();
        (dir, resolver)
    }

    fn names(listing: &DirectoryListing) -> Vec<&str> {
        listing.contents.iter().map(|e| e.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_root() {
        let (_dir, resolver) = fixture();
        let listing = resolver.list("/").await.unwrap();

        assert_eq!(listing.name, ROOT_NAME);
        assert_eq!(listing.kind, EntryKind::Directory);
        assert_eq!(names(&listing), ["dir1", "empty"]);
        assert!(listing.contents.iter().all(|e| e.kind == EntryKind::Directory));
    }

    #[tokio::test]
    async fn test_list_nested() {
        let (_dir, resolver) = fixture();
        let listing = resolver.list("/dir1").await.unwrap();

        assert_eq!(listing.name, "dir1");
        assert_eq!(names(&listing), ["file1.txt", "file2.txt", "subdir"]);
        assert_eq!(listing.contents[0].size, 100);
        assert_eq!(listing.contents[0].kind, EntryKind::File);
        assert_eq!(listing.contents[1].size, 200);
        assert_eq!(listing.contents[2].kind, EntryKind::Directory);
        assert_eq!(
            listing.size,
            listing.contents.iter().map(|e| e.size).sum::<u64>()
        );

        let sub = resolver.list("/dir1/subdir/").await.unwrap();
        assert_eq!(sub.name, "subdir");
        assert_eq!(sub.size, 300);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (_dir, resolver) = fixture();
        let listing = resolver.list("/empty").await.unwrap();

        assert_eq!(listing.name, "empty");
        assert!(listing.contents.is_empty());
        assert_eq!(listing.size, 0);
    }

    #[tokio::test]
    async fn test_list_propagates_confinement_errors() {
        let (_dir, resolver) = fixture();

        let err = resolver.list("/../etc").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::PathRejected);
        let err = resolver.list("/dir1/file1.txt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotADirectory);
        let err = resolver.list("/nope").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_entries_are_not_followed() {
        let (dir, resolver) = fixture();
        std::os::unix::fs::symlink("dir1", dir.path().join("link")).unwrap();

        let listing = resolver.list("/").await.unwrap();
        let link = listing.contents.iter().find(|e| e.name == "link").unwrap();
        assert_eq!(link.kind, EntryKind::File);
    }
}
