//! Directory listing model returned by the browse endpoint.

use serde::{Deserialize, Serialize};

/// The kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// A regular file, or anything that is not a directory.
    #[serde(rename = "file")]
    File,
    /// A directory.
    #[serde(rename = "dir")]
    Directory,
}

impl EntryKind {
    /// Classify from a directory flag.
    pub fn from_is_dir(is_dir: bool) -> Self {
        if is_dir { Self::Directory } else { Self::File }
    }
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInfo {
    /// File name (no path).
    pub name: String,
    /// File or directory.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Size in bytes as reported by metadata.
    pub size: u64,
}

/// A listed directory and its immediate children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// Last segment of the requested path, or `/` for the root.
    pub name: String,
    /// Always [`EntryKind::Directory`].
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Sum of the children's sizes (not recursive).
    pub size: u64,
    /// Immediate children sorted by name.
    pub contents: Vec<EntryInfo>,
}

impl DirectoryListing {
    /// Build a listing; the aggregate size is computed from `contents`.
    pub fn new(name: impl Into<String>, contents: Vec<EntryInfo>) -> Self {
        let size = contents.iter().map(|e| e.size).sum();
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            size,
            contents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let listing = DirectoryListing::new(
            "docs",
            vec![
                EntryInfo { name: "a.txt".into(), kind: EntryKind::File, size: 100 },
                EntryInfo { name: "sub".into(), kind: EntryKind::Directory, size: 4096 },
            ],
        );

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["name"], "docs");
        assert_eq!(json["type"], "dir");
        assert_eq!(json["size"], 4196);
        assert_eq!(json["contents"][0]["type"], "file");
        assert_eq!(json["contents"][1]["type"], "dir");
    }
}
