// src/tree/mod.rs
// =============================================================================
// This module contains the tree pipeline: the data model plus the three
// pure transformations that both the workspace and remote flows share.
//
// Submodules:
// - build: flat {path, type} entries -> nested tree
// - filter: prune directories with no Markdown descendants
// - select: auto-select the "basic" Markdown files
//
// There is deliberately only ONE copy of this logic. Both flows feed it
// their own entry lists and get back the same tree semantics.
//
// Rust concepts:
// - Enums: NodeKind is a two-variant tagged union instead of magic strings
// - serde: Custom deserialization to normalize external vocabulary
// - pub use: Re-export the pipeline functions as a flat API
// =============================================================================

mod build;
mod filter;
mod select;

// Re-export the pipeline so callers write `tree::build_tree(...)` etc.
pub use build::build_tree;
pub use filter::{all_file_paths, all_folder_paths, filter_empty_folders, has_markdown_files};
pub use select::auto_select_basic_files;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

// What a node is: a file or a directory. Nothing else.
//
// External listings use strings for this ("file", "tree", and GitHub's
// "blob"). We collapse that vocabulary to two variants at the serde
// boundary so the rest of the code never sees a string kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // The manifest format spells these "file" and "tree"
        match self {
            NodeKind::File => serializer.serialize_str("file"),
            NodeKind::Directory => serializer.serialize_str("tree"),
        }
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // "blob" is GitHub's word for a file; the manifest says "file"
        match raw.as_str() {
            "file" | "blob" => Ok(NodeKind::File),
            "tree" => Ok(NodeKind::Directory),
            other => Err(de::Error::custom(format!("unknown entry kind '{other}'"))),
        }
    }
}

// One record of a flat listing: a path plus what it points at.
//
// This is the shape of both the local file-list.json manifest and the
// entries inside GitHub's git/trees response. Unknown kinds (GitHub
// submodules show up as "commit") fail NodeKind deserialization and are
// skipped by the callers that ingest raw listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// '/'-delimited path relative to the listing root
    pub path: String,
    /// File or directory, normalized from the external vocabulary
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

// A node of the instruction tree.
//
// The path is the primary key: unique within a tree, '/'-delimited, and
// every ancestor path of a node is itself a node in the same tree.
// Trees are always rebuilt from a fresh listing, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub path: String,
    pub kind: NodeKind,
    /// Populated for directories; files keep this empty
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn file(path: impl Into<String>) -> Self {
        TreeNode {
            path: path.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn directory(path: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode {
            path: path.into(),
            kind: NodeKind::Directory,
            children,
        }
    }

    /// True for file nodes whose path ends in `.md`
    pub fn is_markdown_file(&self) -> bool {
        self.kind == NodeKind::File && self.path.ends_with(".md")
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an enum instead of the original strings?
//    - With strings, a typo like "flie" compiles and silently misbehaves
//    - With an enum, the compiler forces us to handle exactly two cases
//    - The messy vocabulary ("blob" vs "file") is dealt with once, here
//
// 2. What is #[serde(rename = "type")]?
//    - `type` is a reserved word in Rust, so the field is called `kind`
//    - rename maps it back to the JSON key "type" when (de)serializing
//
// 3. Why does TreeNode derive PartialEq?
//    - So tests can compare whole trees with assert_eq!
// -----------------------------------------------------------------------------
