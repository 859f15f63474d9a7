// src/tree/filter.rs
// =============================================================================
// This module prunes the built tree down to what the user should see:
// only Markdown files, and only directories that (transitively) contain
// at least one of them.
//
// The filter rewrites the tree bottom-up: a directory's children are
// filtered first, and the directory survives only if anything is left.
// Running the filter on its own output changes nothing (idempotent).
//
// Rust concepts:
// - Recursion: Trees are naturally processed recursively
// - into_iter + filter_map: Consume the input tree, build a new one
// =============================================================================

use super::{NodeKind, TreeNode};

// Does this node lead to at least one Markdown file?
//
// For a file: true iff the path ends in .md
// For a directory: true iff any child satisfies this predicate
//
// This predicate underlies every keep/drop decision the filter makes,
// so the two must never disagree.
pub fn has_markdown_files(node: &TreeNode) -> bool {
    match node.kind {
        NodeKind::File => node.path.ends_with(".md"),
        NodeKind::Directory => node.children.iter().any(has_markdown_files),
    }
}

// Prunes empty folders and non-Markdown files from a list of sibling nodes.
//
// Consumes the input and returns a fresh list: derived trees are always
// rebuilt wholesale, never patched in place.
pub fn filter_empty_folders(nodes: Vec<TreeNode>) -> Vec<TreeNode> {
    nodes
        .into_iter()
        .filter_map(|mut node| match node.kind {
            NodeKind::File => {
                if node.path.ends_with(".md") {
                    Some(node)
                } else {
                    None
                }
            }
            NodeKind::Directory => {
                // Filter children first, then decide about the directory
                node.children = filter_empty_folders(node.children);
                if node.children.is_empty() {
                    None
                } else {
                    Some(node)
                }
            }
        })
        .collect()
}

// Collects the paths of every file in the tree, depth-first.
//
// On a filtered tree this is the set of selectable paths: what --all
// selects, and what explicit selections are validated against.
pub fn all_file_paths(nodes: &[TreeNode]) -> Vec<String> {
    let mut paths = Vec::new();
    for node in nodes {
        match node.kind {
            NodeKind::File => paths.push(node.path.clone()),
            NodeKind::Directory => paths.extend(all_file_paths(&node.children)),
        }
    }
    paths
}

// Collects the paths of every directory in the tree, depth-first.
//
// The load flow expands all folders after a successful load, so this is
// exactly the set that seeds the expansion state.
pub fn all_folder_paths(nodes: &[TreeNode]) -> Vec<String> {
    let mut paths = Vec::new();
    for node in nodes {
        if node.kind == NodeKind::Directory {
            paths.push(node.path.clone());
            paths.extend(all_folder_paths(&node.children));
        }
    }
    paths
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does filter_empty_folders take Vec by value?
//    - It consumes the old tree and returns a new one
//    - No cloning needed: nodes we keep are moved, nodes we drop are freed
//
// 2. Why is `node` declared `mut` in the closure?
//    - We replace node.children with the filtered list before deciding
//      whether the directory survives
//
// 3. What keeps the filter idempotent?
//    - After one pass, every file ends in .md and every directory has a
//      markdown descendant, so a second pass keeps everything
// -----------------------------------------------------------------------------
