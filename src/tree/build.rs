// src/tree/build.rs
// =============================================================================
// This module turns a flat file listing into a nested tree.
//
// Input: ordered entries like
//   {path: "lib/best-practices/basic-guidelines.md", type: "file"}
//   {path: "lib", type: "tree"}
// as they arrive from the manifest or from GitHub's recursive tree API.
//
// The listing is flat, so parent directories may or may not appear as
// their own entries (GitHub lists them, the manifest lists them, but we
// don't rely on it): we synthesize every missing prefix directory
// ourselves while walking each path.
//
// Rust concepts:
// - HashMap: Index from path -> position, for linking children to parents
// - Ownership: We build owned nodes and move them into their parents
// =============================================================================

use std::collections::HashMap;

use log::debug;

use super::{ManifestEntry, NodeKind, TreeNode};

// Builds the nested tree from a flat listing.
//
// Rules:
// - Files that don't end in .md are dropped up front
// - Directories are always kept provisionally (the filter pass decides
//   later whether they survive)
// - Every path prefix is materialized as a directory node if absent
// - A node is a Directory unless it is the final segment of a file entry
// - First writer wins: a path seen twice keeps its first node
//
// Children keep insertion order. No ordering beyond that is guaranteed.
pub fn build_tree(items: &[ManifestEntry]) -> Vec<TreeNode> {
    // We can't hold &mut references into a growing tree while also
    // looking nodes up by path, so we build in an arena: every node
    // lives in `nodes`, and parent/child links are arena indices.
    // At the end we assemble the real tree from the links.
    let mut nodes: Vec<TreeNode> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    // (parent index, child index) pairs, in insertion order
    let mut links: Vec<(usize, usize)> = Vec::new();
    // Indices of root-level nodes
    let mut roots: Vec<usize> = Vec::new();

    for item in items {
        // Skip non-Markdown files; directories pass through provisionally
        if item.kind != NodeKind::Directory && !item.path.ends_with(".md") {
            debug!("skipping non-markdown entry: {}", item.path);
            continue;
        }

        let parts: Vec<&str> = item.path.split('/').collect();
        let mut current_path = String::new();

        for (i, part) in parts.iter().enumerate() {
            let parent_path = current_path.clone();
            if current_path.is_empty() {
                current_path.push_str(part);
            } else {
                current_path.push('/');
                current_path.push_str(part);
            }

            // First writer wins on duplicate paths
            if index_of.contains_key(&current_path) {
                continue;
            }

            // Only the final segment of a file entry is a file;
            // every synthesized prefix is a directory
            let kind = if i == parts.len() - 1 {
                item.kind
            } else {
                NodeKind::Directory
            };

            let idx = nodes.len();
            nodes.push(TreeNode {
                path: current_path.clone(),
                kind,
                children: Vec::new(),
            });
            index_of.insert(current_path.clone(), idx);

            if parent_path.is_empty() {
                roots.push(idx);
            } else {
                // The parent was materialized on an earlier iteration of
                // this inner loop (or by an earlier item), so the lookup
                // cannot miss
                let parent_idx = index_of[&parent_path];
                links.push((parent_idx, idx));
            }
        }
    }

    assemble(nodes, links, roots)
}

// Moves arena nodes into their parents' children vectors.
//
// Links are processed deepest-child-first (children were always pushed
// after their parents, so reverse arena order works): by the time a node
// is moved into its parent, its own children are already attached.
fn assemble(nodes: Vec<TreeNode>, links: Vec<(usize, usize)>, roots: Vec<usize>) -> Vec<TreeNode> {
    // Group child indices under each parent, preserving insertion order
    let mut children_of: HashMap<usize, Vec<usize>> = HashMap::new();
    for (parent, child) in links {
        children_of.entry(parent).or_default().push(child);
    }

    // Take nodes out of the arena from the back; a node's children always
    // have higher indices than the node itself
    let mut taken: Vec<Option<TreeNode>> = nodes.into_iter().map(Some).collect();

    for idx in (0..taken.len()).rev() {
        if let Some(child_indices) = children_of.get(&idx) {
            let mut children = Vec::with_capacity(child_indices.len());
            for &child_idx in child_indices {
                // Every child index was taken at most once: links are unique
                // because first-writer-wins deduplicates nodes
                if let Some(child) = taken[child_idx].take() {
                    children.push(child);
                }
            }
            if let Some(node) = taken[idx].as_mut() {
                node.children = children;
            }
        }
    }

    roots
        .into_iter()
        .filter_map(|idx| taken[idx].take())
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an arena instead of nested &mut lookups?
//    - In a garbage-collected language you'd keep a map of path -> node
//      and mutate node.children freely through shared references
//    - Rust's borrow checker forbids holding two &mut into the same
//      structure, so we store indices (plain numbers) instead of
//      references and assemble the ownership tree in a second pass
//
// 2. What is filter_map?
//    - map + filter in one step: closure returns Option, None is dropped
//    - Here it unwraps the Options left in the arena slots
//
// 3. Why build paths with push_str instead of format!?
//    - This inner loop runs for every segment of every path;
//      push_str avoids allocating a fresh String each time
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> ManifestEntry {
        ManifestEntry {
            path: path.to_string(),
            kind: NodeKind::File,
        }
    }

    fn dir(path: &str) -> ManifestEntry {
        ManifestEntry {
            path: path.to_string(),
            kind: NodeKind::Directory,
        }
    }

    #[test]
    fn test_builds_nested_structure() {
        let items = vec![
            dir("lib"),
            file("lib/react.md"),
            dir("lib/best-practices"),
            file("lib/best-practices/basic-guidelines.md"),
        ];

        let tree = build_tree(&items);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].path, "lib");
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].path, "lib/react.md");

        let nested = &tree[0].children[1];
        assert_eq!(nested.path, "lib/best-practices");
        assert_eq!(nested.kind, NodeKind::Directory);
        assert_eq!(nested.children[0].path, "lib/best-practices/basic-guidelines.md");
        assert_eq!(nested.children[0].kind, NodeKind::File);
    }

    #[test]
    fn test_drops_non_markdown_files() {
        let items = vec![file("lib/a.md"), file("lib/x.txt"), file("logo.png")];
        let tree = build_tree(&items);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].path, "lib/a.md");
    }

    #[test]
    fn test_synthesizes_missing_parent_directories() {
        // No explicit entry for "docs" or "docs/guides"
        let items = vec![file("docs/guides/basics.md")];
        let tree = build_tree(&items);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].path, "docs");
        assert_eq!(tree[0].kind, NodeKind::Directory);
        assert_eq!(tree[0].children[0].path, "docs/guides");
        assert_eq!(tree[0].children[0].kind, NodeKind::Directory);
        assert_eq!(tree[0].children[0].children[0].path, "docs/guides/basics.md");
    }

    #[test]
    fn test_first_writer_wins_on_duplicates() {
        // "lib" is synthesized by the first item, then listed explicitly
        let items = vec![file("lib/a.md"), dir("lib"), file("lib/b.md")];
        let tree = build_tree(&items);

        assert_eq!(tree.len(), 1);
        let children: Vec<&str> = tree[0].children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(children, vec!["lib/a.md", "lib/b.md"]);
    }

    #[test]
    fn test_root_level_file() {
        let items = vec![file("README.md")];
        let tree = build_tree(&items);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].path, "README.md");
        assert_eq!(tree[0].kind, NodeKind::File);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_empty_listing_builds_empty_tree() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn test_directories_kept_even_without_markdown() {
        // Builder keeps empty directories; pruning them is the filter's job
        let items = vec![dir("assets"), file("assets/logo.png")];
        let tree = build_tree(&items);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].path, "assets");
        assert!(tree[0].children.is_empty());
    }
}
