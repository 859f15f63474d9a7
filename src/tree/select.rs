// src/tree/select.rs
// =============================================================================
// This module implements the auto-selection heuristic: when a tree is
// loaded, files whose name suggests they are foundational ("basic") are
// pre-selected so the user starts from a sensible default instead of an
// empty checklist.
//
// The pass is purely additive - it only ever inserts into the selection
// set, never removes - and deterministic: the same tree always produces
// the same selection.
//
// Rust concepts:
// - &mut parameter: The caller owns the set, we just insert into it
// - LinkedHashSet: A set that iterates in insertion order
// =============================================================================

use hashlink::LinkedHashSet;

use super::{NodeKind, TreeNode};

// Walks the (filtered) tree and selects every Markdown file whose
// lower-cased path contains "basic".
//
// Matching is on the whole path, so "lib/Basics/setup.md" and
// "lib/basic-setup.md" both qualify.
pub fn auto_select_basic_files(nodes: &[TreeNode], selected: &mut LinkedHashSet<String>) {
    for node in nodes {
        if node.kind == NodeKind::File
            && node.path.to_lowercase().contains("basic")
            && node.path.ends_with(".md")
        {
            selected.insert(node.path.clone());
        }

        if !node.children.is_empty() {
            auto_select_basic_files(&node.children, selected);
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why LinkedHashSet instead of HashSet?
//    - The selection set's iteration order is the order files were
//      selected, and the compiled document follows that order
//    - std's HashSet iterates in arbitrary order; LinkedHashSet (from the
//      hashlink crate) remembers insertion order
//
// 2. Why &mut LinkedHashSet instead of returning a new set?
//    - Explicit selections may already be in the set; this pass adds to
//      whatever is there (purely additive by contract)
// -----------------------------------------------------------------------------
