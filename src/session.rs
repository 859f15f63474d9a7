// src/session.rs
// =============================================================================
// This module holds the per-source browsing state and the load state
// machine that guards it:
//
//     Idle -> Loading -> { Loaded, Failed }
//
// Loaded populates tree/selection/expansion; Failed records the message
// and clears tree and selection. Both terminal states go back to Loading
// on the next load request.
//
// Loads can overlap: the user may kick off a new load while an earlier
// one is still fetching. Instead of letting the last response to arrive
// silently overwrite state (a race), begin_load() hands out a generation
// token and finish_load() discards any result whose token is stale.
// At most one in-flight load is authoritative: the newest.
//
// Rust concepts:
// - Enums with data: LoadPhase carries the failure message in Failed
// - Newtype-ish tokens: LoadToken is just a number, but a typed one
// =============================================================================

use std::collections::HashSet;

use hashlink::LinkedHashSet;
use log::debug;

use crate::tree::{all_folder_paths, auto_select_basic_files, TreeNode};

// Where the session currently is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing loaded yet
    Idle,
    /// A load is in flight
    Loading,
    /// The last load succeeded; tree/selection/expansion are populated
    Loaded,
    /// The last load failed; the message is user-visible
    Failed(String),
}

// Proof of which load a result belongs to.
//
// Copy + an opaque counter: callers thread it through their async work
// and hand it back to finish_load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

// What a successful load produces: the filtered tree, ready for display
#[derive(Debug)]
pub struct LoadOutcome {
    pub tree: Vec<TreeNode>,
}

// The browsing state for one source (workspace or repository)
#[derive(Debug)]
pub struct Session {
    phase: LoadPhase,
    generation: u64,
    tree: Vec<TreeNode>,
    /// Selected file paths, in selection order
    selected: LinkedHashSet<String>,
    /// Directory paths currently shown expanded; independent of selection
    expanded: HashSet<String>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            phase: LoadPhase::Idle,
            generation: 0,
            tree: Vec::new(),
            selected: LinkedHashSet::new(),
            expanded: HashSet::new(),
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn tree(&self) -> &[TreeNode] {
        &self.tree
    }

    pub fn selected(&self) -> &LinkedHashSet<String> {
        &self.selected
    }

    pub fn expanded(&self) -> &HashSet<String> {
        &self.expanded
    }

    /// Starts a new load and returns its token.
    ///
    /// Any load still in flight is superseded: its token goes stale and
    /// its eventual result will be discarded.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        self.phase = LoadPhase::Loading;
        debug!("load generation {} started", self.generation);
        LoadToken(self.generation)
    }

    /// Lands a finished load.
    ///
    /// Returns false (and changes nothing) if the token is stale. On
    /// success the tree is installed, the selection is reset and
    /// re-seeded by auto-selection, and every folder is expanded. On
    /// failure the message is recorded and tree/selection are cleared.
    pub fn finish_load(
        &mut self,
        token: LoadToken,
        result: Result<LoadOutcome, String>,
    ) -> bool {
        if token.0 != self.generation {
            debug!(
                "discarding stale load result (generation {} vs current {})",
                token.0, self.generation
            );
            return false;
        }

        match result {
            Ok(outcome) => {
                self.tree = outcome.tree;
                self.selected = LinkedHashSet::new();
                auto_select_basic_files(&self.tree, &mut self.selected);
                self.expanded = all_folder_paths(&self.tree).into_iter().collect();
                self.phase = LoadPhase::Loaded;
            }
            Err(message) => {
                self.tree = Vec::new();
                self.selected = LinkedHashSet::new();
                self.expanded = HashSet::new();
                self.phase = LoadPhase::Failed(message);
            }
        }
        true
    }

    /// Adds a file to the selection (keeps its insertion position if
    /// already present)
    pub fn select(&mut self, path: &str) {
        if !self.selected.contains(path) {
            self.selected.insert(path.to_string());
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a token instead of cancelling the old request?
//    - Cancelling in-flight HTTP is fiddly and doesn't buy anything here:
//      letting the stale response arrive and ignoring it is equivalent
//      and much simpler
//
// 2. Why Result<LoadOutcome, String> instead of CompileError?
//    - By the time a failure reaches the session it is already a
//      user-visible message; the session only stores and shows it
//
// 3. Why does finish_load return bool?
//    - So the caller knows whether its result landed or was superseded
//      (mostly useful for logging and for the tests below)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{build_tree, filter_empty_folders, ManifestEntry, NodeKind};

    fn outcome(paths: &[&str]) -> LoadOutcome {
        let items: Vec<ManifestEntry> = paths
            .iter()
            .map(|p| ManifestEntry {
                path: p.to_string(),
                kind: NodeKind::File,
            })
            .collect();
        LoadOutcome {
            tree: filter_empty_folders(build_tree(&items)),
        }
    }

    #[test]
    fn test_successful_load_populates_state() {
        let mut session = Session::new();
        assert_eq!(*session.phase(), LoadPhase::Idle);

        let token = session.begin_load();
        assert_eq!(*session.phase(), LoadPhase::Loading);

        assert!(session.finish_load(token, Ok(outcome(&["lib/basic.md", "lib/other.md"]))));
        assert_eq!(*session.phase(), LoadPhase::Loaded);
        assert_eq!(session.tree().len(), 1);
        assert!(session.selected().contains("lib/basic.md"));
        assert!(!session.selected().contains("lib/other.md"));
        assert!(session.expanded().contains("lib"));
    }

    #[test]
    fn test_failed_load_clears_state() {
        let mut session = Session::new();
        let token = session.begin_load();
        session.finish_load(token, Ok(outcome(&["lib/basic.md"])));

        let token = session.begin_load();
        assert!(session.finish_load(token, Err("No files found in repository".to_string())));

        assert_eq!(
            *session.phase(),
            LoadPhase::Failed("No files found in repository".to_string())
        );
        assert!(session.tree().is_empty());
        assert!(session.selected().is_empty());
        assert!(session.expanded().is_empty());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut session = Session::new();
        let first = session.begin_load();
        // A second load starts before the first finishes
        let second = session.begin_load();

        // The slow first load arrives last-but-stale: nothing changes
        assert!(!session.finish_load(first, Ok(outcome(&["old/basic.md"]))));
        assert_eq!(*session.phase(), LoadPhase::Loading);
        assert!(session.tree().is_empty());

        // The authoritative load lands normally
        assert!(session.finish_load(second, Ok(outcome(&["new/basic.md"]))));
        assert!(session.selected().contains("new/basic.md"));
    }

    #[test]
    fn test_terminal_states_allow_reload() {
        let mut session = Session::new();
        let token = session.begin_load();
        session.finish_load(token, Err("boom".to_string()));

        let token = session.begin_load();
        assert_eq!(*session.phase(), LoadPhase::Loading);
        session.finish_load(token, Ok(outcome(&["lib/basic.md"])));
        assert_eq!(*session.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn test_select_is_idempotent_and_keeps_position() {
        let mut session = Session::new();
        let token = session.begin_load();
        session.finish_load(token, Ok(outcome(&["lib/basic.md", "lib/a.md"])));

        session.select("lib/a.md");
        session.select("lib/a.md");

        let order: Vec<&str> = session.selected().iter().map(|s| s.as_str()).collect();
        assert_eq!(order, vec!["lib/basic.md", "lib/a.md"]);
    }

    #[test]
    fn test_selection_preserves_insertion_order() {
        let mut session = Session::new();
        let token = session.begin_load();
        session.finish_load(
            token,
            Ok(outcome(&["lib/z-basic.md", "lib/a.md", "lib/m.md"])),
        );

        // Auto-selected first, then explicit picks in the order made
        session.select("lib/m.md");
        session.select("lib/a.md");

        let order: Vec<&str> = session.selected().iter().map(|s| s.as_str()).collect();
        assert_eq!(order, vec!["lib/z-basic.md", "lib/m.md", "lib/a.md"]);
    }
}
