// src/workspace/mod.rs
// =============================================================================
// This module handles the local "workspace" instruction library: a
// directory of Markdown files described by a file-list.json manifest.
//
// Submodules:
// - fetch: The workspace client (read the manifest, read file contents)
// - manifest: The generator that walks a directory and writes the
//   manifest the fetcher consumes
//
// The library can live in two places, mirroring the two deployments of
// the original site: behind an HTTP base URL (static hosting) or in a
// plain local directory. The client hides the difference.
// =============================================================================

mod fetch;
mod manifest;

pub use fetch::{WorkspaceBase, WorkspaceClient};
pub use manifest::{generate_manifest, MANIFEST_FILE};
