// src/workspace/manifest.rs
// =============================================================================
// This module generates the file-list.json manifest: the flat listing of
// the instruction library that the workspace fetcher consumes.
//
// A static deployment can't scan a directory at runtime, so the listing
// is produced ahead of time by walking the library directory and
// recording every entry as {path, type}. The `generate` subcommand is
// that build-time step.
//
// Rust concepts:
// - The ignore crate: A directory walker that honors .gitignore files
//   and skips hidden entries
// - serde_json::to_string_pretty: Stable, diffable manifest output
// =============================================================================

use std::path::Path;

use ignore::WalkBuilder;
use log::debug;

use crate::error::CompileError;
use crate::tree::{ManifestEntry, NodeKind};

/// Manifest filename, at the root of the library base
pub const MANIFEST_FILE: &str = "file-list.json";

// Walks the library directory and writes <dir>/file-list.json.
//
// Every file and directory below the root is recorded with its
// '/'-delimited relative path. The manifest itself and hidden entries
// are left out. Returns the number of recorded entries.
pub fn generate_manifest(dir: &Path) -> Result<usize, CompileError> {
    let entries = walk_library(dir)?;

    let json = serde_json::to_string_pretty(&entries)?;
    std::fs::write(dir.join(MANIFEST_FILE), json).map_err(|source| CompileError::LocalWrite {
        path: MANIFEST_FILE.to_string(),
        source,
    })?;

    debug!("wrote {} with {} entries", MANIFEST_FILE, entries.len());
    Ok(entries.len())
}

// Collects the library's entries relative to the root, walk order
fn walk_library(dir: &Path) -> Result<Vec<ManifestEntry>, CompileError> {
    let mut entries = Vec::new();

    // sort_by_file_name makes the manifest stable across platforms
    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for result in walker {
        let entry = result.map_err(|err| CompileError::LocalRead {
            path: dir.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, err),
        })?;
        let path = entry.path();

        // The walk yields the root itself first; skip it
        if path == dir {
            continue;
        }

        let relative = match path.strip_prefix(dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };

        // '/'-delimited regardless of platform
        let rel_string = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        // A previously generated manifest must not list itself
        if rel_string == MANIFEST_FILE {
            continue;
        }

        let kind = if path.is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };

        entries.push(ManifestEntry {
            path: rel_string,
            kind,
        });
    }

    Ok(entries)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why the ignore crate instead of std::fs::read_dir?
//    - It recurses for us, skips hidden files, honors .gitignore, and
//      can sort entries - all things we'd otherwise hand-roll
//
// 2. Why build the relative path from components()?
//    - On Windows the separator is '\'; the manifest contract says '/'
//
// 3. Why is this synchronous?
//    - It's a one-shot build-time walk over a small directory; there is
//      nothing to overlap it with
// -----------------------------------------------------------------------------
