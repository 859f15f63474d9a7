// src/assemble.rs
// =============================================================================
// This module turns the selection into the final instruction document.
//
// Two steps:
// 1. Fetch every selected file concurrently and join on an all-or-nothing
//    barrier: one failure aborts the whole compile with the first error
// 2. Concatenate the contents, in selection order, into one buffer and
//    write it to the output file
//
// The concatenation convention is fixed and documented here, in one
// place: each file renders as "# File: {path}\n\n{content}" and files
// are joined with "\n\n---\n\n". There is no alternate mode.
//
// Rust concepts:
// - futures::future::try_join_all: Concurrent fan-out, fail-fast join,
//   results in input order
// - Generic async functions: The fetcher is a closure, so the same
//   assembly drives both the workspace and GitHub flows
// =============================================================================

use std::future::Future;
use std::path::Path;

use futures::future::try_join_all;
use log::debug;

use crate::error::CompileError;

/// Record separator between files in the compiled document
pub const SEPARATOR: &str = "\n\n---\n\n";

// Fetches every selected path concurrently.
//
// `fetch` maps a path to a future resolving to its raw content; all
// futures run at once and the first error wins. On success the
// (path, content) pairs come back in selection order.
pub async fn fetch_all<F, Fut>(
    paths: &[String],
    fetch: F,
) -> Result<Vec<(String, String)>, CompileError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, CompileError>>,
{
    let futures = paths.iter().map(|path| {
        let path = path.clone();
        let fut = fetch(path.clone());
        async move {
            let content = fut.await?;
            debug!("fetched {} ({} bytes)", path, content.len());
            Ok::<(String, String), CompileError>((path, content))
        }
    });

    try_join_all(futures).await
}

// Concatenates fetched files into the single output buffer.
//
// Selection order in, document order out.
pub fn assemble_document(files: &[(String, String)]) -> String {
    files
        .iter()
        .map(|(path, content)| format!("# File: {path}\n\n{content}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

// Writes the compiled document to the output path
pub async fn write_document(output: &Path, content: &str) -> Result<(), CompileError> {
    tokio::fs::write(output, content)
        .await
        .map_err(|source| CompileError::LocalWrite {
            path: output.display().to_string(),
            source,
        })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is try_join_all?
//    - Takes many futures, runs them concurrently, waits for all
//    - If any future returns Err, the whole thing returns that Err
//      (all-or-nothing semantics - exactly the compile contract)
//    - Unlike buffer_unordered, results keep the input order
//
// 2. Why is fetch a closure parameter instead of a trait object?
//    - The two flows fetch differently (HTTP base vs GitHub API) but
//      assembly is identical; a generic closure keeps one copy of the
//      fan-out without boxing
//
// 3. Why clone the path into the future?
//    - The future may outlive the loop iteration; owning the String
//      avoids borrowing from the input slice across .await points
// -----------------------------------------------------------------------------
