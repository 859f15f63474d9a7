// src/github/mod.rs
// =============================================================================
// This module handles everything GitHub:
//
// Submodules:
// - url: Parsing repository URLs into {owner, repo}
// - client: The single injected API client (default branch, recursive
//   tree listing, raw file contents)
//
// This file (mod.rs) is the module root - it re-exports the public API
// so callers write github::parse_github_url() and github::GithubClient.
// =============================================================================

mod client;
mod url;

pub use client::GithubClient;
pub use url::{parse_github_url, RepoRef};
