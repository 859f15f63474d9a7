// src/github/client.rs
// =============================================================================
// This module is the one and only GitHub API client.
//
// It is constructed once in main() and passed to every call site, so the
// whole process shares a single configured reqwest::Client (connection
// pool, timeout, User-Agent). Three endpoints are consumed, all
// anonymous:
//
//   GET /repos/{owner}/{repo}                      -> default branch
//   GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1 -> flat listing
//   GET /repos/{owner}/{repo}/contents/{path}      -> raw file content
//
// The contents endpoint is asked for raw text via the Accept header, but
// the API is allowed to answer with a JSON envelope carrying base64
// instead - we decode that case ourselves.
//
// Rust concepts:
// - Dependency injection: One client value, threaded by reference
// - serde derive: Typed views of the API's JSON payloads
// =============================================================================

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;

use crate::error::CompileError;
use crate::tree::ManifestEntry;

use super::url::RepoRef;

const API_BASE: &str = "https://api.github.com";
// GitHub rejects requests without a User-Agent
const USER_AGENT: &str = concat!("instruction-compiler/", env!("CARGO_PKG_VERSION"));
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

// Typed views of the API responses. We only name the fields we read.

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    // Entries whose kind isn't file/blob/tree (submodules show up as
    // "commit") must not kill the whole listing, so each element
    // deserializes independently and failures are dropped.
    tree: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ContentEnvelope {
    content: String,
    encoding: String,
}

// The process-wide GitHub client
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_base: String,
}

impl GithubClient {
    pub fn new() -> Result<Self, CompileError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(GithubClient {
            http,
            api_base: API_BASE.to_string(),
        })
    }

    /// Reads the repository's default branch name
    pub async fn default_branch(&self, repo: &RepoRef) -> Result<String, CompileError> {
        let url = format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.repo);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CompileError::HttpStatus {
                path: repo.to_string(),
                status: response.status().as_u16(),
            });
        }

        let info: RepoInfo = response.json().await?;
        debug!("default branch of {} is {}", repo, info.default_branch);
        Ok(info.default_branch)
    }

    /// Fetches the repository's flat file listing at the given ref.
    ///
    /// Entries with an unknown kind are skipped; an entirely empty tree
    /// is the EmptyRepo domain error.
    pub async fn tree(&self, repo: &RepoRef, tree_sha: &str) -> Result<Vec<ManifestEntry>, CompileError> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, repo.owner, repo.repo, tree_sha
        );
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CompileError::HttpStatus {
                path: repo.to_string(),
                status: response.status().as_u16(),
            });
        }

        let listing: TreeResponse = response.json().await?;
        if listing.tree.is_empty() {
            return Err(CompileError::EmptyRepo);
        }

        let entries: Vec<ManifestEntry> = listing
            .tree
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();
        debug!("{} usable entries in tree of {}", entries.len(), repo);
        Ok(entries)
    }

    /// Fetches one file's raw text content.
    ///
    /// We ask for the raw media type; if the API answers with the JSON
    /// envelope anyway, the base64 payload is decoded here.
    pub async fn file_content(&self, repo: &RepoRef, path: &str) -> Result<String, CompileError> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, repo.owner, repo.repo, path
        );
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CompileError::HttpStatus {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let body = response.text().await?;
            decode_content_envelope(&body, path)
        } else {
            // Raw text; reqwest handles the UTF-8 side
            Ok(response.text().await?)
        }
    }
}

// Decodes a JSON content envelope ({content, encoding}) to text.
//
// GitHub base64 payloads contain newlines every 60 characters; the
// decoder is fed a whitespace-stripped copy. Anything that isn't valid
// base64 or valid UTF-8 is a Decode error naming the file.
fn decode_content_envelope(body: &str, path: &str) -> Result<String, CompileError> {
    let envelope: ContentEnvelope =
        serde_json::from_str(body).map_err(|_| CompileError::Decode {
            path: path.to_string(),
        })?;

    if envelope.encoding != "base64" {
        return Err(CompileError::Decode {
            path: path.to_string(),
        });
    }

    let compact: String = envelope
        .content
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let bytes = BASE64.decode(compact).map_err(|_| CompileError::Decode {
        path: path.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|_| CompileError::Decode {
        path: path.to_string(),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is the client built once and passed around?
//    - reqwest::Client owns a connection pool; creating one per request
//      throws the pool away every time
//    - One configured value also means one place for timeout/User-Agent
//
// 2. Why deserialize tree entries individually?
//    - One submodule entry ("type": "commit") would otherwise make the
//      whole Vec<ManifestEntry> fail to deserialize
//    - filter_map(.. .ok()) keeps the good entries and drops the rest
//
// 3. Why check Content-Type instead of always expecting raw text?
//    - The raw Accept header is a request, not a guarantee; proxies and
//      older API paths answer with the JSON envelope
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    #[test]
    fn test_tree_response_skips_unknown_kinds() {
        let body = r#"{
            "sha": "abc",
            "tree": [
                {"path": "lib", "type": "tree", "mode": "040000", "sha": "d1"},
                {"path": "lib/basic.md", "type": "blob", "mode": "100644", "sha": "f1"},
                {"path": "vendored", "type": "commit", "mode": "160000", "sha": "s1"}
            ]
        }"#;
        let listing: TreeResponse = serde_json::from_str(body).unwrap();
        let entries: Vec<ManifestEntry> = listing
            .tree
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "lib");
        assert_eq!(entries[0].kind, NodeKind::Directory);
        assert_eq!(entries[1].path, "lib/basic.md");
        assert_eq!(entries[1].kind, NodeKind::File);
    }

    #[test]
    fn test_repo_info_reads_default_branch() {
        let body = r#"{"name": "project", "default_branch": "main", "private": false}"#;
        let info: RepoInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.default_branch, "main");
    }

    #[test]
    fn test_decode_envelope_with_newlines() {
        // "# Basics\n" encoded, split the way the API splits it
        let body = r#"{"content": "IyBCYXNp\nY3MK\n", "encoding": "base64"}"#;
        let text = decode_content_envelope(body, "lib/basic.md").unwrap();
        assert_eq!(text, "# Basics\n");
    }

    #[test]
    fn test_decode_envelope_handles_utf8() {
        // "héllo" - multibyte characters must survive the round trip
        let body = r#"{"content": "aMOpbGxv", "encoding": "base64"}"#;
        let text = decode_content_envelope(body, "a.md").unwrap();
        assert_eq!(text, "héllo");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        // 0xFF 0xFE is not valid UTF-8
        let body = r#"{"content": "//4=", "encoding": "base64"}"#;
        let err = decode_content_envelope(body, "bad.md").unwrap_err();
        assert!(matches!(err, CompileError::Decode { .. }));
    }

    #[test]
    fn test_decode_rejects_unknown_encoding() {
        let body = r#"{"content": "abcd", "encoding": "rot13"}"#;
        let err = decode_content_envelope(body, "bad.md").unwrap_err();
        assert!(matches!(err, CompileError::Decode { .. }));
    }
}
