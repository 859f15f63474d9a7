// src/workspace/fetch.rs
// =============================================================================
// This module reads the workspace library: the file-list.json manifest
// plus the raw contents of individual files.
//
// The base location is either:
// - an HTTP(S) URL (the library as deployed behind a static host), or
// - a local directory (the library as it sits next to you on disk)
//
// Same contract either way: given a path, return the raw text content
// verbatim, or a Network-family error. The distinction is decided once,
// from the --base argument, and hidden behind WorkspaceClient.
//
// Rust concepts:
// - Enum dispatch: WorkspaceBase picks the transport per call
// - tokio::fs: Async file reads, same .await shape as HTTP
// =============================================================================

use std::path::PathBuf;

use log::debug;
use reqwest::Client;

use crate::error::CompileError;
use crate::tree::ManifestEntry;

use super::manifest::MANIFEST_FILE;

// Where the workspace library lives
#[derive(Debug, Clone)]
pub enum WorkspaceBase {
    /// Static deployment: files fetched from <url>/<path>
    Http(String),
    /// Local root: files read from <dir>/<path>
    Dir(PathBuf),
}

impl WorkspaceBase {
    /// Decides the transport from the user-supplied base string:
    /// anything that looks like a URL is HTTP, the rest is a directory.
    pub fn from_arg(base: &str) -> Self {
        if base.starts_with("http://") || base.starts_with("https://") {
            // Trailing slash would double up when joining paths
            WorkspaceBase::Http(base.trim_end_matches('/').to_string())
        } else {
            WorkspaceBase::Dir(PathBuf::from(base))
        }
    }
}

// The process-wide workspace client.
//
// Shares the injected reqwest::Client with the rest of the process; the
// directory flavor never touches it.
#[derive(Debug, Clone)]
pub struct WorkspaceClient {
    http: Client,
    base: WorkspaceBase,
}

impl WorkspaceClient {
    pub fn new(http: Client, base: WorkspaceBase) -> Self {
        WorkspaceClient { http, base }
    }

    /// Reads and parses the file-list.json manifest at the base
    pub async fn manifest(&self) -> Result<Vec<ManifestEntry>, CompileError> {
        let body = self.fetch_text(MANIFEST_FILE).await?;
        let entries: Vec<ManifestEntry> = serde_json::from_str(&body)?;
        debug!("manifest lists {} entries", entries.len());
        Ok(entries)
    }

    /// Returns one file's raw text content
    pub async fn file_content(&self, path: &str) -> Result<String, CompileError> {
        self.fetch_text(path).await
    }

    async fn fetch_text(&self, path: &str) -> Result<String, CompileError> {
        match &self.base {
            WorkspaceBase::Http(base_url) => {
                let url = format!("{base_url}/{path}");
                let response = self.http.get(&url).send().await?;
                if !response.status().is_success() {
                    return Err(CompileError::HttpStatus {
                        path: path.to_string(),
                        status: response.status().as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
            WorkspaceBase::Dir(dir) => {
                let full = dir.join(path);
                tokio::fs::read_to_string(&full)
                    .await
                    .map_err(|source| CompileError::LocalRead {
                        path: path.to_string(),
                        source,
                    })
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one enum instead of two client types?
//    - The callers don't care where the library lives; they want
//      "path in, text out". One type, one contract, two transports
//
// 2. Why does the Dir flavor still hold the reqwest Client?
//    - The client is injected once at startup for the whole process;
//      carrying it unused in Dir mode is simpler than a second
//      constructor signature per transport
//
// 3. What is tokio::fs::read_to_string?
//    - The async twin of std::fs::read_to_string; it also enforces that
//      the bytes are valid UTF-8, which is exactly our contract
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;
    use std::io::Write;

    #[test]
    fn test_base_from_arg_picks_transport() {
        assert!(matches!(
            WorkspaceBase::from_arg("https://example.github.io/custom-instructions-lib"),
            WorkspaceBase::Http(_)
        ));
        assert!(matches!(
            WorkspaceBase::from_arg("./custom-instructions-lib"),
            WorkspaceBase::Dir(_)
        ));
    }

    #[test]
    fn test_http_base_drops_trailing_slash() {
        match WorkspaceBase::from_arg("https://example.com/lib/") {
            WorkspaceBase::Http(url) => assert_eq!(url, "https://example.com/lib"),
            other => panic!("expected Http base, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reads_manifest_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = std::fs::File::create(dir.path().join(MANIFEST_FILE)).unwrap();
        write!(
            manifest,
            r#"[{{"path":"lib","type":"tree"}},{{"path":"lib/basic.md","type":"file"}}]"#
        )
        .unwrap();

        let client = WorkspaceClient::new(
            Client::new(),
            WorkspaceBase::Dir(dir.path().to_path_buf()),
        );
        let entries = client.manifest().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, NodeKind::Directory);
        assert_eq!(entries[1].path, "lib/basic.md");
    }

    #[tokio::test]
    async fn test_reads_file_content_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("lib")).unwrap();
        std::fs::write(dir.path().join("lib/basic.md"), "# Basics\n").unwrap();

        let client = WorkspaceClient::new(
            Client::new(),
            WorkspaceBase::Dir(dir.path().to_path_buf()),
        );
        let content = client.file_content("lib/basic.md").await.unwrap();
        assert_eq!(content, "# Basics\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_a_local_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = WorkspaceClient::new(
            Client::new(),
            WorkspaceBase::Dir(dir.path().to_path_buf()),
        );
        let err = client.file_content("lib/missing.md").await.unwrap_err();
        assert!(matches!(err, CompileError::LocalRead { .. }));
    }

    #[tokio::test]
    async fn test_bad_manifest_json_is_a_manifest_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "not json at all").unwrap();

        let client = WorkspaceClient::new(
            Client::new(),
            WorkspaceBase::Dir(dir.path().to_path_buf()),
        );
        let err = client.manifest().await.unwrap_err();
        assert!(matches!(err, CompileError::Manifest(_)));
    }
}
