// src/error.rs
// =============================================================================
// This module defines the error taxonomy shared by every operation.
//
// We keep the taxonomy small and user-facing:
// - InvalidUrl: the repository URL couldn't be parsed into owner/repo
// - Network: anything that went wrong talking to the manifest or GitHub
// - Decode: we got bytes back but couldn't turn them into UTF-8 text
// - EmptyRepo / NoMarkdownFiles: domain conditions reported like any other
//   load failure ("the repository has nothing we can work with")
//
// Every error is caught at an operation boundary (load or compile) and
// shown to the user as one message. Nothing here is fatal to the process:
// the tool returns to an idle state and the user may retry.
//
// Rust concepts:
// - thiserror: Derive macro that generates Display and Error impls
// - #[from]: Automatic conversion so the ? operator "just works"
// =============================================================================

use thiserror::Error;

// One error type for the whole compile pipeline
//
// #[derive(Error)] generates std::error::Error for us
// The #[error("...")] attribute is the user-visible message
#[derive(Debug, Error)]
pub enum CompileError {
    /// The repository URL is malformed or missing owner/repo segments
    #[error("Please enter a valid GitHub repository URL")]
    InvalidUrl,

    /// An HTTP request failed outright (DNS, timeout, TLS, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered, but not with what we asked for
    #[error("Request for '{path}' failed with HTTP {status}")]
    HttpStatus { path: String, status: u16 },

    /// A payload could not be decoded to UTF-8 text
    #[error("Could not decode content of '{path}' as text")]
    Decode { path: String },

    /// The repository tree came back empty
    #[error("No files found in repository")]
    EmptyRepo,

    /// The tree had files, but none of them are Markdown
    #[error("No markdown files found in repository")]
    NoMarkdownFiles,

    /// The manifest existed but wasn't valid JSON
    #[error("Could not parse file manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// A local workspace file could not be read
    #[error("Could not read '{path}': {source}")]
    LocalRead {
        path: String,
        source: std::io::Error,
    },

    /// The output document (or manifest) could not be written
    #[error("Could not write '{path}': {source}")]
    LocalWrite {
        path: String,
        source: std::io::Error,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why thiserror instead of anyhow everywhere?
//    - anyhow::Error erases the error type - great at the binary boundary
//    - thiserror keeps the type - callers can match on what went wrong
//    - We match on variants in tests and when choosing exit codes
//
// 2. What does #[from] do?
//    - Generates impl From<reqwest::Error> for CompileError
//    - So `response.text().await?` converts automatically inside
//      functions that return Result<_, CompileError>
//
// 3. Why carry the path in Decode/HttpStatus/LocalRead?
//    - The user selected many files; the message must say which one failed
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            CompileError::InvalidUrl.to_string(),
            "Please enter a valid GitHub repository URL"
        );
        assert_eq!(
            CompileError::NoMarkdownFiles.to_string(),
            "No markdown files found in repository"
        );
        assert_eq!(
            CompileError::EmptyRepo.to_string(),
            "No files found in repository"
        );
    }

    #[test]
    fn test_http_status_names_the_path() {
        let err = CompileError::HttpStatus {
            path: "lib/basic.md".to_string(),
            status: 404,
        };
        let msg = err.to_string();
        assert!(msg.contains("lib/basic.md"));
        assert!(msg.contains("404"));
    }
}
