// src/github/url.rs
// =============================================================================
// This module parses repository URLs into {owner, repo}.
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - https://github.com/owner/repo/tree/main/docs (extra segments ignored)
//
// Parsing happens before any network call: a malformed URL must fail
// fast with InvalidUrl and never hit the wire.
//
// Rust concepts:
// - The url crate: Real URL parsing instead of string surgery
// - map_err: Translate a library error into our own taxonomy
// =============================================================================

use url::Url;

use crate::error::CompileError;

// A repository coordinate: who owns it and what it's called
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// Parses a repository URL string into a RepoRef.
//
// The first two non-empty path segments after the host are owner and
// repo; a trailing ".git" on the repo segment is stripped. Anything
// that doesn't parse as a URL, or has fewer than two segments, is an
// InvalidUrl error.
pub fn parse_github_url(input: &str) -> Result<RepoRef, CompileError> {
    let parsed = Url::parse(input).map_err(|_| CompileError::InvalidUrl)?;

    // Empty segments appear around doubled or trailing slashes; drop them
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 2 {
        return Err(CompileError::InvalidUrl);
    }

    let owner = segments[0].to_string();
    let repo = segments[1]
        .strip_suffix(".git")
        .unwrap_or(segments[1])
        .to_string();

    if owner.is_empty() || repo.is_empty() {
        return Err(CompileError::InvalidUrl);
    }

    Ok(RepoRef { owner, repo })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why the url crate instead of splitting strings?
//    - Url::parse handles schemes, userinfo, ports, fragments, and all
//      the weird corners we'd get wrong by hand
//    - "not a url" is rejected by the parser itself, which is exactly
//      the failure mode we need
//
// 2. What is path_segments()?
//    - An iterator over the path split on '/', minus the leading slash
//    - It returns Option because some URLs (mailto:) have no path to split
//
// 3. What does strip_suffix do?
//    - Removes ".git" only if the string actually ends with it,
//      returning None otherwise - hence the unwrap_or fallback
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_repo_url() {
        let repo = parse_github_url("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.repo, "rust");
    }

    #[test]
    fn test_strips_git_suffix() {
        let repo = parse_github_url("https://github.com/user/project.git").unwrap();
        assert_eq!(repo.repo, "project");
    }

    #[test]
    fn test_git_in_the_middle_is_kept() {
        // Only a trailing .git is special
        let repo = parse_github_url("https://github.com/user/my.github.tools").unwrap();
        assert_eq!(repo.repo, "my.github.tools");
    }

    #[test]
    fn test_extra_segments_are_ignored() {
        let repo = parse_github_url("https://github.com/user/project/tree/main/docs").unwrap();
        assert_eq!(repo.owner, "user");
        assert_eq!(repo.repo, "project");
    }

    #[test]
    fn test_trailing_slash() {
        let repo = parse_github_url("https://github.com/user/project/").unwrap();
        assert_eq!(repo.repo, "project");
    }

    #[test]
    fn test_not_a_url_fails() {
        assert!(matches!(
            parse_github_url("not a url"),
            Err(CompileError::InvalidUrl)
        ));
    }

    #[test]
    fn test_too_few_segments_fails() {
        assert!(matches!(
            parse_github_url("https://github.com/onlyowner"),
            Err(CompileError::InvalidUrl)
        ));
        assert!(matches!(
            parse_github_url("https://github.com/"),
            Err(CompileError::InvalidUrl)
        ));
    }

    #[test]
    fn test_display_joins_owner_and_repo() {
        let repo = parse_github_url("https://github.com/a/b").unwrap();
        assert_eq!(repo.to_string(), "a/b");
    }
}
