// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Load the instruction tree, adjust the selection, compile the document
// 4. Exit with proper code (0 = compiled, 1 = nothing selected, 2 = error)
//
// Rust concepts used:
// - async/await: Because we fetch many files concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod assemble;   // src/assemble.rs - fan-out fetch + document assembly
mod cli;        // src/cli.rs - command-line parsing
mod error;      // src/error.rs - the CompileError taxonomy
mod github;     // src/github/ - URL parsing + the GitHub API client
mod session;    // src/session.rs - load state machine and selection state
mod tree;       // src/tree/ - build/filter/select, shared by both flows
mod workspace;  // src/workspace/ - manifest fetching and generation

use std::collections::HashSet;
use std::future::Future;
use std::path::Path;

use clap::Parser; // Parser trait enables the parse() method
use hashlink::LinkedHashSet;

use assemble::{assemble_document, fetch_all, write_document};
use cli::{Cli, Commands};
use error::CompileError;
use github::{GithubClient, RepoRef};
use session::{LoadOutcome, LoadPhase, Session};
use tree::{all_file_paths, filter_empty_folders, NodeKind, TreeNode};
use workspace::{generate_manifest, WorkspaceBase, WorkspaceClient};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// Library base used when neither --base nor INSTRUCTION_LIB_BASE is given
const DEFAULT_LIB_BASE: &str = "./custom-instructions-lib";

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Debug traces go through log/env_logger, behind RUST_LOG
    env_logger::init();

    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = document compiled (or tree listed)
//   Ok(1) = nothing selected, nothing compiled
//   Ok(2) = load or compile failed
//   Err = unexpected error
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    match cli.command {
        Commands::Workspace {
            base,
            output,
            select,
            all,
            list_only,
        } => handle_workspace(base, &output, &select, all, list_only).await,
        Commands::Remote {
            repo_url,
            output,
            select,
            all,
            list_only,
        } => handle_remote(&repo_url, &output, &select, all, list_only).await,
        Commands::Generate { dir } => handle_generate(&dir),
    }
}

// Handles the 'workspace' subcommand: the local instruction library
async fn handle_workspace(
    base: Option<String>,
    output: &Path,
    select: &[String],
    all: bool,
    list_only: bool,
) -> Result<i32> {
    // Base resolution order: flag, environment, local default
    // (the deployed library and the local checkout live at different bases)
    let base = base
        .or_else(|| std::env::var("INSTRUCTION_LIB_BASE").ok())
        .unwrap_or_else(|| DEFAULT_LIB_BASE.to_string());

    println!("🔍 Loading workspace library: {}", base);

    // One HTTP client for the whole process, injected into the fetcher
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(CompileError::Network)?;
    let client = WorkspaceClient::new(http, WorkspaceBase::from_arg(&base));

    let mut session = Session::new();
    let token = session.begin_load();
    let result = load_workspace(&client).await;
    session.finish_load(token, result.map_err(|e| e.to_string()));

    compile_session(session, output, select, all, list_only, |path| {
        let client = client.clone(); // Clone the client for each task
        async move { client.file_content(&path).await }
    })
    .await
}

// Handles the 'remote' subcommand: a GitHub repository
async fn handle_remote(
    repo_url: &str,
    output: &Path,
    select: &[String],
    all: bool,
    list_only: bool,
) -> Result<i32> {
    // Parse first: a malformed URL must fail before any network call
    let repo = match github::parse_github_url(repo_url) {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(2);
        }
    };

    println!("🔍 Loading repository: {}", repo);

    let client = GithubClient::new()?;

    let mut session = Session::new();
    let token = session.begin_load();
    let result = load_remote(&client, &repo).await;
    session.finish_load(token, result.map_err(|e| e.to_string()));

    compile_session(session, output, select, all, list_only, |path| {
        let client = client.clone();
        let repo = repo.clone();
        async move { client.file_content(&repo, &path).await }
    })
    .await
}

// Handles the 'generate' subcommand: write the library manifest
fn handle_generate(dir: &Path) -> Result<i32> {
    if !dir.is_dir() {
        eprintln!("❌ '{}' is not a directory", dir.display());
        return Ok(2);
    }

    match generate_manifest(dir) {
        Ok(count) => {
            println!(
                "✅ Wrote {} with {} entr{}",
                dir.join(workspace::MANIFEST_FILE).display(),
                count,
                if count == 1 { "y" } else { "ies" }
            );
            Ok(0)
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            Ok(2)
        }
    }
}

// Loads the workspace tree: manifest -> build -> filter
async fn load_workspace(client: &WorkspaceClient) -> Result<LoadOutcome, CompileError> {
    let entries = client.manifest().await?;
    if entries.is_empty() {
        return Err(CompileError::EmptyRepo);
    }

    let filtered = filter_empty_folders(tree::build_tree(&entries));
    if filtered.is_empty() {
        return Err(CompileError::NoMarkdownFiles);
    }
    Ok(LoadOutcome { tree: filtered })
}

// Loads the repository tree: default branch -> recursive tree -> build -> filter
async fn load_remote(client: &GithubClient, repo: &RepoRef) -> Result<LoadOutcome, CompileError> {
    let branch = client.default_branch(repo).await?;
    let entries = client.tree(repo, &branch).await?;

    let filtered = filter_empty_folders(tree::build_tree(&entries));
    if filtered.is_empty() {
        return Err(CompileError::NoMarkdownFiles);
    }
    Ok(LoadOutcome { tree: filtered })
}

// The shared back half of both compile flows: show the tree, apply the
// selection flags, fetch everything, assemble, write.
//
// `fetch` maps a selected path to its raw content - the only thing the
// two flows do differently by this point.
async fn compile_session<F, Fut>(
    mut session: Session,
    output: &Path,
    select: &[String],
    all: bool,
    list_only: bool,
    fetch: F,
) -> Result<i32>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, CompileError>>,
{
    // A failed load was already converted to its user-visible message
    if let LoadPhase::Failed(message) = session.phase() {
        eprintln!("❌ {}", message);
        return Ok(2);
    }

    // Selection flags: --all first, then explicit --select picks
    let available: Vec<String> = all_file_paths(session.tree());
    if all {
        for path in &available {
            session.select(path);
        }
    }
    for path in select {
        // Selection membership implies a file node in the current tree
        if available.iter().any(|p| p == path) {
            session.select(path);
        } else {
            eprintln!("⚠️  '{}' is not a file in the tree; skipping", path);
        }
    }

    println!(
        "📄 {} markdown file(s), {} selected\n",
        available.len(),
        session.selected().len()
    );
    print_tree(session.tree(), session.selected(), session.expanded(), 0);
    println!();

    if list_only {
        return Ok(0);
    }

    let selected: Vec<String> = session.selected().iter().cloned().collect();
    if selected.is_empty() {
        println!("⚠️  Nothing selected - nothing to compile");
        return Ok(1);
    }

    println!("🌐 Fetching {} file(s)...", selected.len());

    // All-or-nothing: the first failure aborts the whole compile
    let files = match fetch_all(&selected, fetch).await {
        Ok(files) => files,
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(2);
        }
    };

    let document = assemble_document(&files);
    if let Err(e) = write_document(output, &document).await {
        eprintln!("❌ {}", e);
        return Ok(2);
    }

    println!(
        "✅ Compiled {} file(s) into {} ({} bytes)",
        files.len(),
        output.display(),
        document.len()
    );
    Ok(0)
}

// Prints the filtered tree with selection markers, respecting the
// expansion state (collapsed directories keep their contents hidden)
fn print_tree(
    nodes: &[TreeNode],
    selected: &LinkedHashSet<String>,
    expanded: &HashSet<String>,
    depth: usize,
) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        let name = node.path.rsplit('/').next().unwrap_or(node.path.as_str());

        match node.kind {
            NodeKind::Directory => {
                println!("{}📁 {}/", indent, name);
                if expanded.contains(&node.path) {
                    print_tree(&node.children, selected, expanded, depth + 1);
                }
            }
            NodeKind::File => {
                let marker = if selected.contains(&node.path) {
                    "[x]"
                } else {
                    "[ ]"
                };
                println!("{}{} 📄 {}", indent, marker, name);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why do handlers return Ok(2) instead of Err for expected failures?
//    - A bad URL or an empty repository is a normal outcome with a
//      friendly message, not a programming error; Err is reserved for
//      the unexpected (and still maps to exit code 2 in main)
//
// 2. Why is compile_session generic over the fetch closure?
//    - Everything after loading is identical for both flows; only
//      "path -> content" differs. One generic function, two closures
//
// 3. Why collect the selection into a Vec before fetching?
//    - fetch_all wants a slice it can iterate while futures borrow from
//      it; snapshotting the LinkedHashSet keeps the insertion order
// -----------------------------------------------------------------------------
