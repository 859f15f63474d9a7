// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Three subcommands:
// - workspace: compile from the local instruction library
// - remote: compile from a GitHub repository
// - generate: write the file-list.json manifest for a library directory
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "instruction-compiler",
    version,
    about = "Compile Markdown instruction libraries into a single instruction document",
    long_about = "instruction-compiler browses a tree of Markdown instruction files - a local \
                  workspace library or a remote GitHub repository - pre-selects the foundational \
                  ('basic') ones, and concatenates the selection into one downloadable document."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (workspace, remote, generate)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile instructions from the local workspace library
    ///
    /// Example: instruction-compiler workspace --base ./custom-instructions-lib
    Workspace {
        /// Library base: an HTTP(S) URL or a local directory
        ///
        /// Falls back to the INSTRUCTION_LIB_BASE environment variable,
        /// then to ./custom-instructions-lib
        #[arg(long)]
        base: Option<String>,

        /// Output file for the compiled document
        #[arg(long, short, default_value = "copilot-instructions.md")]
        output: PathBuf,

        /// Select an additional file by path (repeatable)
        ///
        /// Added on top of the automatic "basic" selection
        #[arg(long)]
        select: Vec<String>,

        /// Select every Markdown file in the tree
        #[arg(long)]
        all: bool,

        /// Print the file tree and selection without compiling
        #[arg(long)]
        list_only: bool,
    },

    /// Compile instructions from a GitHub repository
    ///
    /// Example: instruction-compiler remote https://github.com/user/repo
    Remote {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        ///
        /// This is a positional argument (required, no flag needed)
        repo_url: String,

        /// Output file for the compiled document
        #[arg(long, short, default_value = "github-instruction.md")]
        output: PathBuf,

        /// Select an additional file by path (repeatable)
        #[arg(long)]
        select: Vec<String>,

        /// Select every Markdown file in the tree
        #[arg(long)]
        all: bool,

        /// Print the file tree and selection without compiling
        #[arg(long)]
        list_only: bool,
    },

    /// Generate the file-list.json manifest for a library directory
    ///
    /// Example: instruction-compiler generate ./custom-instructions-lib
    Generate {
        /// Library directory to walk
        dir: PathBuf,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is `base` an Option<String>?
//    - Absence means "fall back to the environment, then the default";
//      that resolution happens in main, not here, so the CLI layer stays
//      a pure description of the flags
//
// 2. What do the doc comments do?
//    - clap turns them into --help text: the first line is the short
//      help, the rest shows in long help
//
// 3. Why Vec<String> for --select?
//    - A Vec field makes the flag repeatable:
//      --select lib/a.md --select lib/b.md
// -----------------------------------------------------------------------------
