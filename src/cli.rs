// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes. The `env = ...` attribute lets a flag fall
// back to an environment variable, which is how the access token is
// usually supplied.
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "source-graph",
    version,
    about = "Fetch a GitHub directory tree and print it as a normalized entity graph",
    long_about = "source-graph walks a directory (or single file) in a GitHub repository through \
                  the contents API, one request per file or folder, and flattens the result into \
                  tables of files and dirs keyed by id."
)]
pub struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides this)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a repository path and normalize it
    ///
    /// Example: source-graph fetch https://github.com/rust-lang/rust/tree/master/src/doc
    Fetch {
        /// GitHub URL: a repository, or .../tree/<branch>/<path>, or .../blob/<branch>/<file>
        url: String,

        /// Access token sent as `Authorization: token ...` (omit for public repos)
        #[arg(long, env = "GITHUB_TOKEN", default_value = "", hide_env_values = true)]
        token: String,

        /// Logical name for the source (default: owner/repo)
        #[arg(long)]
        name: Option<String>,

        /// Id for the source (default: a generated UUID)
        #[arg(long)]
        id: Option<String>,

        /// User-Agent header sent to GitHub
        #[arg(long)]
        user_agent: Option<String>,

        /// Print the normalized graph as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
}
