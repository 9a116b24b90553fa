// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Fetch and normalize the requested source
// 4. Print the graph as JSON or as an indented tree
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod logging; // src/logging.rs - tracing setup

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use source_graph::{
    fetch_source, parse_github_url, ClientConfig, EntityKind, EntityRef, GithubClient,
    NormalizedGraph, RandomIds, SourceRequest,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = source fetched and printed
//   Err   = anything went wrong (main turns this into exit code 2)
async fn run(cli: Cli) -> Result<i32> {
    // Match on which subcommand was used (only `fetch` for now)
    match cli.command {
        Commands::Fetch {
            url,
            token,
            name,
            id,
            user_agent,
            json,
        } => {
            // Fall back to "owner/repo" when no name was given
            let name = match name {
                Some(name) => name,
                None => default_name(&url)?,
            };
            let mut request = SourceRequest::new(url, token, name);
            request.id = id;

            // Start from the defaults and override what the user passed
            let mut config = ClientConfig::default();
            if let Some(user_agent) = user_agent {
                config.user_agent = user_agent;
            }

            handle_fetch(request, config, json).await
        }
    }
}

// "owner/repo" from the URL; fails early on URLs we can't resolve anyway
fn default_name(url: &str) -> Result<String> {
    let location = parse_github_url(url)?;
    Ok(format!("{}/{}", location.owner, location.repo))
}

// Handles the 'fetch' subcommand
// Parameters:
//   request: what to fetch, with the token and the source name
//   config: HTTP client settings (user agent, media type)
//   json: whether to output JSON format
async fn handle_fetch(request: SourceRequest, config: ClientConfig, json: bool) -> Result<i32> {
    // Keep a copy of the URL for messages; `request` moves into the fetch
    let url = request.url.clone();
    if !json {
        println!("🔍 Fetching: {}", url);
    }

    // One client for the whole tree so connections get reused
    let client = GithubClient::new(config);
    let graph = fetch_source(&client, &RandomIds, request)
        .await
        .with_context(|| format!("failed to fetch {}", url))?;

    // Print either machine-readable JSON or a human-readable tree
    if json {
        println!("{}", serde_json::to_string_pretty(&graph_json(&graph)?)?);
    } else {
        print_tree(&graph);
    }
    Ok(0)
}

// The graph as JSON, minus access tokens: stdout often ends up in CI logs
fn graph_json(graph: &NormalizedGraph) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(graph)?;
    if let Some(sources) = value["entities"]["sources"].as_object_mut() {
        for source in sources.values_mut() {
            if let Some(fields) = source.as_object_mut() {
                fields.remove("accessToken");
            }
        }
    }
    Ok(value)
}

fn print_tree(graph: &NormalizedGraph) {
    for source_id in &graph.result {
        let Some(source) = graph.source(source_id) else {
            continue;
        };
        println!("📦 {} ({})", source.name, source.id);
        for reference in &source.content {
            print_entry(graph, reference, 1);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Files: {}", graph.entities.files.len());
    println!("   📁 Dirs: {}", graph.entities.dirs.len());
}

fn print_entry(graph: &NormalizedGraph, reference: &EntityRef, depth: usize) {
    let indent = "  ".repeat(depth);
    match reference.kind {
        EntityKind::Files => {
            if let Some(file) = graph.file(&reference.id) {
                println!("{}📄 {} ({} bytes)", indent, file.name, file.content.len());
            }
        }
        EntityKind::Dirs => {
            if let Some(dir) = graph.dir(&reference.id) {
                println!("{}📁 {}/", indent, dir.name);
                for child in &dir.content {
                    print_entry(graph, child, depth + 1);
                }
            }
        }
    }
}
