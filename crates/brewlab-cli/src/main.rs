//! brewlab CLI application
//!
//! The `brew` binary: recipe browsing and editing, share links, the guided
//! brew session, and an MCP server over stdio.

mod args;
mod brew;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use brewlab_core::{params::ListRecipes, LibraryBuilder};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, BrewlabMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        owner,
        command,
    } = Args::parse();

    let library = LibraryBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to open recipe library")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("brewlab started as '{owner}'");

    match command {
        Some(Recipe { command }) => {
            Cli::new(library, renderer, owner)
                .handle_recipe_command(command)
                .await
        }
        Some(Share { command }) => {
            Cli::new(library, renderer, owner)
                .handle_share_command(command)
                .await
        }
        Some(Brew(args)) => Cli::new(library, renderer, owner).brew(args).await,
        Some(Serve) => {
            info!("Starting brewlab MCP server");
            run_stdio_server(BrewlabMcpServer::new(library, owner))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(library, renderer, owner)
                .list_recipes(&ListRecipes { mine: false })
                .await
        }
    }
}
