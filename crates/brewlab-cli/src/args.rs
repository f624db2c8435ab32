use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{BrewArgs, RecipeCommands, ShareCommands};

/// Guided pour-over brewing from the terminal
///
/// Browse and remix brew recipes, scale them to the cup you want, and run a
/// timed session that walks through prep, pours and waits. `brew serve`
/// exposes the same library over MCP (Model Context Protocol) for AI
/// assistants.
#[derive(Parser)]
#[command(version, about, name = "brew")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/brewlab/brewlab.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Owner id recorded on drafts, remixes and share links
    #[arg(long, global = true, default_value = "local")]
    pub owner: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, the public recipe list is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Browse, scale and edit recipes
    #[command(alias = "r")]
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Manage share links
    #[command(alias = "s")]
    Share {
        #[command(subcommand)]
        command: ShareCommands,
    },
    /// Run a guided brew session
    #[command(alias = "b")]
    Brew(BrewArgs),
    /// Start the MCP server
    Serve,
}
