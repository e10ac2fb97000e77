//! CLI entry point for the bridge adapter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BrowserClaw MCP server
#[derive(Parser, Debug)]
#[command(
    name = "browserclaw-mcp",
    version,
    about = "MCP stdio server that proxies tool calls to the BrowserClaw bridge"
)]
pub struct Cli {
    /// Config file (TOML, or JSON with a .json extension)
    #[arg(short, long, env = "BROWSERCLAW_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// Check bridge health and print the response
    Health,
    /// Print the tool catalog as the MCP client would see it
    Tools,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, defaulting to `serve`.
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
