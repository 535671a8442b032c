use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the home directory manager.
#[derive(Parser, Debug)]
#[command(name = "kontor", about = "Manages your home directory", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print information useful for debugging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the home directory (defaults to the current user's home)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Override the profile configured in ~/.kontor.toml
    #[arg(short, long, global = true)]
    pub profile: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a file to the kontor
    Link(LinkOpts),
    /// List all files in the kontor
    List,
    /// Synchronize the home directory with the kontor
    Sync,
}

/// Options for the `link` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct LinkOpts {
    /// File to move into managed storage
    pub file: PathBuf,
}
