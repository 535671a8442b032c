use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod store;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init(args.debug);

    match args.command {
        cli::Command::Link(opts) => commands::link::run(&args.global, &opts),
        cli::Command::List => commands::list::run(&args.global),
        cli::Command::Sync => commands::sync::run(&args.global),
    }
}
