//! Home directory manager.
//!
//! kontor relocates individual dotfiles into a tracked store at
//! `~/.kontor/<profile>/` and leaves an absolute symlink behind at the
//! original location. The `sync` operation re-walks the store and repairs
//! any missing links; anything unexpected at a link's slot is reported as a
//! conflict and left for the user to resolve.
//!
//! The public API is organised into three layers:
//!
//! - **[`config`]** — load and validate `~/.kontor.toml`
//! - **[`store`]** — the managed store: path resolution, linking, walking,
//!   and the three-state reconciliation engine
//! - **[`commands`]** — top-level subcommand orchestration (`link`, `list`, `sync`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
