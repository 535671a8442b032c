//! The `list` subcommand: enumerate tracked files.

use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;

/// Run `kontor list`.
///
/// Prints the relative path of every tracked file, one per line. Pure
/// enumeration; no sync state is computed.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or walked.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let setup = CommandSetup::init(global)?;
    for relative in setup.store.list()? {
        println!("{}", relative.display());
    }
    Ok(())
}
