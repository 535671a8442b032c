//! The `link` subcommand: move a file into the store.

use anyhow::Result;
use tracing::info;

use super::CommandSetup;
use crate::cli::{GlobalOpts, LinkOpts};

/// Run `kontor link FILE`.
///
/// # Errors
///
/// Returns an error when validation rejects the file or the move fails; in
/// the validation case nothing has been mutated.
pub fn run(global: &GlobalOpts, opts: &LinkOpts) -> Result<()> {
    let setup = CommandSetup::init(global)?;
    let target = setup.store.link(&opts.file)?;
    info!(
        "linked {} -> {}",
        target.relative.display(),
        target.absolute.display()
    );
    Ok(())
}
