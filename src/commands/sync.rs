//! The `sync` subcommand: reconcile the home directory with the store.

use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::store::FileStatus;

/// Run `kontor sync`.
///
/// Prints one status line per tracked file and a summary, then fails if any
/// file did not end up synced. Conflicts are reported, never resolved.
///
/// # Errors
///
/// Returns an error when the store cannot be walked or when one or more
/// files ended the pass unsynced.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let setup = CommandSetup::init(global)?;
    let report = setup.store.sync()?;

    for (relative, status) in &report.files {
        match status {
            FileStatus::Synced => {
                println!("\x1b[32m✓\x1b[0m {}", relative.display());
            }
            FileStatus::Relinked => {
                println!("\x1b[32m✓\x1b[0m {} (relinked)", relative.display());
            }
            FileStatus::Conflict { slot, found } => {
                let detail = found.as_ref().map_or_else(
                    || "not a symlink".to_string(),
                    |target| format!("points to {}", target.display()),
                );
                println!(
                    "\x1b[31m✗\x1b[0m {} (conflict: {} {detail})",
                    relative.display(),
                    slot.display()
                );
            }
            FileStatus::Failed(e) => {
                println!("\x1b[31m✗\x1b[0m {} (error: {e:#})", relative.display());
            }
        }
    }

    let total = report.files.len();
    let failed = report.failure_count();
    println!("{total} file(s), {failed} need attention");

    if failed > 0 {
        anyhow::bail!("{failed} file(s) failed to sync");
    }
    Ok(())
}
