//! Moving a file into the store and leaving a symlink behind.

use std::path::Path;

use anyhow::{Context as _, Result};

/// Move the file at `slot` to `target` and replace it with an absolute
/// symlink pointing at `target`.
///
/// Intermediate directories under the store are created as needed; they are
/// idempotently reusable, so a failure later does not roll them back. The
/// move itself never leaves the file half-transferred: either the original
/// still exists at `slot`, or it exists complete at `target`.
pub(crate) fn relocate(slot: &Path, target: &Path) -> Result<()> {
    ensure_parent_dir(target)?;
    move_file(slot, target)
        .with_context(|| format!("moving {} to {}", slot.display(), target.display()))?;
    create_symlink(target, slot)?;
    Ok(())
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Move a file, preferring a single atomic rename.
///
/// When the rename crosses a filesystem boundary, falls back to
/// [`copy_then_delete`].
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => copy_then_delete(from, to),
        Err(e) => Err(e),
    }
}

/// Cross-device fallback: copy then delete, staged so that no failure mode
/// leaves both copies or neither: a failed copy removes the partial target,
/// and a failed delete of the original removes the copy.
fn copy_then_delete(from: &Path, to: &Path) -> std::io::Result<()> {
    if let Err(copy_err) = copy_entry(from, to) {
        let _ = std::fs::remove_file(to);
        return Err(copy_err);
    }
    if let Err(remove_err) = std::fs::remove_file(from) {
        let _ = std::fs::remove_file(to);
        return Err(remove_err);
    }
    Ok(())
}

/// Copy a single entry without following a symlink leaf.
///
/// A symlink is recreated as a link at the destination, matching what the
/// rename path does; `fs::copy` would materialize its referent's content
/// instead (or fail on a dangling link). Regular files go through
/// `fs::copy`, which carries permissions across.
fn copy_entry(from: &Path, to: &Path) -> std::io::Result<()> {
    if from.symlink_metadata()?.is_symlink() {
        let referent = std::fs::read_link(from)?;
        #[cfg(unix)]
        return std::os::unix::fs::symlink(referent, to);
        #[cfg(windows)]
        return std::os::windows::fs::symlink_file(referent, to);
    }
    std::fs::copy(from, to).map(|_| ())
}

/// Create a symlink at `link` pointing to `target`.
pub(crate) fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                link.display(),
                target.display()
            )
        })?;
    }

    #[cfg(windows)]
    {
        // Only individual files are tracked, so symlink_file always applies.
        std::os::windows::fs::symlink_file(target, link).with_context(|| {
            format!(
                "creating symlink {} -> {} (requires developer mode or admin)",
                link.display(),
                target.display()
            )
        })?;
    }

    Ok(())
}
