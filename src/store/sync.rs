//! The reconciliation engine.
//!
//! For each file under the managed root, compares the expected
//! home-directory symlink against what is actually there and either leaves
//! it, recreates it, or flags it as a conflict. State is recomputed from the
//! filesystem on every pass; nothing is cached.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::link::{create_symlink, ensure_parent_dir};
use super::Store;

/// Relationship between a managed file and its home-directory slot.
///
/// Computed fresh on every pass; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// The slot is a symlink pointing exactly at the managed file.
    Synced,
    /// Nothing exists at the slot.
    Missing,
    /// The slot is occupied by something unexpected.
    Conflict {
        /// Target of the wrong symlink, or `None` when the occupant is not
        /// a symlink at all.
        found: Option<PathBuf>,
    },
}

/// Outcome of reconciling a single tracked file.
#[derive(Debug)]
pub enum FileStatus {
    /// The link was already correct; nothing was done.
    Synced,
    /// The missing link was recreated.
    Relinked,
    /// The slot needs manual attention; nothing was done.
    Conflict {
        /// The home-directory path that is occupied.
        slot: PathBuf,
        /// What the slot's symlink points at, if it is one.
        found: Option<PathBuf>,
    },
    /// Reconciliation failed with an unexpected error.
    Failed(anyhow::Error),
}

/// Per-file outcomes of one full sync pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// One entry per tracked file, keyed by relative path.
    pub files: Vec<(PathBuf, FileStatus)>,
}

impl SyncReport {
    /// `true` when every file ended the pass correctly linked.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.files
            .iter()
            .all(|(_, status)| matches!(status, FileStatus::Synced | FileStatus::Relinked))
    }

    /// Number of files that are not correctly linked.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.files
            .iter()
            .filter(|(_, status)| !matches!(status, FileStatus::Synced | FileStatus::Relinked))
            .count()
    }
}

/// Compute the sync state of one managed file against its home slot.
///
/// The comparison of link targets is byte-for-byte; the link is never
/// re-resolved, so a link reaching the right inode through a different
/// spelling still counts as a conflict.
///
/// # Errors
///
/// Propagates any I/O failure other than "the slot does not exist" or "the
/// slot exists but is not a symlink"; those are states, not errors.
pub fn compute_state(managed: &Path, slot: &Path) -> io::Result<SyncState> {
    match std::fs::read_link(slot) {
        Ok(found) => {
            if found == managed {
                Ok(SyncState::Synced)
            } else {
                Ok(SyncState::Conflict { found: Some(found) })
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SyncState::Missing),
        Err(e) => match slot.symlink_metadata() {
            // The entry exists but is not a symlink: that is a conflict,
            // not an I/O failure.
            Ok(meta) if !meta.is_symlink() => Ok(SyncState::Conflict { found: None }),
            _ => Err(e),
        },
    }
}

/// Reconcile one managed file: repair a missing link, leave everything else
/// alone.
///
/// # Errors
///
/// Returns an error for unexpected I/O failures; a conflict is a normal
/// outcome, not an error.
pub fn reconcile(managed: &Path, slot: &Path) -> Result<FileStatus> {
    let state = compute_state(managed, slot)
        .with_context(|| format!("checking {}", slot.display()))?;

    match state {
        SyncState::Synced => Ok(FileStatus::Synced),
        SyncState::Missing => {
            ensure_parent_dir(slot)?;
            create_symlink(managed, slot)?;
            Ok(FileStatus::Relinked)
        }
        SyncState::Conflict { found } => Ok(FileStatus::Conflict {
            slot: slot.to_path_buf(),
            found,
        }),
    }
}

/// Reconcile every tracked file, isolating per-file failures.
///
/// # Errors
///
/// Returns an error only when the walk itself fails.
pub(crate) fn sync_all(store: &Store) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    for entry in store.tracked_files()? {
        let managed = entry.with_context(|| format!("walking {}", store.root().display()))?;
        let relative = managed
            .strip_prefix(store.root())
            .with_context(|| format!("stripping store root from {}", managed.display()))?
            .to_path_buf();
        let slot = store.slot(&relative);

        let status = match reconcile(&managed, &slot) {
            Ok(status) => status,
            Err(e) => FileStatus::Failed(e),
        };
        report.files.push((relative, status));
    }

    Ok(report)
}
