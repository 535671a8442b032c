//! The managed store.
//!
//! A [`Store`] is the pair of a canonical home directory and the managed
//! root derived from it (`<home>/.kontor/<profile>`). Tracked files live
//! physically under the managed root, mirrored at the same relative path
//! from both roots; the home-directory side is only ever a symlink. The
//! filesystem is the single source of truth: nothing is cached between
//! operations.

pub mod link;
pub mod resolve;
pub mod sync;
pub mod walk;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

pub use resolve::LinkTarget;
pub use sync::{compute_state, reconcile, FileStatus, SyncReport, SyncState};
pub use walk::Walk;

/// Name of the managed storage directory, relative to the home directory.
pub const STORE_DIR: &str = ".kontor";

/// A profile's managed store rooted inside a home directory.
#[derive(Debug, Clone)]
pub struct Store {
    home: PathBuf,
    root: PathBuf,
}

impl Store {
    /// Open the store for `profile` inside `home`.
    ///
    /// The home directory is canonicalized once here so that all later path
    /// comparisons are byte-for-byte. The managed root itself need not exist
    /// yet; it is created lazily by the first `link`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be canonicalized.
    pub fn open(home: &Path, profile: &str) -> Result<Self> {
        let home = dunce::canonicalize(home)
            .with_context(|| format!("resolving home directory {}", home.display()))?;
        let root = home.join(STORE_DIR).join(profile);
        Ok(Self { home, root })
    }

    /// The canonical home directory.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The managed root, `<home>/.kontor/<profile>`.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Home-directory slot for a tracked relative path.
    #[must_use]
    pub fn slot(&self, relative: &Path) -> PathBuf {
        self.home.join(relative)
    }

    /// Move `candidate` into the store and leave a symlink at its original
    /// location.
    ///
    /// # Errors
    ///
    /// Returns a [`LinkError`](crate::error::LinkError) when validation
    /// rejects the candidate (nothing is mutated in that case), or an I/O
    /// error from the move or symlink creation.
    pub fn link(&self, candidate: &Path) -> Result<LinkTarget> {
        let target = resolve::resolve_link_target(candidate, &self.home, &self.root)?;
        link::relocate(&self.slot(&target.relative), &target.absolute)?;
        Ok(target)
    }

    /// Lazy depth-first walk of every regular file under the managed root.
    ///
    /// Each call re-reads the filesystem; nothing is cached between walks.
    /// A missing managed root yields an empty walk.
    ///
    /// # Errors
    ///
    /// Returns an error if the managed root exists but cannot be read.
    pub fn tracked_files(&self) -> std::io::Result<Walk> {
        Walk::new(&self.root)
    }

    /// Relative paths of all tracked files, sorted for stable output.
    ///
    /// Pure enumeration; no sync state is computed.
    ///
    /// # Errors
    ///
    /// Returns an error if the walk fails partway.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in self.tracked_files()? {
            let path = entry.with_context(|| format!("walking {}", self.root.display()))?;
            let relative = path
                .strip_prefix(&self.root)
                .with_context(|| format!("stripping store root from {}", path.display()))?;
            paths.push(relative.to_path_buf());
        }
        paths.sort();
        Ok(paths)
    }

    /// Reconcile every tracked file against its home-directory slot.
    ///
    /// Each file is handled independently; a conflict or failure on one file
    /// does not stop the rest of the batch.
    ///
    /// # Errors
    ///
    /// Returns an error only when the walk itself fails; per-file failures
    /// are recorded in the report instead.
    pub fn sync(&self) -> Result<SyncReport> {
        sync::sync_all(self)
    }
}
