//! Depth-first walk over the managed root.

use std::fs::ReadDir;
use std::io;
use std::path::{Path, PathBuf};

/// Lazy depth-first iterator over every regular file under a root.
///
/// Directories are descended into as they are encountered; symlinks and
/// special files inside the store are not tracked and are skipped. The
/// iterator holds open directory handles only along the current path, so
/// memory stays proportional to tree depth. Each [`Walk::new`] is a fresh
/// filesystem read; nothing is cached between walks.
#[derive(Debug)]
pub struct Walk {
    stack: Vec<ReadDir>,
}

impl Walk {
    /// Start a walk at `root`. A nonexistent root yields an empty walk.
    ///
    /// # Errors
    ///
    /// Returns an error if the root exists but cannot be opened.
    pub fn new(root: &Path) -> io::Result<Self> {
        match std::fs::read_dir(root) {
            Ok(dir) => Ok(Self { stack: vec![dir] }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self { stack: Vec::new() }),
            Err(e) => Err(e),
        }
    }
}

impl Iterator for Walk {
    type Item = io::Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dir = self.stack.last_mut()?;
            let Some(entry) = dir.next() else {
                self.stack.pop();
                continue;
            };
            let entry = match entry {
                Ok(e) => e,
                Err(e) => return Some(Err(e)),
            };
            // file_type does not follow symlinks, so a symlink to a
            // directory is not descended into.
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => return Some(Err(e)),
            };
            if file_type.is_dir() {
                match std::fs::read_dir(entry.path()) {
                    Ok(sub) => self.stack.push(sub),
                    Err(e) => return Some(Err(e)),
                }
            } else if file_type.is_file() {
                return Some(Ok(entry.path()));
            }
        }
    }
}
