//! Path resolution for the `link` operation.
//!
//! Validates a caller-supplied path against the home-directory and
//! managed-storage boundaries and computes the store slot it would occupy.
//! Pure validation plus path arithmetic; nothing here touches the
//! filesystem beyond reads.

use std::path::{Path, PathBuf};

use crate::error::LinkError;

/// A validated destination for a file entering the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Absolute path under the managed root where the file will live.
    pub absolute: PathBuf,
    /// Path relative to both the home directory and the managed root.
    pub relative: PathBuf,
}

/// Validate `candidate` and compute its target under `root`.
///
/// The candidate may be absolute or relative and may contain `..` segments;
/// only its parent directory is canonicalized, so the final component may be
/// a dangling symlink or not exist at all.
///
/// Rejection order: unresolvable parent, candidate is a directory, inside
/// the store, outside the home directory, target slot already occupied.
pub(crate) fn resolve_link_target(
    candidate: &Path,
    home: &Path,
    root: &Path,
) -> Result<LinkTarget, LinkError> {
    let canonical = canonicalize_parent(candidate)?;

    // Only individual files are tracked. symlink_metadata does not follow
    // the leaf, so a symlink (even one pointing at a directory) stays
    // linkable; a missing leaf is caught later by the move itself.
    if canonical.symlink_metadata().is_ok_and(|m| m.is_dir()) {
        return Err(LinkError::IsDirectory { path: canonical });
    }

    if canonical.starts_with(root) {
        return Err(LinkError::InsideStore { path: canonical });
    }

    let relative = match canonical.strip_prefix(home) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => return Err(LinkError::OutsideHome { path: canonical }),
    };

    let absolute = root.join(&relative);
    // symlink_metadata succeeds for broken symlinks too, so an occupied slot
    // is detected even when plain exists() would say no.
    if absolute.symlink_metadata().is_ok() {
        return Err(LinkError::AlreadyLinked { path: absolute });
    }

    Ok(LinkTarget { absolute, relative })
}

/// Canonicalize the directory portion of `path` and reattach the final
/// component untouched.
///
/// Full-path canonicalization would follow (or fail on) the leaf, which must
/// stay linkable even when it is itself a symlink or does not exist yet.
fn canonicalize_parent(path: &Path) -> Result<PathBuf, LinkError> {
    let Some(name) = path.file_name() else {
        return Err(LinkError::Resolution {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name component",
            ),
        });
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let parent = dunce::canonicalize(parent).map_err(|source| LinkError::Resolution {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parent.join(name))
}
