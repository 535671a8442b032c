// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed fake home so each integration test
// can set up an isolated environment without repeating filesystem
// boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use kontor::store::Store;

/// An isolated fake home directory backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TestHome {
    /// Temporary directory standing in for the user's home.
    pub home: tempfile::TempDir,
}

impl TestHome {
    /// Create a new empty fake home.
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path to the fake home directory.
    pub fn path(&self) -> &Path {
        self.home.path()
    }

    /// Write `content` to `<home>/<relative>`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.home.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }

    /// Write a `.kontor.toml` selecting `profile`.
    pub fn write_config(&self, profile: &str) {
        self.write_file(".kontor.toml", &format!("profile = \"{profile}\"\n"));
    }

    /// Open the store for `profile` inside this home.
    pub fn store(&self, profile: &str) -> Store {
        Store::open(self.home.path(), profile).expect("open store")
    }
}
