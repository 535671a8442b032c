//! Domain-specific error types for the kontor engine.
//!
//! Internal modules return typed errors ([`ConfigError`], [`LinkError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from loading and validating `~/.kontor.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file contains a syntax error that prevents parsing.
    #[error("invalid TOML in {path}: {source}")]
    Parse {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The profile name contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid profile '{0}': must match [A-Za-z0-9_-]+")]
    InvalidProfile(String),
}

/// Rejections produced while validating a file for the `link` operation.
///
/// All variants abort only the single link operation; none of them mutate
/// the filesystem.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The candidate's parent directory cannot be canonicalized.
    #[error("cannot resolve '{path}': {source}")]
    Resolution {
        /// The candidate path as supplied by the caller.
        path: PathBuf,
        /// Underlying I/O error from canonicalization.
        source: std::io::Error,
    },

    /// The candidate is a directory; only individual files are tracked.
    #[error("'{path}' is a directory: only files can be linked")]
    IsDirectory {
        /// The canonicalized candidate path.
        path: PathBuf,
    },

    /// The candidate already lives under the managed store.
    #[error("'{path}' is inside managed storage")]
    InsideStore {
        /// The canonicalized candidate path.
        path: PathBuf,
    },

    /// The candidate does not live under the home directory.
    #[error("'{path}' is outside the home directory")]
    OutsideHome {
        /// The canonicalized candidate path.
        path: PathBuf,
    },

    /// The store slot for the candidate is already occupied.
    #[error("'{path}' already exists in managed storage")]
    AlreadyLinked {
        /// The occupied target path under the managed root.
        path: PathBuf,
    },
}
