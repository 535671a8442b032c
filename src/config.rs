//! Configuration file loading.
//!
//! kontor reads a single TOML file at `<home>/.kontor.toml`. A missing file
//! is not an error; it deserializes to the default settings so that a fresh
//! home directory works out of the box.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Name of the config file, relative to the home directory.
pub const CONFIG_FILE: &str = ".kontor.toml";

/// Settings loaded from `~/.kontor.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Profile selecting a subdirectory of managed storage.
    #[serde(default = "default_profile")]
    pub profile: String,
}

fn default_profile() -> String {
    "default".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: default_profile(),
        }
    }
}

/// Load settings from `<home>/.kontor.toml`.
///
/// Returns the defaults when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// configured profile name is invalid.
pub fn load(home: &Path) -> Result<Settings, ConfigError> {
    let path = home.join(CONFIG_FILE);

    let settings = if path.exists() {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?
    } else {
        Settings::default()
    };

    validate_profile(&settings.profile)?;
    Ok(settings)
}

/// Check that a profile name matches `[A-Za-z0-9_-]+`.
///
/// The store layer assumes this holds; callers must validate any profile
/// name that did not come through [`load`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidProfile`] for empty names or names with
/// characters outside the allowed set.
pub fn validate_profile(name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidProfile(name.to_string()))
    }
}
