pub mod link;
pub mod list;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::config;
use crate::store::Store;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates home-directory resolution, config loading, and store
/// construction so that each command does not have to repeat the
/// boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    pub profile: String,
    pub store: Store,
}

impl CommandSetup {
    /// Resolve the home directory, load the config, and open the store.
    ///
    /// A `--profile` override takes precedence over `~/.kontor.toml` and is
    /// validated by the same rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, the
    /// config file fails to load, or the profile name is invalid.
    pub fn init(global: &GlobalOpts) -> Result<Self> {
        let home: PathBuf = match &global.home {
            Some(dir) => dir.clone(),
            None => dirs::home_dir().context("could not determine the home directory")?,
        };

        let settings = config::load(&home)?;
        let profile = match &global.profile {
            Some(name) => {
                config::validate_profile(name)?;
                name.clone()
            }
            None => settings.profile,
        };

        let store = Store::open(&home, &profile)?;
        debug!(
            "home = {}, profile = {profile}, store = {}",
            store.home().display(),
            store.root().display()
        );

        Ok(Self { profile, store })
    }
}
