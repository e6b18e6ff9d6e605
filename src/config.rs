use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, IoResultExt, Result};

/// current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

/// repository configuration stored in config.toml
///
/// the presence of this file is what marks a directory as an initialized
/// repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// on-disk format version
    pub version: u32,
}

impl Config {
    /// create a config for the current format version
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION,
        }
    }

    /// load config from file, rejecting formats newer than this build
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_path(path)?;
        let config: Config = toml::from_str(&content)?;
        if config.version > FORMAT_VERSION {
            return Err(Error::UnsupportedVersion(config.version));
        }
        Ok(config)
    }

    /// save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_path(path)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
