use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, IoResultExt, Result};

/// a tack repository
///
/// owns the on-disk layout: a content-addressed object store, the
/// append-only commit journal, the persisted staging set, and scratch
/// space for atomic writes. exclusive single-process ownership of the
/// repository directory is assumed; no cross-process locking is done.
pub struct Repo {
    path: PathBuf,
    config: Config,
}

impl Repo {
    /// initialize a new repository at the given path
    pub fn init(path: &Path) -> Result<Self> {
        let config_path = path.join("config.toml");
        if config_path.exists() {
            return Err(Error::RepoExists(path.to_path_buf()));
        }

        // create directory structure
        std::fs::create_dir_all(path.join("objects/blobs")).with_path(path)?;
        std::fs::create_dir_all(path.join("objects/records")).with_path(path)?;
        std::fs::create_dir_all(path.join("tmp")).with_path(path)?;

        // empty journal: zero commits
        let journal_path = path.join("journal");
        File::create(&journal_path).with_path(&journal_path)?;

        let config = Config::new();
        config.save(&config_path)?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// open an existing repository
    pub fn open(path: &Path) -> Result<Self> {
        let config_path = path.join("config.toml");
        if !config_path.exists() {
            return Err(Error::NoRepo(path.to_path_buf()));
        }

        let config = Config::load(&config_path)?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// repository root path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// repository configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// path to config.toml
    pub fn config_path(&self) -> PathBuf {
        self.path.join("config.toml")
    }

    /// path to objects directory
    pub fn objects_path(&self) -> PathBuf {
        self.path.join("objects")
    }

    /// path to blobs directory
    pub fn blobs_path(&self) -> PathBuf {
        self.objects_path().join("blobs")
    }

    /// path to commit records directory
    pub fn records_path(&self) -> PathBuf {
        self.objects_path().join("records")
    }

    /// path to the commit journal file
    pub fn journal_path(&self) -> PathBuf {
        self.path.join("journal")
    }

    /// path to the persisted staging set
    pub fn staging_path(&self) -> PathBuf {
        self.path.join("staging")
    }

    /// path to tmp directory (for atomic writes)
    pub fn tmp_path(&self) -> PathBuf {
        self.path.join("tmp")
    }
}
