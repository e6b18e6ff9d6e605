use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Hash;
use crate::object::blob::fsync_dir;
use crate::repo::Repo;

/// the staging set: file names selected for the next commit, mapped to
/// the blob hashes of their content at the time they were staged
///
/// persisted to `<repo>/staging` so that staging in one process and
/// committing in another works. staging never consults commit history;
/// it only records present content.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Staging {
    entries: BTreeMap<String, Hash>,
}

impl Staging {
    /// load the staging set, treating an absent file as empty
    pub fn load(repo: &Repo) -> Result<Self> {
        let path = repo.staging_path();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::Io { path, source: e }),
        };

        let entries: BTreeMap<String, Hash> = ciborium::from_reader(&bytes[..])?;
        Ok(Self { entries })
    }

    /// save the staging set atomically
    pub fn save(&self, repo: &Repo) -> Result<()> {
        let mut bytes = Vec::new();
        ciborium::into_writer(&self.entries, &mut bytes)?;

        // atomic write: temp -> fsync -> rename
        let tmp_path = repo.tmp_path().join(uuid::Uuid::new_v4().to_string());
        {
            let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
            tmp_file.write_all(&bytes).with_path(&tmp_path)?;
            tmp_file.sync_all().with_path(&tmp_path)?;
        }

        let path = repo.staging_path();
        fs::rename(&tmp_path, &path).with_path(&path)?;
        fsync_dir(repo.path())?;

        Ok(())
    }

    /// record or overwrite the staged hash for a file name
    ///
    /// last write for a given name wins.
    pub fn stage(&mut self, name: &str, hash: Hash) -> Result<()> {
        validate_file_name(name)?;
        self.entries.insert(name.to_string(), hash);
        Ok(())
    }

    /// snapshot of the staged mapping, for use by commit
    pub fn current(&self) -> &BTreeMap<String, Hash> {
        &self.entries
    }

    /// empty the staging set; called after a successful commit
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// number of staged files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// true if nothing is staged
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// validate a staged file name
///
/// entries are flat base names written directly into a checkout target;
/// anything that could escape that directory is rejected.
pub fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidFileName("empty file name".to_string()));
    }

    if name == "." || name == ".." {
        return Err(Error::InvalidFileName(name.to_string()));
    }

    if name.contains('/') || name.contains('\0') {
        return Err(Error::InvalidFileName(name.to_string()));
    }

    Ok(())
}
