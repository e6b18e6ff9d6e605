use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::write_blob;
use crate::repo::Repo;
use crate::staging::Staging;

/// stage a file for the next commit
///
/// reads the file, stores its content as a blob, and stages it under its
/// base name. staging an unchanged file is fine; the blob write is a
/// dedup no-op and the staged hash simply stays the same.
///
/// returns the blob hash.
pub fn add(repo: &Repo, file_path: &Path) -> Result<Hash> {
    let name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidFileName(file_path.display().to_string()))?
        .to_string();

    let content = fs::read(file_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(file_path.to_path_buf())
        } else {
            Error::Io {
                path: file_path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let hash = write_blob(repo, &content)?;

    let mut staging = Staging::load(repo)?;
    staging.stage(&name, hash)?;
    staging.save(repo)?;

    tracing::debug!(file = %name, hash = %hash.short_hex(), "staged file");

    Ok(hash)
}
