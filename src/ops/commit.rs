use std::collections::BTreeMap;

use crate::error::Result;
use crate::hash::Hash;
use crate::journal;
use crate::repo::Repo;
use crate::staging::Staging;
use crate::types::CommitRecord;

/// commit the persisted staging set with a message
///
/// staging is cleared only after the journal append succeeded; a rejected
/// commit (empty staging, dangling blob) leaves the staged set intact.
pub fn commit(repo: &Repo, message: &str) -> Result<CommitRecord> {
    let mut staging = Staging::load(repo)?;

    let record = journal::append(repo, message, staging.current())?;

    staging.clear();
    staging.save(repo)?;

    Ok(record)
}

/// commit an explicit name -> hash mapping, bypassing the staging file
///
/// for callers that assemble the staged set themselves.
pub fn commit_staged(
    repo: &Repo,
    message: &str,
    entries: &BTreeMap<String, Hash>,
) -> Result<CommitRecord> {
    journal::append(repo, message, entries)
}
