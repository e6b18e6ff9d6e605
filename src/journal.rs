//! the commit journal: the ordered, append-only chain of commits
//!
//! the journal file holds one record-object hash per line; a commit's
//! index is the line number of its hash, 0-based. the file is only ever
//! appended to, so indices are gapless and monotonically increasing.
//!
//! durability ordering: referenced blobs are already durable when append
//! is called (the object store wrote them at staging time), the record
//! object is written and fsynced next, and the journal line goes last.
//! a crash in between leaves at worst an unreachable record object,
//! never a journal entry with a dangling reference.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Hash;
use crate::object::{blob_exists, read_record, write_record};
use crate::repo::Repo;
use crate::types::CommitRecord;

/// append a new commit to the journal
///
/// rejects an empty staged set and any entry whose blob is not in the
/// object store. on success the returned record is durable and visible
/// to `all_commits` / `commit_at`.
pub fn append(
    repo: &Repo,
    message: &str,
    entries: &BTreeMap<String, Hash>,
) -> Result<CommitRecord> {
    if entries.is_empty() {
        return Err(Error::EmptyCommit);
    }

    for (name, hash) in entries {
        if !blob_exists(repo, hash) {
            return Err(Error::DanglingBlob {
                name: name.clone(),
                hash: *hash,
            });
        }
    }

    let index = commit_count(repo)?;
    let record = CommitRecord::new(index, message, entries.clone());

    // record object first, journal line second
    let record_hash = write_record(repo, &record)?;
    append_line(repo, &record_hash)?;

    tracing::info!(index, hash = %record_hash.short_hex(), "appended commit");

    Ok(record)
}

/// all commits in ascending index order
pub fn all_commits(repo: &Repo) -> Result<Vec<CommitRecord>> {
    let hashes = read_index(repo)?;

    let mut records = Vec::with_capacity(hashes.len());
    for (line, hash) in hashes.iter().enumerate() {
        records.push(load_record(repo, *hash, line as u64)?);
    }

    Ok(records)
}

/// the commit at a given index
///
/// valid indices are `[0, commit_count)`.
pub fn commit_at(repo: &Repo, index: u64) -> Result<CommitRecord> {
    let hashes = read_index(repo)?;

    let hash = hashes
        .get(index as usize)
        .copied()
        .ok_or(Error::CommitNotFound(index))?;

    load_record(repo, hash, index)
}

/// number of commits in the journal
pub fn commit_count(repo: &Repo) -> Result<u64> {
    Ok(read_index(repo)?.len() as u64)
}

/// record-object hash for each commit, in index order
pub fn read_index(repo: &Repo) -> Result<Vec<Hash>> {
    let path = repo.journal_path();
    let content = fs::read_to_string(&path).with_path(&path)?;

    let mut hashes = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let hash = Hash::from_hex(line.trim()).map_err(|_| {
            Error::CorruptRepo(format!("journal line {} is not a record hash", line_no))
        })?;
        hashes.push(hash);
    }

    Ok(hashes)
}

/// read one record and cross-check its stored index against its journal
/// position
fn load_record(repo: &Repo, hash: Hash, index: u64) -> Result<CommitRecord> {
    let record = read_record(repo, &hash)?;

    if record.index != index {
        return Err(Error::CorruptRepo(format!(
            "record {} stores index {} but sits at journal line {}",
            hash.short_hex(),
            record.index,
            index
        )));
    }

    Ok(record)
}

/// append one hash line to the journal
///
/// a single write of hash + newline, then fsync. the line either lands
/// fully or the journal is unchanged.
fn append_line(repo: &Repo, hash: &Hash) -> Result<()> {
    let path = repo.journal_path();

    let mut file = OpenOptions::new()
        .append(true)
        .open(&path)
        .with_path(&path)?;

    let line = format!("{}\n", hash.to_hex());
    file.write_all(line.as_bytes()).with_path(&path)?;
    file.sync_all().with_path(&path)?;

    Ok(())
}
