use std::collections::HashSet;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::hash::{compute_hash, Hash};
use crate::journal;
use crate::object::{blob_exists, read_blob};
use crate::repo::Repo;

/// fsck report
#[derive(Debug, Default)]
pub struct FsckReport {
    /// commits checked
    pub commits_checked: usize,
    /// blobs verified against their hash
    pub blobs_checked: usize,
    /// blobs whose stored bytes no longer match their hash
    pub corrupt_blobs: Vec<Hash>,
    /// blobs referenced by a commit but absent from the store
    pub missing_blobs: Vec<MissingBlob>,
    /// stored objects no commit references
    pub dangling_objects: Vec<Hash>,
}

impl FsckReport {
    /// true when no integrity violation was found
    ///
    /// dangling objects are waste, not damage, and don't fail the check.
    pub fn is_ok(&self) -> bool {
        self.corrupt_blobs.is_empty() && self.missing_blobs.is_empty()
    }
}

#[derive(Debug)]
pub struct MissingBlob {
    pub hash: Hash,
    /// "commit 3 entry a.txt"
    pub referenced_by: String,
}

/// verify repository integrity
///
/// walks the whole journal, confirms every referenced blob exists and
/// still hashes to its name, and reports stored objects nothing
/// references. record-object hashes are verified by the journal read
/// itself.
pub fn fsck(repo: &Repo) -> Result<FsckReport> {
    let mut report = FsckReport::default();
    let mut reachable_blobs = HashSet::new();
    let mut reachable_records: HashSet<Hash> =
        journal::read_index(repo)?.into_iter().collect();

    // surface journal-level damage (unparsable lines, tampered records,
    // index mismatches) before checking blobs
    let commits = journal::all_commits(repo)?;

    for record in &commits {
        report.commits_checked += 1;

        for (name, hash) in &record.entries {
            reachable_blobs.insert(*hash);

            if !blob_exists(repo, hash) {
                report.missing_blobs.push(MissingBlob {
                    hash: *hash,
                    referenced_by: format!("commit {} entry {}", record.index, name),
                });
                continue;
            }

            report.blobs_checked += 1;
            let content = read_blob(repo, hash)?;
            if compute_hash(&content) != *hash {
                report.corrupt_blobs.push(*hash);
            }
        }
    }

    // enumerate stored objects and flag the unreachable ones
    for hash in list_objects(&repo.blobs_path())? {
        if !reachable_blobs.contains(&hash) {
            report.dangling_objects.push(hash);
        }
    }
    for hash in list_objects(&repo.records_path())? {
        if !reachable_records.remove(&hash) {
            report.dangling_objects.push(hash);
        }
    }

    tracing::debug!(
        commits = report.commits_checked,
        blobs = report.blobs_checked,
        "fsck finished"
    );

    Ok(report)
}

/// hashes of all objects stored under a two-level object directory
fn list_objects(dir: &Path) -> Result<Vec<Hash>> {
    let mut hashes = Vec::new();

    if !dir.exists() {
        return Ok(hashes);
    }

    for entry in WalkDir::new(dir).min_depth(2).max_depth(2) {
        let entry = entry.map_err(|e| Error::Io {
            path: dir.to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walkdir error")),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let parent_name = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("");

        let hex = format!("{}{}", parent_name, file_name);
        if let Ok(hash) = Hash::from_hex(&hex) {
            hashes.push(hash);
        }
    }

    Ok(hashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{blob_path, write_blob};
    use crate::ops::{add, commit};
    use std::fs;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo_path = dir.path().join("repo");
        let repo = Repo::init(&repo_path).unwrap();
        (dir, repo)
    }

    fn committed_file(repo: &Repo, dir: &Path, name: &str, content: &str) -> Hash {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        let hash = add(repo, &path).unwrap();
        commit(repo, "test").unwrap();
        hash
    }

    #[test]
    fn test_fsck_healthy_repo() {
        let (dir, repo) = test_repo();

        committed_file(&repo, dir.path(), "file.txt", "content");

        let report = fsck(&repo).unwrap();

        assert!(report.is_ok());
        assert_eq!(report.commits_checked, 1);
        assert_eq!(report.blobs_checked, 1);
        assert!(report.dangling_objects.is_empty());
    }

    #[test]
    fn test_fsck_empty_repo() {
        let (_dir, repo) = test_repo();

        let report = fsck(&repo).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.commits_checked, 0);
    }

    #[test]
    fn test_fsck_missing_blob() {
        let (dir, repo) = test_repo();

        let hash = committed_file(&repo, dir.path(), "file.txt", "content");
        fs::remove_file(blob_path(&repo, &hash)).unwrap();

        let report = fsck(&repo).unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.missing_blobs.len(), 1);
        assert_eq!(report.missing_blobs[0].hash, hash);
    }

    #[test]
    fn test_fsck_corrupt_blob() {
        let (dir, repo) = test_repo();

        let hash = committed_file(&repo, dir.path(), "file.txt", "content");
        fs::write(blob_path(&repo, &hash), "mutated").unwrap();

        let report = fsck(&repo).unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.corrupt_blobs, vec![hash]);
    }

    #[test]
    fn test_fsck_dangling_blob() {
        let (dir, repo) = test_repo();

        committed_file(&repo, dir.path(), "file.txt", "content");

        // a stored blob no commit references
        write_blob(&repo, b"never committed").unwrap();

        let report = fsck(&repo).unwrap();

        assert!(report.is_ok()); // waste, not damage
        assert_eq!(report.dangling_objects.len(), 1);
    }
}
