use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, IoResultExt, Result};
use crate::journal;
use crate::object::read_blob;
use crate::repo::Repo;

/// restore the files of a commit into a target directory
///
/// every file the record references is written (overwriting an existing
/// file of the same name); files in the target that the record does not
/// mention are left untouched. this is a restore, not a full tree
/// replacement.
///
/// best-effort: if writing one file fails the operation aborts and files
/// already written stay on disk.
///
/// returns the restored paths in file-name order.
pub fn checkout(repo: &Repo, index: u64, target: &Path) -> Result<Vec<PathBuf>> {
    let record = journal::commit_at(repo, index)?;

    if !target.exists() {
        fs::create_dir_all(target).with_path(target)?;
    }

    let mut restored = Vec::with_capacity(record.len());
    for (name, hash) in &record.entries {
        // a journaled commit guarantees its blobs exist; a miss here means
        // the store itself has been damaged
        let content = match read_blob(repo, hash) {
            Ok(content) => content,
            Err(Error::ObjectNotFound(hash)) => {
                return Err(Error::CorruptRepo(format!(
                    "commit {} references blob {} missing from the object store",
                    index,
                    hash.short_hex()
                )));
            }
            Err(e) => return Err(e),
        };

        let path = target.join(name);
        fs::write(&path, content).with_path(&path)?;
        restored.push(path);
    }

    tracing::info!(index, files = restored.len(), "checked out commit");

    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{add, commit};
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo_path = dir.path().join("repo");
        let repo = Repo::init(&repo_path).unwrap();
        (dir, repo)
    }

    fn write_and_add(repo: &Repo, dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        add(repo, &path).unwrap();
    }

    #[test]
    fn test_checkout_restores_files() {
        let (dir, repo) = test_repo();

        write_and_add(&repo, dir.path(), "a.txt", "hello");
        write_and_add(&repo, dir.path(), "b.txt", "world");
        let record = commit(&repo, "pair").unwrap();

        let target = dir.path().join("work");
        let restored = checkout(&repo, record.index, &target).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(fs::read_to_string(target.join("a.txt")).unwrap(), "hello");
        assert_eq!(fs::read_to_string(target.join("b.txt")).unwrap(), "world");
    }

    #[test]
    fn test_checkout_earlier_version() {
        let (dir, repo) = test_repo();

        write_and_add(&repo, dir.path(), "x.txt", "v1");
        let first = commit(&repo, "first").unwrap();

        write_and_add(&repo, dir.path(), "x.txt", "v2");
        commit(&repo, "second").unwrap();

        let target = dir.path().join("work");
        checkout(&repo, first.index, &target).unwrap();

        assert_eq!(fs::read_to_string(target.join("x.txt")).unwrap(), "v1");
    }

    #[test]
    fn test_checkout_overwrites_existing_file() {
        let (dir, repo) = test_repo();

        write_and_add(&repo, dir.path(), "a.txt", "committed");
        let record = commit(&repo, "one").unwrap();

        let target = dir.path().join("work");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("a.txt"), "stale").unwrap();

        checkout(&repo, record.index, &target).unwrap();

        assert_eq!(
            fs::read_to_string(target.join("a.txt")).unwrap(),
            "committed"
        );
    }

    #[test]
    fn test_checkout_leaves_extraneous_files() {
        let (dir, repo) = test_repo();

        write_and_add(&repo, dir.path(), "a.txt", "content");
        let record = commit(&repo, "one").unwrap();

        let target = dir.path().join("work");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("untracked.txt"), "keep me").unwrap();

        checkout(&repo, record.index, &target).unwrap();

        assert_eq!(
            fs::read_to_string(target.join("untracked.txt")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_checkout_out_of_range_leaves_target_untouched() {
        let (dir, repo) = test_repo();

        write_and_add(&repo, dir.path(), "a.txt", "content");
        commit(&repo, "one").unwrap();

        let target = dir.path().join("work");

        let result = checkout(&repo, 5, &target);
        assert!(matches!(result, Err(Error::CommitNotFound(5))));
        assert!(!target.exists());
    }

    #[test]
    fn test_checkout_missing_blob_is_corrupt_repo() {
        let (dir, repo) = test_repo();

        write_and_add(&repo, dir.path(), "a.txt", "content");
        let record = commit(&repo, "one").unwrap();

        // damage the store after the commit landed
        let hash = *record.entries.get("a.txt").unwrap();
        fs::remove_file(crate::object::blob_path(&repo, &hash)).unwrap();

        let target = dir.path().join("work");
        let result = checkout(&repo, record.index, &target);
        assert!(matches!(result, Err(Error::CorruptRepo(_))));
    }

    #[test]
    fn test_scenario_two_versions() {
        let (dir, repo) = test_repo();

        // init; add x.txt "v1"; commit -> index 0
        let file = dir.path().join("x.txt");
        fs::write(&file, "v1").unwrap();
        let h1 = add(&repo, &file).unwrap();
        let first = commit(&repo, "first").unwrap();
        assert_eq!(first.index, 0);

        // modify to "v2"; add -> different hash; commit -> index 1
        fs::write(&file, "v2").unwrap();
        let h2 = add(&repo, &file).unwrap();
        assert_ne!(h1, h2);
        let second = commit(&repo, "second").unwrap();
        assert_eq!(second.index, 1);

        // checkout of the first commit restores "v1"
        let target = dir.path().join("work");
        checkout(&repo, first.index, &target).unwrap();
        assert_eq!(fs::read_to_string(target.join("x.txt")).unwrap(), "v1");

        // and the second restores "v2"
        checkout(&repo, second.index, &target).unwrap();
        assert_eq!(fs::read_to_string(target.join("x.txt")).unwrap(), "v2");
    }
}
