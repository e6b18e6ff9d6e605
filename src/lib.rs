//! tack - minimal single-branch version control
//!
//! a content-addressed snapshot engine: stage individual files, commit the
//! staged set with a message, list history, and restore the working
//! directory to any prior commit by numeric index.
//!
//! # Core concepts
//!
//! - **Blob**: content-addressed file data, identified by SHA-256 of its
//!   bytes and deduplicated across files and commits
//! - **Staging**: the persisted selection of file-name to blob-hash
//!   mappings destined for the next commit
//! - **Commit record**: an immutable snapshot (message, timestamp, staged
//!   mapping), stored CBOR + zstd and addressed by content hash
//! - **Journal**: the append-only chain of commits; a commit's index is
//!   its 0-based line position, gapless and never reused
//!
//! # Example usage
//!
//! ```no_run
//! use tack::{ops, Repo};
//! use std::path::Path;
//!
//! // initialize a repository
//! let repo = Repo::init(Path::new("/path/to/repo")).unwrap();
//!
//! // stage a file and commit the staged set
//! ops::add(&repo, Path::new("notes.txt")).unwrap();
//! let record = ops::commit(&repo, "first snapshot").unwrap();
//!
//! // restore that snapshot later
//! ops::checkout(&repo, record.index, Path::new("/destination")).unwrap();
//! ```

mod config;
mod error;
mod hash;
mod repo;
mod staging;
mod types;

pub mod journal;
pub mod object;
pub mod ops;

pub use config::{Config, FORMAT_VERSION};
pub use error::{Error, Result};
pub use hash::{compute_hash, Hash};
pub use object::{
    blob_exists, blob_path, read_blob, read_record, record_exists, write_blob, write_record,
};
pub use repo::Repo;
pub use staging::{validate_file_name, Staging};
pub use types::CommitRecord;
