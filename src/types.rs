use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hash::Hash;

/// one committed snapshot: a position in the journal plus the staged
/// file-name to blob-hash mapping it captured
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// position in the commit journal, 0-based, gapless
    pub index: u64,
    /// commit message
    pub message: String,
    /// unix timestamp (seconds since epoch)
    pub timestamp: i64,
    /// file name -> blob hash (BTreeMap for deterministic serialization)
    pub entries: BTreeMap<String, Hash>,
}

impl CommitRecord {
    /// create a record stamped with the current time
    pub fn new(index: u64, message: impl Into<String>, entries: BTreeMap<String, Hash>) -> Self {
        Self {
            index,
            message: message.into(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0),
            entries,
        }
    }

    /// create a record with an explicit timestamp
    pub fn with_timestamp(
        index: u64,
        message: impl Into<String>,
        timestamp: i64,
        entries: BTreeMap<String, Hash>,
    ) -> Self {
        Self {
            index,
            message: message.into(),
            timestamp,
            entries,
        }
    }

    /// file names in this snapshot, in entry order
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// number of files in this snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// true if the snapshot carries no files
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
