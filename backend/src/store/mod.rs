//! Record store - keeps check-in records on disk
//!
//! Records live in a single JSON file. The file is read on open and
//! rewritten after every insert through `tokio::fs`; a store without a path
//! stays in memory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreResult;
use crate::models::{IdentityDetails, StoredRecord};

/// Store for check-in records
#[derive(Debug, Default)]
pub struct RecordStore {
    /// Backing file, `None` for an in-memory store
    path: Option<PathBuf>,
    /// Records in insertion order
    records: Vec<StoredRecord>,
}

impl RecordStore {
    /// Open the store at `path`, loading existing records.
    ///
    /// A missing file is an empty store; an unreadable one is an error.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };

        Ok(Self {
            path: Some(path),
            records,
        })
    }

    /// A store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All records, oldest first
    pub fn list(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Get a record by ID
    pub fn get(&self, id: u64) -> Option<&StoredRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Save a new record and return it with its assigned ID.
    ///
    /// Nothing is kept in memory when the write fails.
    pub async fn insert(
        &mut self,
        details: &IdentityDetails,
        filenames: Vec<String>,
    ) -> StoreResult<StoredRecord> {
        let record = StoredRecord::new(self.next_id(), details, filenames);
        self.records.push(record.clone());

        if let Err(e) = self.persist().await {
            self.records.pop();
            return Err(e);
        }
        Ok(record)
    }

    /// IDs start at 1 and never repeat.
    fn next_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    async fn persist(&self) -> StoreResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&self.records)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
