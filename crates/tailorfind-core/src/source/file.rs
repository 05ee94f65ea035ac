// crates/tailorfind-core/src/source/file.rs

// ---------------------------------------------------------------------------
// FILE GUARD: skipped if the 'json' feature is missing.
// ---------------------------------------------------------------------------
#![cfg(feature = "json")]

use super::common_io::open_stream;
use crate::error::{Result, SourceError};
use crate::model::ProviderRecord;
use crate::traits::RecordProvider;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Reads the tailor collection from a JSON array on disk (`.json` or
/// `.json.gz`).
///
/// Parsing runs on the blocking pool so the async sources stay responsive.
#[derive(Debug, Clone)]
pub struct JsonFileRecordProvider {
    path: PathBuf,
}

impl JsonFileRecordProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Synchronous read, used by the async path and by tooling.
    pub fn read_records(path: &Path) -> Result<Vec<ProviderRecord>> {
        let reader = open_stream(path)?;
        let records: Vec<ProviderRecord> = serde_json::from_reader(reader)?;
        debug!(count = records.len(), path = %path.display(), "Parsed record file");
        Ok(records)
    }
}

#[async_trait]
impl RecordProvider for JsonFileRecordProvider {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_all(&self) -> Result<Vec<ProviderRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read_records(&path))
            .await
            .map_err(|e| SourceError::RecordFetch(format!("record reader stopped: {e}")))?
    }
}
