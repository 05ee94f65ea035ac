// crates/tailorfind-core/src/source/mod.rs

//! # Sources
//!
//! The two asynchronous inputs of the directory screen. Each one is a
//! one-shot operation whose failures are captured here and turned into
//! plain state values ([`RecordState`], [`LocationState`]) before they reach
//! the filter engine.

use crate::model::ProviderRecord;
use crate::text::fold_key;
use crate::traits::RecordProvider;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

mod common_io;
mod file;
mod fixed;
mod location;
mod rest;

pub use common_io::open_stream;
#[cfg(feature = "json")]
pub use file::JsonFileRecordProvider;
pub use fixed::{StaticLocationProvider, StaticRecordProvider};
pub use location::{acquire_location, LocationIssue, LocationState};
#[cfg(feature = "remote")]
pub use rest::{RemoteConfig, RestRecordProvider, DEFAULT_TABLE};

/// The latest known result of the record fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecordState {
    #[default]
    Loading,
    /// Name-ordered records. A new fetch replaces the whole set.
    Loaded(Arc<[ProviderRecord]>),
    /// Display message of the failed fetch.
    Failed(String),
}

impl RecordState {
    pub fn loaded(records: Vec<ProviderRecord>) -> Self {
        RecordState::Loaded(prepare_records(records).into())
    }

    /// The usable records; empty while loading or after a failure.
    pub fn records(&self) -> &[ProviderRecord] {
        match self {
            RecordState::Loaded(records) => &records[..],
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RecordState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RecordState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Same state by identity: loaded sets compare by pointer.
    pub fn same_as(&self, other: &RecordState) -> bool {
        match (self, other) {
            (RecordState::Loading, RecordState::Loading) => true,
            (RecordState::Loaded(a), RecordState::Loaded(b)) => Arc::ptr_eq(a, b),
            (RecordState::Failed(a), RecordState::Failed(b)) => a == b,
            _ => false,
        }
    }
}

/// Drop repeated ids (first one wins) and order by lowercased name, then id.
pub fn prepare_records(mut records: Vec<ProviderRecord>) -> Vec<ProviderRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records.retain(|r| {
        let fresh = seen.insert(r.id.clone());
        if !fresh {
            warn!(id = %r.id, "Dropping tailor with duplicate id");
        }
        fresh
    });
    records.sort_by_cached_key(|r| (fold_key(&r.name), r.id.clone()));
    records
}

/// Run one fetch against `provider` and capture the result as a state.
#[instrument(skip_all)]
pub async fn load_records(provider: &dyn RecordProvider) -> RecordState {
    match provider.fetch_all().await {
        Ok(records) => {
            let state = RecordState::loaded(records);
            info!(count = state.records().len(), "Loaded tailors");
            state
        }
        Err(e) => {
            warn!(error = %e, "Tailor fetch failed");
            RecordState::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, name: &str) -> ProviderRecord {
        ProviderRecord::new(id, name)
    }

    #[test]
    fn orders_by_folded_name() {
        let out = prepare_records(vec![
            rec("3", "zed"),
            rec("1", "Dora Couture"),
            rec("2", "Bee Stitch"),
            rec("4", "ace Tailors"),
        ]);
        let names: Vec<_> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["ace Tailors", "Bee Stitch", "Dora Couture", "zed"]);
    }

    #[test]
    fn equal_names_tie_break_on_id() {
        let out = prepare_records(vec![rec("b", "Same"), rec("a", "same")]);
        let ids: Vec<_> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let out = prepare_records(vec![rec("1", "First"), rec("1", "Again"), rec("2", "Other")]);
        assert_eq!(out.len(), 2);
        assert!(out.iter().any(|r| r.name == "First"));
        assert!(!out.iter().any(|r| r.name == "Again"));
    }

    #[tokio::test]
    async fn failed_fetch_is_empty_with_message() {
        let provider = StaticRecordProvider::failing("backend down");
        let state = load_records(&provider).await;
        assert!(state.records().is_empty());
        assert!(state.error().unwrap().contains("backend down"));
    }

    #[tokio::test]
    async fn loaded_fetch_is_sorted() {
        let provider = StaticRecordProvider::new(vec![rec("2", "Bee"), rec("1", "Ace")]);
        let state = load_records(&provider).await;
        assert_eq!(state.records()[0].id, "1");
    }

    #[test]
    fn identity_comparison() {
        let a = RecordState::loaded(vec![rec("1", "Ace")]);
        let b = RecordState::loaded(vec![rec("1", "Ace")]);
        assert_eq!(a, b);
        assert!(!a.same_as(&b));
        assert!(a.same_as(&a.clone()));
    }
}
