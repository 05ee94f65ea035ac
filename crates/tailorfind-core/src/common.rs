// crates/tailorfind-core/src/common.rs
use crate::model::ProviderRecord;
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics over a fetched record set.
///
/// `claims_without_coordinates` counts records flagged `has_location` that
/// still have no usable coordinate; they never pass a spatial filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub records: usize,
    pub with_coordinates: usize,
    pub claims_without_coordinates: usize,
}

impl DirectoryStats {
    pub fn from_records(records: &[ProviderRecord]) -> Self {
        records.iter().fold(Self::default(), |mut s, r| {
            s.records += 1;
            if r.coordinates().is_some() {
                s.with_coordinates += 1;
            } else if r.has_location {
                s.claims_without_coordinates += 1;
            }
            s
        })
    }
}
