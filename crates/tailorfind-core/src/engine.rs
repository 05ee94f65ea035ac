// crates/tailorfind-core/src/engine.rs

//! # Filter Engine
//!
//! A pure function of (records, query, active spatial filter, location) to
//! an ordered, distance-annotated result list plus a status code. It does no
//! I/O, holds no handles to the sources and never fails.

use crate::filter::SpatialFilter;
use crate::model::ProviderRecord;
use crate::source::{LocationIssue, LocationState, RecordState};
use crate::text::normalize_query;
use crate::traits::NameMatch;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// One surviving record. `distance_km` is set whenever a location fix exists
/// and the record has usable coordinates, whether or not a filter is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub record: ProviderRecord,
    pub distance_km: Option<f64>,
}

/// Why the result list looks the way it does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResultStatus {
    /// At least one row.
    Ready,
    NoResults,
    WaitingForLocation,
    LocationUnavailable(LocationIssue),
    LoadingRecords,
    FetchError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub rows: Vec<ResultRow>,
    pub status: ResultStatus,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Empty-state text for the presentation layer; `None` when there are rows.
    pub fn message(&self) -> Option<String> {
        match &self.status {
            ResultStatus::Ready => None,
            ResultStatus::NoResults => Some("No tailors match your search.".to_string()),
            ResultStatus::WaitingForLocation => {
                Some("Finding your location to apply the distance filter…".to_string())
            }
            ResultStatus::LocationUnavailable(issue) => Some(issue.message()),
            ResultStatus::LoadingRecords => Some("Loading tailors…".to_string()),
            ResultStatus::FetchError(msg) => Some(msg.clone()),
        }
    }
}

/// Derive the visible result set.
///
/// Text match and spatial selection are conjunctive predicates; the text
/// match runs first because it is cheaper. An active filter without a
/// location fix yields no rows at all (fail closed). Input order is kept.
pub fn derive(
    records: &RecordState,
    query: &str,
    filter: Option<&SpatialFilter>,
    location: &LocationState,
) -> FilterOutcome {
    derive_normalized(records, &normalize_query(query), filter, location)
}

fn derive_normalized(
    records: &RecordState,
    q: &str,
    filter: Option<&SpatialFilter>,
    location: &LocationState,
) -> FilterOutcome {
    let snapshot = location.snapshot();

    let rows: Vec<ResultRow> = match (filter, snapshot) {
        (Some(_), None) => Vec::new(),
        _ => records
            .records()
            .iter()
            .filter(|r| r.name_contains(q))
            .filter_map(|r| {
                let distance_km = snapshot.and_then(|s| s.distance_to(r));
                let admitted = match filter {
                    None => true,
                    Some(f) => distance_km.is_some_and(|d| f.admits(d)),
                };
                admitted.then(|| ResultRow {
                    record: r.clone(),
                    distance_km,
                })
            })
            .collect(),
    };

    let status = status_for(&rows, records, filter, location);
    debug!(
        query = %q,
        filter = filter.map(|f| f.id.as_str()).unwrap_or("none"),
        rows = rows.len(),
        ?status,
        "Derived results"
    );
    FilterOutcome { rows, status }
}

fn status_for(
    rows: &[ResultRow],
    records: &RecordState,
    filter: Option<&SpatialFilter>,
    location: &LocationState,
) -> ResultStatus {
    if !rows.is_empty() {
        return ResultStatus::Ready;
    }
    match records {
        RecordState::Failed(msg) => return ResultStatus::FetchError(msg.clone()),
        RecordState::Loading => return ResultStatus::LoadingRecords,
        RecordState::Loaded(_) => {}
    }
    if filter.is_some() && location.snapshot().is_none() {
        if let Some(issue) = location.issue() {
            return ResultStatus::LocationUnavailable(issue);
        }
        return ResultStatus::WaitingForLocation;
    }
    ResultStatus::NoResults
}

/// Memoizing front for [`derive`].
///
/// Re-derives from scratch when the record set identity, the normalized
/// query, the active filter or the location state changed; otherwise hands
/// back the previous outcome.
#[derive(Debug, Default)]
pub struct Deriver {
    last: Option<(DeriveKey, Arc<FilterOutcome>)>,
    derivations: u64,
}

#[derive(Debug)]
struct DeriveKey {
    records: RecordState,
    query: String,
    filter: Option<SpatialFilter>,
    location: LocationState,
}

impl DeriveKey {
    fn matches(
        &self,
        records: &RecordState,
        query: &str,
        filter: Option<&SpatialFilter>,
        location: &LocationState,
    ) -> bool {
        self.records.same_as(records)
            && self.query == query
            && self.filter.as_ref() == filter
            && &self.location == location
    }
}

impl Deriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(
        &mut self,
        records: &RecordState,
        query: &str,
        filter: Option<&SpatialFilter>,
        location: &LocationState,
    ) -> Arc<FilterOutcome> {
        let q = normalize_query(query);
        if let Some((key, outcome)) = &self.last {
            if key.matches(records, &q, filter, location) {
                return Arc::clone(outcome);
            }
        }

        let outcome = Arc::new(derive_normalized(records, &q, filter, location));
        self.derivations += 1;
        self.last = Some((
            DeriveKey {
                records: records.clone(),
                query: q,
                filter: filter.cloned(),
                location: location.clone(),
            },
            Arc::clone(&outcome),
        ));
        outcome
    }

    /// How many times [`derive`] actually ran.
    pub fn derivations(&self) -> u64 {
        self.derivations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocationSnapshot;

    fn sample() -> RecordState {
        let mut bee = ProviderRecord::new("2", "Bee Stitch");
        bee.has_location = true;
        RecordState::loaded(vec![
            ProviderRecord::new("1", "Ace Tailors").with_location(51.5, -0.1),
            bee,
        ])
    }

    fn within(km: f64) -> SpatialFilter {
        SpatialFilter::new("within", "Within", km)
    }

    fn fixed(lat: f64, lon: f64) -> LocationState {
        LocationState::Fixed(LocationSnapshot::new(lat, lon))
    }

    fn ids(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.rows.iter().map(|r| r.record.id.as_str()).collect()
    }

    #[test]
    fn no_filter_no_location_keeps_everything() {
        let out = derive(&sample(), "", None, &LocationState::Idle);
        assert_eq!(ids(&out), ["1", "2"]);
        assert!(out.rows.iter().all(|r| r.distance_km.is_none()));
        assert_eq!(out.status, ResultStatus::Ready);
        assert_eq!(out.message(), None);
    }

    #[test]
    fn radius_filter_with_fix() {
        let f = within(5.0);
        let out = derive(&sample(), "", Some(&f), &fixed(51.5, -0.1));
        assert_eq!(ids(&out), ["1"]);
        assert!(out.rows[0].distance_km.unwrap().abs() < 1e-9);
    }

    #[test]
    fn filter_without_location_fails_closed() {
        let f = within(5.0);
        let out = derive(&sample(), "", Some(&f), &LocationState::Denied);
        assert!(out.is_empty());
        assert_eq!(
            out.status,
            ResultStatus::LocationUnavailable(LocationIssue::PermissionDenied)
        );

        let out = derive(&sample(), "", Some(&f), &LocationState::Failed("no GPS".into()));
        assert!(matches!(
            out.status,
            ResultStatus::LocationUnavailable(LocationIssue::FixFailed(_))
        ));

        for pending in [
            LocationState::Idle,
            LocationState::Requesting,
            LocationState::Granted,
            LocationState::Resolving,
        ] {
            let out = derive(&sample(), "", Some(&f), &pending);
            assert!(out.is_empty());
            assert_eq!(out.status, ResultStatus::WaitingForLocation);
        }
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let out = derive(&sample(), "ace", None, &LocationState::Idle);
        assert_eq!(ids(&out), ["1"]);
        let out = derive(&sample(), "  STITCH ", None, &LocationState::Idle);
        assert_eq!(ids(&out), ["2"]);
    }

    #[test]
    fn query_matches_only_literal_text() {
        let records = RecordState::loaded(vec![
            ProviderRecord::new("1", "Café Couture"),
            ProviderRecord::new("2", "Straße Schneider"),
            ProviderRecord::new("3", "😀 Tailors"),
            ProviderRecord::new("4", "北京 Tailors"),
        ]);
        for q in ["grinning", "bei", "\u{200b}", "cafe", "strasse"] {
            let out = derive(&records, q, None, &LocationState::Idle);
            assert!(out.is_empty(), "{q:?} matched {:?}", ids(&out));
            assert_eq!(out.status, ResultStatus::NoResults);
        }
        assert_eq!(ids(&derive(&records, "CAFÉ", None, &LocationState::Idle)), ["1"]);
        assert_eq!(ids(&derive(&records, "straße", None, &LocationState::Idle)), ["2"]);
        assert_eq!(ids(&derive(&records, "😀", None, &LocationState::Idle)), ["3"]);
        assert_eq!(ids(&derive(&records, "北京", None, &LocationState::Idle)), ["4"]);
    }

    #[test]
    fn distance_shown_without_filter() {
        let out = derive(&sample(), "", None, &fixed(51.5, -0.1));
        assert_eq!(ids(&out), ["1", "2"]);
        assert!(out.rows[0].distance_km.is_some());
        assert_eq!(out.rows[1].distance_km, None);
    }

    #[test]
    fn boundary_is_inclusive() {
        let records = sample();
        let here = fixed(51.6, -0.1);
        let exact = LocationSnapshot::new(51.6, -0.1)
            .distance_to(&records.records()[0])
            .unwrap();

        let out = derive(&records, "", Some(&within(exact)), &here);
        assert_eq!(ids(&out), ["1"]);

        let out = derive(&records, "", Some(&within(exact - 1e-9)), &here);
        assert!(out.is_empty());
        assert_eq!(out.status, ResultStatus::NoResults);
    }

    #[test]
    fn status_precedence() {
        let f = within(5.0);
        let out = derive(&RecordState::Loading, "", Some(&f), &LocationState::Denied);
        assert_eq!(out.status, ResultStatus::LoadingRecords);

        let failed = RecordState::Failed("Could not load tailors: 503".into());
        let out = derive(&failed, "", None, &LocationState::Idle);
        assert_eq!(out.status, ResultStatus::FetchError("Could not load tailors: 503".into()));
        assert_eq!(out.message().as_deref(), Some("Could not load tailors: 503"));

        let out = derive(&sample(), "zzz", None, &LocationState::Denied);
        assert_eq!(out.status, ResultStatus::NoResults);
    }

    #[test]
    fn denial_and_failure_messages_differ() {
        let f = within(5.0);
        let denied = derive(&sample(), "", Some(&f), &LocationState::Denied);
        let failed = derive(&sample(), "", Some(&f), &LocationState::Failed("timeout".into()));
        assert_ne!(denied.message(), failed.message());
    }

    #[test]
    fn deriver_skips_unchanged_inputs() {
        let records = sample();
        let mut d = Deriver::new();
        let a = d.outcome(&records, "ace", None, &LocationState::Idle);
        let b = d.outcome(&records.clone(), " ACE ", None, &LocationState::Idle);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(d.derivations(), 1);

        d.outcome(&records, "ace", None, &fixed(51.5, -0.1));
        assert_eq!(d.derivations(), 2);

        // Equal contents but a fresh fetch: recompute.
        d.outcome(&sample(), "ace", None, &fixed(51.5, -0.1));
        assert_eq!(d.derivations(), 3);
    }
}
