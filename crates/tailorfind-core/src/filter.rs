// crates/tailorfind-core/src/filter.rs
use crate::error::{Result, SourceError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named radius bucket. `radius_km` is an inclusive upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialFilter {
    pub id: String,
    pub label: String,
    #[serde(alias = "radiusKm")]
    pub radius_km: f64,
}

impl SpatialFilter {
    pub fn new(id: impl Into<String>, label: impl Into<String>, radius_km: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            radius_km,
        }
    }

    /// Inclusive radius test.
    #[inline]
    pub fn admits(&self, distance_km: f64) -> bool {
        distance_km <= self.radius_km
    }
}

static DEFAULT_CATALOG: Lazy<FilterCatalog> = Lazy::new(|| FilterCatalog {
    filters: vec![
        SpatialFilter::new("near-me", "Near me", 2.0),
        SpatialFilter::new("within-5km", "Within 5 km", 5.0),
        SpatialFilter::new("within-10km", "Within 10 km", 10.0),
    ],
});

/// Ordered set of selectable filters with unique ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCatalog {
    filters: Vec<SpatialFilter>,
}

impl Default for FilterCatalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

impl FilterCatalog {
    /// Build a catalog, rejecting duplicate ids and radii that are not
    /// positive and finite.
    pub fn new(filters: Vec<SpatialFilter>) -> Result<Self> {
        Self { filters }.validated()
    }

    /// Re-check a catalog that came in through deserialization.
    pub fn validated(self) -> Result<Self> {
        self.check()?;
        Ok(self)
    }

    fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for f in &self.filters {
            if !(f.radius_km.is_finite() && f.radius_km > 0.0) {
                return Err(SourceError::InvalidCatalog(format!(
                    "filter '{}' has radius {}",
                    f.id, f.radius_km
                )));
            }
            if !seen.insert(f.id.as_str()) {
                return Err(SourceError::InvalidCatalog(format!(
                    "duplicate filter id '{}'",
                    f.id
                )));
            }
        }
        Ok(())
    }

    pub fn filters(&self) -> &[SpatialFilter] {
        &self.filters
    }

    pub fn get(&self, id: &str) -> Option<&SpatialFilter> {
        self.filters.iter().find(|f| f.id == id)
    }
}

/// The single active spatial filter, if any.
///
/// Selecting a filter replaces the previous one; selecting the active one
/// again turns filtering off.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    active: Option<SpatialFilter>,
}

impl FilterSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&SpatialFilter> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(|f| f.id.as_str())
    }

    /// Toggle `filter`. Returns the new active filter.
    pub fn toggle(&mut self, filter: &SpatialFilter) -> Option<&SpatialFilter> {
        if self.active_id() == Some(filter.id.as_str()) {
            self.active = None;
        } else {
            self.active = Some(filter.clone());
        }
        self.active.as_ref()
    }

    /// Toggle by id through `catalog`. Unknown ids leave the selection as is
    /// and return `false`.
    pub fn toggle_id(&mut self, catalog: &FilterCatalog, id: &str) -> bool {
        match catalog.get(id) {
            Some(f) => {
                self.toggle(f);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_ids() {
        let catalog = FilterCatalog::default();
        let ids: Vec<_> = catalog.filters().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["near-me", "within-5km", "within-10km"]);
        assert_eq!(catalog.get("within-5km").map(|f| f.radius_km), Some(5.0));
    }

    #[test]
    fn rejects_bad_catalogs() {
        assert!(FilterCatalog::new(vec![SpatialFilter::new("a", "A", 0.0)]).is_err());
        assert!(FilterCatalog::new(vec![SpatialFilter::new("a", "A", f64::NAN)]).is_err());
        assert!(FilterCatalog::new(vec![
            SpatialFilter::new("a", "A", 1.0),
            SpatialFilter::new("a", "B", 2.0),
        ])
        .is_err());
    }

    #[test]
    fn selection_is_single_choice_toggle() {
        let catalog = FilterCatalog::default();
        let mut sel = FilterSelection::none();

        assert!(sel.toggle_id(&catalog, "near-me"));
        assert_eq!(sel.active_id(), Some("near-me"));

        assert!(sel.toggle_id(&catalog, "within-10km"));
        assert_eq!(sel.active_id(), Some("within-10km"));

        assert!(sel.toggle_id(&catalog, "within-10km"));
        assert_eq!(sel.active_id(), None);

        assert!(!sel.toggle_id(&catalog, "nowhere"));
        assert_eq!(sel.active_id(), None);
    }

    #[test]
    fn radius_is_inclusive() {
        let f = SpatialFilter::new("r", "R", 5.0);
        assert!(f.admits(5.0));
        assert!(!f.admits(5.0 + 1e-9));
    }

    #[test]
    fn catalog_parses_from_json() {
        let catalog: FilterCatalog =
            serde_json::from_str(r#"[{"id":"x","label":"X","radiusKm":3.5}]"#).unwrap();
        let catalog = catalog.validated().unwrap();
        assert_eq!(catalog.get("x").map(|f| f.radius_km), Some(3.5));
    }
}
