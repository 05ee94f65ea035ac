// crates/tailorfind-core/src/model.rs
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};

/// One tailor as delivered by a record provider.
///
/// Optional text fields use `None` for "not listed"; an empty string is kept
/// as-is and is not the same thing. Coordinates are only usable when both
/// halves are present, see [`ProviderRecord::coordinates`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default, alias = "addressLine1")]
    pub address_line1: Option<String>,
    #[serde(default, alias = "addressLine2")]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,

    /// Claims the record carries geodata. Not trusted on its own.
    #[serde(default, alias = "hasLocation")]
    pub has_location: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl ProviderRecord {
    /// Minimal record with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            phone: None,
            email: None,
            address_line1: None,
            address_line2: None,
            city: None,
            postcode: None,
            country: None,
            has_location: false,
            latitude: None,
            longitude: None,
        }
    }

    /// Builder-style helper that sets both coordinates and `has_location`.
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.has_location = true;
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usable coordinates, or `None` when either half is missing or the pair
    /// is out of range. `has_location` does not influence the result.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let c = Coordinates::new(self.latitude?, self.longitude?);
        c.is_valid().then_some(c)
    }

    /// `has_location` is set but no usable coordinate exists.
    pub fn claims_location_without_coordinates(&self) -> bool {
        self.has_location && self.coordinates().is_none()
    }

    /// Single display line built from the postal fields that are present.
    pub fn address(&self) -> Option<String> {
        let parts: Vec<&str> = [
            &self.address_line1,
            &self.address_line2,
            &self.city,
            &self.postcode,
            &self.country,
        ]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// The user's one-shot position fix.
///
/// Never mutated in place; a fresh fix replaces the whole value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationSnapshot {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Distance to the record in kilometers, `None` if it has no usable
    /// coordinates.
    pub fn distance_to(&self, record: &ProviderRecord) -> Option<f64> {
        record
            .coordinates()
            .map(|c| self.coordinates().distance_km(&c))
    }
}
