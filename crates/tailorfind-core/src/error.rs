// crates/tailorfind-core/src/error.rs
use thiserror::Error;

/// Failures raised by the record and location sources.
///
/// These never reach the filter engine as errors: the source adapters in
/// [`crate::source`] capture them and hand the engine a state value instead.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backend or file behind a record provider could not deliver records.
    #[error("Could not load tailors: {0}")]
    RecordFetch(String),

    /// The user declined the location permission prompt.
    #[error("Location permission denied")]
    LocationPermissionDenied,

    /// Permission was granted but no position fix could be obtained.
    #[error("Could not determine your location: {0}")]
    LocationFixFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid filter catalog: {0}")]
    InvalidCatalog(String),

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "remote")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;
