// crates/tailorfind-core/src/prelude.rs
pub use crate::common::DirectoryStats;
pub use crate::engine::{derive, Deriver, FilterOutcome, ResultRow, ResultStatus};
pub use crate::error::{Result, SourceError};
pub use crate::filter::{FilterCatalog, FilterSelection, SpatialFilter};
pub use crate::geo::{haversine_km, Coordinates};
pub use crate::model::{LocationSnapshot, ProviderRecord};
pub use crate::screen::DirectoryScreen;
pub use crate::source::{
    load_records, LocationIssue, LocationState, RecordState, StaticLocationProvider,
    StaticRecordProvider,
};
pub use crate::traits::{LocationProvider, NameMatch, Permission, RecordProvider};

#[cfg(feature = "json")]
pub use crate::source::JsonFileRecordProvider;
#[cfg(feature = "remote")]
pub use crate::source::{RemoteConfig, RestRecordProvider};
