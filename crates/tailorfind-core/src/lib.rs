// crates/tailorfind-core/src/lib.rs

//! Search and proximity filtering for a directory of tailors.
//!
//! The crate is split the same way the screen is: two one-shot asynchronous
//! sources ([`source`]) feed a synchronous, side-effect-free
//! [`engine::derive`]. [`screen::DirectoryScreen`] wires them together for
//! one activation.

pub mod common;
pub mod engine;
pub mod error;
pub mod filter;
pub mod geo;
pub mod model;
pub mod prelude;
pub mod screen;
pub mod source;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::DirectoryStats;
pub use crate::engine::{derive, FilterOutcome, ResultRow, ResultStatus};
pub use crate::error::{Result, SourceError};
pub use crate::filter::{FilterCatalog, FilterSelection, SpatialFilter};
pub use crate::model::{LocationSnapshot, ProviderRecord};
pub use crate::screen::DirectoryScreen;
pub use crate::source::{LocationState, RecordState};
