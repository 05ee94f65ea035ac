//! tailorfind-rs: workspace facade over [`tailorfind_core`], used by the demos.
pub use tailorfind_core::*;
