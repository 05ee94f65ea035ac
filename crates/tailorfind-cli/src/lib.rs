//! tailorfind-cli
//! ==============
//!
//! Command-line interface for the `tailorfind-core` search and proximity
//! engine.
//!
//! This crate primarily provides a binary (`tailorfind`). The library target
//! only exists so that a documentation page is rendered.
//!
//! Basic usage:
//!
//! ```text
//! tailorfind --input tailors.json stats
//! tailorfind --input tailors.json filters
//! tailorfind --input tailors.json search ace
//! tailorfind --input tailors.json search --filter within-5km --lat 51.5 --lon -0.1
//! tailorfind --input tailors.json search --filter near-me --deny-location
//! ```
//!
//! For programmatic access use the [`tailorfind-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
