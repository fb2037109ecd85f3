//! # sitemix testkit
//!
//! Test utilities for sitemix.
//!
//! This crate provides:
//! - Entity builders with deterministic UUIDs
//! - In-memory and on-disk test sites
//! - Dependency-chain scenarios for content generation
//! - Property-based identifier generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use sitemix_testkit::prelude::*;
//!
//! let site = TestSite::with_entities(menu_chain(3));
//! assert_eq!(site.repository.len(), 3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod scenarios;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::scenarios::*;
}

pub use fixtures::*;
pub use generators::*;
pub use scenarios::*;
