//! Catalog search entry points.
//!
//! # Responsibility
//! - Build a fuzzy index over catalog descriptors.
//! - Return a filtered, relevance-ordered view of the catalog.

pub mod fuzzy;
