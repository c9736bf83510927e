//! Catalog domain model.
//!
//! # Responsibility
//! - Define the descriptor shape shared by the listing view and tool views.
//! - Keep descriptor validation next to the data it guards.
//!
//! # Invariants
//! - Every tool is identified by a unique, URL-safe `id`.
//! - Descriptors are immutable once the catalog is loaded.

pub mod tool;
