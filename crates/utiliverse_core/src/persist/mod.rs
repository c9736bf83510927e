//! Remembered tool inputs.
//!
//! # Responsibility
//! - Provide the `persisted(key, initial)` hook every tool form uses.
//! - Own key naming conventions and the bulk cache-clear action.
//!
//! # Invariants
//! - Values are stored as JSON text.
//! - `set` writes through synchronously; there is no write coalescing.
//! - Cache clear only touches keys under [`keys::TOOL_KEY_PREFIX`].

pub mod hook;
pub mod keys;

pub use hook::{clear_cache, persisted, Persisted, StoreError, StoreResult};
