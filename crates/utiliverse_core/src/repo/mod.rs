//! Repository layer over the local key/value store.
//!
//! # Responsibility
//! - Define the storage contract tool services depend on.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Keys are non-empty.
//! - Prefix operations match literally; `_` and `%` are not wildcards.

pub mod kv_repo;
