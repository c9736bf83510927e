//! Core logic for UtiliVerse.
//! This crate owns the tool formulas, the catalog and the remembered inputs.

pub mod catalog;
pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod repo;
pub mod search;
pub mod service;
pub mod tools;

pub use catalog::{Catalog, CatalogError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::tool::{ToolDescriptor, ToolValidationError};
pub use persist::{clear_cache, persisted, Persisted, StoreError, StoreResult};
pub use repo::kv_repo::{KvRepository, RepoError, RepoResult, SqliteKvRepository};
pub use search::fuzzy::{SearchHit, SearchIndex, SearchKey, SearchOptions};
pub use service::context::AppContext;
pub use service::{FormError, Notice, ServiceError, ServiceResult};
pub use tools::age::{AgeBreakdown, AgeReport, ZodiacSign};
pub use tools::bmi::{BmiCategory, UnitSystem};
pub use tools::units::{convert, ConversionError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
