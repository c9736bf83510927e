//! Explicit application context.
//!
//! # Responsibility
//! - Own the store connection and the loaded catalog.
//! - Hand out tool services bound to the store.
//!
//! # Invariants
//! - There is no process-wide store; every service borrows from a context.
//! - The catalog is loaded once per context and never mutated.

use crate::catalog::Catalog;
use crate::db::{open_db, open_db_in_memory};
use crate::model::tool::ToolDescriptor;
use crate::persist::clear_cache;
use crate::repo::kv_repo::SqliteKvRepository;
use crate::search::fuzzy::SearchIndex;
use crate::service::age_service::AgeService;
use crate::service::bmi_service::BmiService;
use crate::service::converter_service::ConverterService;
use crate::service::qr_service::QrService;
use crate::service::{Notice, ServiceResult};
use rusqlite::Connection;
use std::path::Path;

pub struct AppContext {
    conn: Connection,
    catalog: Catalog,
}

impl AppContext {
    /// Opens the store at `path` and loads the built-in catalog.
    pub fn open(path: impl AsRef<Path>) -> ServiceResult<Self> {
        Ok(Self::from_parts(open_db(path)?, Catalog::builtin()?))
    }

    /// Context backed by a throwaway in-memory store.
    pub fn open_in_memory() -> ServiceResult<Self> {
        Ok(Self::from_parts(open_db_in_memory()?, Catalog::builtin()?))
    }

    pub fn from_parts(conn: Connection, catalog: Catalog) -> Self {
        Self { conn, catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tool(&self, id: &str) -> Option<&ToolDescriptor> {
        self.catalog.get(id)
    }

    /// Search index over this context's catalog.
    pub fn search_index(&self) -> SearchIndex<'_> {
        SearchIndex::new(self.catalog.tools())
    }

    pub fn store(&self) -> SqliteKvRepository<'_> {
        SqliteKvRepository::new(&self.conn)
    }

    pub fn age(&self) -> AgeService<SqliteKvRepository<'_>> {
        AgeService::new(self.store())
    }

    pub fn bmi(&self) -> BmiService<SqliteKvRepository<'_>> {
        BmiService::new(self.store())
    }

    pub fn converter(&self) -> ConverterService<SqliteKvRepository<'_>> {
        ConverterService::new(self.store())
    }

    pub fn qr(&self) -> QrService<SqliteKvRepository<'_>> {
        QrService::new(self.store())
    }

    /// Forgets every remembered `tool_` input.
    pub fn clear_cache(&self) -> ServiceResult<Notice> {
        clear_cache(&self.store())?;
        Ok(Notice::CacheCleared)
    }

    /// Releases the context, returning the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}
