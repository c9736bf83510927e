//! Key/value repository contract and SQLite implementation.
//!
//! Values are opaque strings at this layer; JSON encoding is owned by the
//! persistence hook in [`crate::persist`].

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidKey(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid store key `{key}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for remembered tool inputs.
pub trait KvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    /// Inserts or overwrites `key`.
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Removes `key`; returns whether it existed.
    fn remove(&self, key: &str) -> RepoResult<bool>;
    /// Lists keys starting with `prefix`, sorted ascending.
    fn keys_with_prefix(&self, prefix: &str) -> RepoResult<Vec<String>>;
    /// Removes every key starting with `prefix`; returns the removed count.
    fn remove_prefix(&self, prefix: &str) -> RepoResult<usize>;
}

/// SQLite-backed key/value repository.
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        validate_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        validate_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        validate_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", params![key])?;
        Ok(changed > 0)
    }

    fn keys_with_prefix(&self, prefix: &str) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT key FROM kv_store
             WHERE substr(key, 1, length(?1)) = ?1
             ORDER BY key ASC;",
        )?;
        let keys = stmt
            .query_map(params![prefix], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn remove_prefix(&self, prefix: &str) -> RepoResult<usize> {
        if prefix.is_empty() {
            return Err(RepoError::InvalidKey(String::new()));
        }
        let removed = self.conn.execute(
            "DELETE FROM kv_store WHERE substr(key, 1, length(?1)) = ?1;",
            params![prefix],
        )?;
        Ok(removed)
    }
}

fn validate_key(key: &str) -> RepoResult<()> {
    if key.trim().is_empty() {
        return Err(RepoError::InvalidKey(key.to_string()));
    }
    Ok(())
}
