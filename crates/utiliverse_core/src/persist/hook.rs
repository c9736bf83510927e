//! `persisted(key, initial)` hook.
//!
//! Reads the remembered value once on construction and writes through on
//! every `set`. Stored text that no longer decodes as `T` is logged and
//! replaced by the initial value, so a stale cache never blocks a tool.

use super::keys::TOOL_KEY_PREFIX;
use crate::repo::kv_repo::{KvRepository, RepoError};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    Encode { key: String, source: serde_json::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode { key, source } => write!(f, "failed to encode `{key}`: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// A single remembered field bound to one store key.
pub struct Persisted<'r, T> {
    repo: &'r dyn KvRepository,
    key: String,
    value: T,
}

impl<T> std::fmt::Debug for Persisted<'_, T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persisted")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

/// Binds `key` to a remembered value, falling back to `initial` when absent.
pub fn persisted<'r, T>(
    repo: &'r dyn KvRepository,
    key: impl Into<String>,
    initial: T,
) -> StoreResult<Persisted<'r, T>>
where
    T: Serialize + DeserializeOwned,
{
    Persisted::load(repo, key, initial)
}

impl<'r, T> Persisted<'r, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn load(
        repo: &'r dyn KvRepository,
        key: impl Into<String>,
        initial: T,
    ) -> StoreResult<Self> {
        let key = key.into();
        let value = match repo.get(&key)? {
            Some(raw) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(
                        "event=persisted_load module=persist status=error key={} error_code=decode_failed error={}",
                        key, err
                    );
                    initial
                }
            },
            None => initial,
        };
        Ok(Self { repo, key, value })
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replaces the in-memory value and writes it back immediately.
    pub fn set(&mut self, value: T) -> StoreResult<()> {
        let encoded = serde_json::to_string(&value).map_err(|source| StoreError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.value = value;
        self.repo.set(&self.key, &encoded)?;
        Ok(())
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Persisted<'_, T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Returns an owned copy of the current value.
    pub fn value(&self) -> T {
        self.value.clone()
    }
}

/// Removes every remembered tool input under the `tool_` namespace.
///
/// Returns the number of removed keys.
pub fn clear_cache(repo: &dyn KvRepository) -> StoreResult<usize> {
    let removed = repo.remove_prefix(TOOL_KEY_PREFIX)?;
    info!(
        "event=cache_clear module=persist status=ok prefix={} removed={}",
        TOOL_KEY_PREFIX, removed
    );
    Ok(removed)
}
