//! Tool descriptor model.
//!
//! # Responsibility
//! - Define the canonical record describing one utility tool.
//! - Derive the route path each tool page is served under.
//!
//! # Invariants
//! - `id` is non-empty and uses lowercase ASCII letters, digits and `-`.
//! - `title` is non-empty.
//! - `source` is an absolute `http(s)` URL.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static TOOL_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid tool id regex"));

/// Route prefix under which every tool page lives.
pub const TOOL_ROUTE_PREFIX: &str = "/tools/";

/// Validation errors for tool descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolValidationError {
    InvalidId(String),
    EmptyTitle { id: String },
    InvalidSource { id: String, source: String },
    EmptyTag { id: String },
}

impl Display for ToolValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "invalid tool id `{id}`"),
            Self::EmptyTitle { id } => write!(f, "tool `{id}` has an empty title"),
            Self::InvalidSource { id, source } => {
                write!(f, "tool `{id}` has an invalid source url `{source}`")
            }
            Self::EmptyTag { id } => write!(f, "tool `{id}` declares an empty tag"),
        }
    }
}

impl Error for ToolValidationError {}

/// Immutable catalog entry for a single tool.
///
/// Serialized with the same field names as the static catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Stable identifier, doubles as the route path segment.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered tags; order is preserved for display.
    pub tags: Vec<String>,
    /// Link to the tool's source code.
    pub source: String,
}

impl ToolDescriptor {
    /// Validates descriptor-level invariants.
    pub fn validate(&self) -> Result<(), ToolValidationError> {
        if !TOOL_ID_RE.is_match(&self.id) {
            return Err(ToolValidationError::InvalidId(self.id.clone()));
        }
        if self.title.trim().is_empty() {
            return Err(ToolValidationError::EmptyTitle {
                id: self.id.clone(),
            });
        }
        if !(self.source.starts_with("https://") || self.source.starts_with("http://")) {
            return Err(ToolValidationError::InvalidSource {
                id: self.id.clone(),
                source: self.source.clone(),
            });
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(ToolValidationError::EmptyTag {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Returns the page route for this tool, e.g. `/tools/bmi-calculator`.
    pub fn route(&self) -> String {
        format!("{TOOL_ROUTE_PREFIX}{}", self.id)
    }
}
