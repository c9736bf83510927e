//! Static tool catalog.
//!
//! # Responsibility
//! - Load the ordered tool list from the catalog document embedded at build time.
//! - Provide lookups used by the listing view and by each tool's header.
//!
//! # Invariants
//! - Catalog order is the document order and is never re-sorted.
//! - Tool ids are unique across the catalog.

use crate::model::tool::{ToolDescriptor, ToolValidationError};
use log::info;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const BUILTIN_CATALOG_JSON: &str = include_str!("tools.json");

/// Tool ids of the built-in tools, as referenced by tool services.
pub const AGE_CALCULATOR_ID: &str = "age-calculator";
pub const BMI_CALCULATOR_ID: &str = "bmi-calculator";
pub const QR_CODE_GENERATOR_ID: &str = "qr-code-generator";
pub const UNIT_CONVERTER_ID: &str = "unit-converter";

#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    Invalid(ToolValidationError),
    DuplicateId(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "catalog document is malformed: {err}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate tool id in catalog: `{id}`"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<ToolValidationError> for CatalogError {
    fn from(value: ToolValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Ordered, immutable list of tool descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tools: Vec<ToolDescriptor>,
}

impl Catalog {
    /// Loads the catalog embedded in this crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(BUILTIN_CATALOG_JSON)?;
        info!(
            "event=catalog_load module=catalog status=ok tools={}",
            catalog.len()
        );
        Ok(catalog)
    }

    /// Parses and validates a catalog document.
    ///
    /// # Errors
    /// - `Parse` when the document is not a JSON array of descriptors.
    /// - `Invalid` when a descriptor breaks its own invariants.
    /// - `DuplicateId` when two descriptors share an id.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let tools: Vec<ToolDescriptor> = serde_json::from_str(document)?;
        Self::from_tools(tools)
    }

    /// Builds a catalog from already-decoded descriptors.
    pub fn from_tools(tools: Vec<ToolDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for tool in &tools {
            tool.validate()?;
            if !seen.insert(tool.id.as_str()) {
                return Err(CatalogError::DuplicateId(tool.id.clone()));
            }
        }
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Finds a tool by id.
    pub fn get(&self, id: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.id == id)
    }

    /// Resolves a route such as `/tools/unit-converter` to its tool.
    pub fn resolve_route(&self, route: &str) -> Option<&ToolDescriptor> {
        let id = route
            .strip_prefix(crate::model::tool::TOOL_ROUTE_PREFIX)?
            .trim_end_matches('/');
        self.get(id)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
