//! Host platform capabilities used by tool actions.
//!
//! Clipboard and share sheets are optional: a tool asks the platform and turns
//! a missing capability into a notice for the user instead of an error.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Capability is not available on this host.
    Unsupported,
    /// Capability exists but the call failed.
    Failed(String),
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "capability not supported on this platform"),
            Self::Failed(message) => write!(f, "platform call failed: {message}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// File handed to a native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile<'a> {
    pub name: &'a str,
    pub mime_type: &'a str,
    pub bytes: &'a [u8],
    pub title: &'a str,
    pub text: &'a str,
}

/// Optional host capabilities.
pub trait Platform {
    fn copy_text(&self, text: &str) -> Result<(), PlatformError>;
    fn copy_png(&self, png: &[u8]) -> Result<(), PlatformError>;
    fn share(&self, file: &SharedFile<'_>) -> Result<(), PlatformError>;
}

/// Platform without clipboard or share support, e.g. a terminal session.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessPlatform;

impl Platform for HeadlessPlatform {
    fn copy_text(&self, _text: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn copy_png(&self, _png: &[u8]) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn share(&self, _file: &SharedFile<'_>) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }
}
