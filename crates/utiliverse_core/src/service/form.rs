//! User-facing form outcomes.
//!
//! # Responsibility
//! - Name every input rejection a tool page can show inline.
//! - Name the transient notices shown after best-effort platform actions.
//!
//! # Invariants
//! - `Display` of a [`FormError`] or [`Notice`] is the exact text shown to users.
//! - A rejected form performs no computation and no store write.

use crate::tools::qr::{MAX_SIZE, MIN_SIZE};
use crate::tools::units::{MAX_DECIMAL_POINTS, MIN_DECIMAL_POINTS};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingValue,
    InvalidNumber,
    PrecisionOutOfRange,
    UnknownCategory(String),
    UnknownUnit(String),
    MissingBirthDate,
    InvalidDate,
    BirthInFuture,
    MissingFutureDate,
    FutureBeforeBirth,
    MissingMeasurements,
    NonPositiveMeasurement,
    UnknownUnitSystem(String),
    MissingQrText,
    QrTextTooLong,
    InvalidColor,
    SizeOutOfRange,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingValue => f.write_str("Please enter a value to convert."),
            Self::InvalidNumber => f.write_str("Please enter a valid number."),
            Self::PrecisionOutOfRange => write!(
                f,
                "Decimal precision must be between {MIN_DECIMAL_POINTS} and {MAX_DECIMAL_POINTS}."
            ),
            Self::UnknownCategory(name) => write!(f, "Unknown conversion category: {name}."),
            Self::UnknownUnit(code) => write!(f, "Unknown unit for this category: {code}."),
            Self::MissingBirthDate => f.write_str("Please enter your birth date."),
            Self::InvalidDate => f.write_str("Please enter a valid date (YYYY-MM-DD)."),
            Self::BirthInFuture => f.write_str("Birth date cannot be in the future."),
            Self::MissingFutureDate => f.write_str("Please enter a future date."),
            Self::FutureBeforeBirth => {
                f.write_str("The future date must be after your birth date.")
            }
            Self::MissingMeasurements => f.write_str("Please enter both weight and height."),
            Self::NonPositiveMeasurement => {
                f.write_str("Weight and height must be greater than zero.")
            }
            Self::UnknownUnitSystem(raw) => {
                write!(f, "Unit must be metric or imperial, got {raw}.")
            }
            Self::MissingQrText => f.write_str("Please enter text or a URL."),
            Self::QrTextTooLong => f.write_str("Text is too long to fit in a QR code."),
            Self::InvalidColor => f.write_str("Colours must be written as #rrggbb."),
            Self::SizeOutOfRange => write!(
                f,
                "QR code size must be between {MIN_SIZE} and {MAX_SIZE} pixels."
            ),
        }
    }
}

impl Error for FormError {}

impl FormError {
    /// Stable snake_case code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingValue => "missing_value",
            Self::InvalidNumber => "invalid_number",
            Self::PrecisionOutOfRange => "precision_out_of_range",
            Self::UnknownCategory(_) => "unknown_category",
            Self::UnknownUnit(_) => "unknown_unit",
            Self::MissingBirthDate => "missing_birth_date",
            Self::InvalidDate => "invalid_date",
            Self::BirthInFuture => "birth_in_future",
            Self::MissingFutureDate => "missing_future_date",
            Self::FutureBeforeBirth => "future_before_birth",
            Self::MissingMeasurements => "missing_measurements",
            Self::NonPositiveMeasurement => "non_positive_measurement",
            Self::UnknownUnitSystem(_) => "unknown_unit_system",
            Self::MissingQrText => "missing_qr_text",
            Self::QrTextTooLong => "qr_text_too_long",
            Self::InvalidColor => "invalid_color",
            Self::SizeOutOfRange => "size_out_of_range",
        }
    }
}

/// Transient message shown after an action, successful or degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    TextCopied,
    TextCopyFailed,
    ImageCopied,
    ImageCopyUnsupported,
    ImageCopyFailed,
    Shared,
    ShareUnsupported,
    ShareFailed,
    PngDownloaded,
    SvgDownloaded,
    CacheCleared,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::TextCopied => "Input text copied!",
            Self::TextCopyFailed => "Copy text failed.",
            Self::ImageCopied => "Image copied!",
            Self::ImageCopyUnsupported => "Image copy not supported on this device.",
            Self::ImageCopyFailed => "Copy failed.",
            Self::Shared => "Shared!",
            Self::ShareUnsupported => "Sharing not supported on this device.",
            Self::ShareFailed => "Share failed.",
            Self::PngDownloaded => "PNG downloaded!",
            Self::SvgDownloaded => "SVG downloaded!",
            Self::CacheCleared => "Cache cleared!",
        }
    }

    /// Whether the notice reports a degraded action.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Self::TextCopyFailed
                | Self::ImageCopyUnsupported
                | Self::ImageCopyFailed
                | Self::ShareUnsupported
                | Self::ShareFailed
        )
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Parses a numeric form field the way the tool pages do.
///
/// Blank input is `Ok(None)`; anything that is not a finite number is
/// rejected with [`FormError::InvalidNumber`].
pub fn parse_number(raw: &str) -> Result<Option<f64>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(FormError::InvalidNumber),
    }
}
