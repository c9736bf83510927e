//! Tool use-case services.
//!
//! # Responsibility
//! - Bind each tool form to its remembered fields.
//! - Validate raw form input before any computation.
//! - Keep front ends decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass the persistence hook when touching tool fields.
//! - Form rejections surface as [`FormError`], infrastructure failures as the
//!   other [`ServiceError`] variants.

use crate::catalog::CatalogError;
use crate::db::DbError;
use crate::persist::StoreError;
use crate::tools::qr::QrError;
use crate::tools::units::ConversionError;
use qrcode::types::QrError as EncodeError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod age_service;
pub mod bmi_service;
pub mod context;
pub mod converter_service;
pub mod form;
pub mod qr_service;

pub use form::{FormError, Notice};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected; the message is meant for the user.
    Form(FormError),
    Store(StoreError),
    Db(DbError),
    Catalog(CatalogError),
    /// Remembered configuration no longer matches the unit vocabulary.
    Conversion(ConversionError),
    Qr(QrError),
}

impl ServiceError {
    /// Returns the user-facing rejection, if this is one.
    pub fn as_form(&self) -> Option<&FormError> {
        match self {
            Self::Form(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Conversion(err) => write!(f, "{err}"),
            Self::Qr(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Catalog(err) => Some(err),
            Self::Conversion(err) => Some(err),
            Self::Qr(err) => Some(err),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<crate::repo::kv_repo::RepoError> for ServiceError {
    fn from(value: crate::repo::kv_repo::RepoError) -> Self {
        Self::Store(StoreError::Repo(value))
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<CatalogError> for ServiceError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<ConversionError> for ServiceError {
    fn from(value: ConversionError) -> Self {
        match value {
            ConversionError::PrecisionOutOfRange(_) => Self::Form(FormError::PrecisionOutOfRange),
            other => Self::Conversion(other),
        }
    }
}

impl From<QrError> for ServiceError {
    fn from(value: QrError) -> Self {
        match value {
            QrError::EmptyPayload => Self::Form(FormError::MissingQrText),
            QrError::Encode(EncodeError::DataTooLong) => Self::Form(FormError::QrTextTooLong),
            QrError::InvalidColor(_) => Self::Form(FormError::InvalidColor),
            QrError::SizeOutOfRange(_) => Self::Form(FormError::SizeOutOfRange),
            other => Self::Qr(other),
        }
    }
}
