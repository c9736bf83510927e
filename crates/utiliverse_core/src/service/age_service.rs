//! Age calculator use-cases.
//!
//! # Invariants
//! - The birth date is remembered as entered (raw `YYYY-MM-DD` text).
//! - Future-age lookups are never remembered.

use crate::persist::keys::AGE_BIRTH_DATE;
use crate::persist::persisted;
use crate::repo::kv_repo::KvRepository;
use crate::service::{FormError, ServiceResult};
use crate::tools::age::{self, AgeBreakdown, AgeReport};
use chrono::NaiveDate;
use log::{info, warn};

pub struct AgeService<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> AgeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Remembered birth date text, empty when never entered.
    pub fn birth_date(&self) -> ServiceResult<String> {
        Ok(persisted(&self.repo, AGE_BIRTH_DATE, String::new())?.into_inner())
    }

    pub fn set_birth_date(&self, raw: &str) -> ServiceResult<()> {
        persisted(&self.repo, AGE_BIRTH_DATE, String::new())?.set(raw.trim().to_string())?;
        Ok(())
    }

    /// Calculates the full report for the remembered birth date.
    pub fn calculate(&self, as_of: NaiveDate) -> ServiceResult<AgeReport> {
        let birth = self.validated_birth(as_of)?;
        let report = age::age_report(birth, as_of).map_err(|_| FormError::BirthInFuture)?;
        info!(
            "event=age_calculate module=service status=ok total_days={}",
            report.total_days
        );
        Ok(report)
    }

    /// Age on `future_raw` for the remembered birth date.
    pub fn future_age(&self, future_raw: &str, today: NaiveDate) -> ServiceResult<AgeBreakdown> {
        let birth = self.validated_birth(today)?;
        if future_raw.trim().is_empty() {
            return Err(FormError::MissingFutureDate.into());
        }
        let future = age::parse_date(future_raw).map_err(|_| FormError::InvalidDate)?;
        let breakdown =
            age::future_age_between(birth, future).ok_or(FormError::FutureBeforeBirth)?;
        Ok(breakdown)
    }

    /// Clears the remembered birth date.
    pub fn reset(&self) -> ServiceResult<()> {
        self.set_birth_date("")
    }

    fn validated_birth(&self, as_of: NaiveDate) -> ServiceResult<NaiveDate> {
        let raw = self.birth_date()?;
        parse_birth(&raw, as_of).map_err(|err| {
            warn!(
                "event=age_calculate module=service status=rejected reason={}",
                err.code()
            );
            err.into()
        })
    }
}

fn parse_birth(raw: &str, as_of: NaiveDate) -> Result<NaiveDate, FormError> {
    if raw.trim().is_empty() {
        return Err(FormError::MissingBirthDate);
    }
    let birth = age::parse_date(raw).map_err(|_| FormError::InvalidDate)?;
    if birth > as_of {
        return Err(FormError::BirthInFuture);
    }
    Ok(birth)
}
