//! BMI calculator use-cases.
//!
//! # Invariants
//! - Weight and height are remembered as raw text, the unit as `metric|imperial`.
//! - Metric height is entered in centimetres.
//! - The category is banded from the two-decimal value that is displayed.

use crate::persist::keys::{BMI_HEIGHT, BMI_UNIT, BMI_WEIGHT};
use crate::persist::persisted;
use crate::repo::kv_repo::KvRepository;
use crate::service::form::parse_number;
use crate::service::{FormError, ServiceResult};
use crate::tools::bmi::{self, BmiCategory, UnitSystem};
use log::{info, warn};

const CENTIMETRES_PER_METRE: f64 = 100.0;

/// Remembered BMI form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmiForm {
    pub unit: UnitSystem,
    pub weight: String,
    pub height: String,
}

impl Default for BmiForm {
    fn default() -> Self {
        Self {
            unit: UnitSystem::Metric,
            weight: String::new(),
            height: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BmiOutcome {
    pub bmi: f64,
    /// Value as displayed, two decimals.
    pub display: String,
    pub category: BmiCategory,
}

pub struct BmiService<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> BmiService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn load_form(&self) -> ServiceResult<BmiForm> {
        let defaults = BmiForm::default();
        Ok(BmiForm {
            unit: persisted(&self.repo, BMI_UNIT, defaults.unit)?.into_inner(),
            weight: persisted(&self.repo, BMI_WEIGHT, defaults.weight)?.into_inner(),
            height: persisted(&self.repo, BMI_HEIGHT, defaults.height)?.into_inner(),
        })
    }

    pub fn set_unit(&self, unit: UnitSystem) -> ServiceResult<()> {
        persisted(&self.repo, BMI_UNIT, UnitSystem::Metric)?.set(unit)?;
        Ok(())
    }

    pub fn set_weight(&self, raw: &str) -> ServiceResult<()> {
        persisted(&self.repo, BMI_WEIGHT, String::new())?.set(raw.trim().to_string())?;
        Ok(())
    }

    pub fn set_height(&self, raw: &str) -> ServiceResult<()> {
        persisted(&self.repo, BMI_HEIGHT, String::new())?.set(raw.trim().to_string())?;
        Ok(())
    }

    /// Calculates BMI from the remembered form.
    pub fn calculate(&self) -> ServiceResult<BmiOutcome> {
        let form = self.load_form()?;
        match evaluate(&form) {
            Ok(outcome) => {
                info!(
                    "event=bmi_calculate module=service status=ok unit={} category={:?}",
                    form.unit.as_str(),
                    outcome.category
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(
                    "event=bmi_calculate module=service status=rejected reason={}",
                    err.code()
                );
                Err(err.into())
            }
        }
    }

    /// Clears weight and height; the unit choice is kept.
    pub fn reset(&self) -> ServiceResult<()> {
        self.set_weight("")?;
        self.set_height("")
    }
}

/// Validates a BMI form and computes its outcome.
pub fn evaluate(form: &BmiForm) -> Result<BmiOutcome, FormError> {
    let weight = parse_number(&form.weight)?;
    let height = parse_number(&form.height)?;
    let (Some(weight), Some(height)) = (weight, height) else {
        return Err(FormError::MissingMeasurements);
    };
    if weight <= 0.0 || height <= 0.0 {
        return Err(FormError::NonPositiveMeasurement);
    }

    let height = match form.unit {
        UnitSystem::Metric => height / CENTIMETRES_PER_METRE,
        UnitSystem::Imperial => height,
    };
    let value = bmi::bmi(weight, height, form.unit);
    let display = format!("{value:.2}");
    let shown = display.parse::<f64>().unwrap_or(value);

    Ok(BmiOutcome {
        bmi: value,
        display,
        category: BmiCategory::for_bmi(shown),
    })
}
