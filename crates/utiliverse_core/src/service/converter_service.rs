//! Unit converter use-cases.
//!
//! # Invariants
//! - Changing the category resets the unit pair to that category's first two
//!   units and clears the input value.
//! - Unit choices are validated against the remembered category.
//! - Remembered values that no longer match the vocabulary fail loudly.

use crate::persist::keys::{
    CONVERTER_CATEGORY, CONVERTER_DECIMAL_POINTS, CONVERTER_FROM_UNIT, CONVERTER_INPUT_VALUE,
    CONVERTER_TO_UNIT,
};
use crate::persist::persisted;
use crate::repo::kv_repo::KvRepository;
use crate::service::form::parse_number;
use crate::service::{FormError, ServiceResult};
use crate::tools::units::{
    self, ConversionError, DEFAULT_CATEGORY, DEFAULT_DECIMAL_POINTS,
};
use log::{info, warn};

/// Remembered converter form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterForm {
    pub category: String,
    pub from_unit: String,
    pub to_unit: String,
    pub input_value: String,
    pub decimal_points: i64,
}

impl Default for ConverterForm {
    fn default() -> Self {
        let (from, to) = units::category(DEFAULT_CATEGORY)
            .map_or(("", ""), |category| category.default_pair());
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            from_unit: from.to_string(),
            to_unit: to.to_string(),
            input_value: String::new(),
            decimal_points: DEFAULT_DECIMAL_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub value: f64,
    /// Value rendered with the requested precision.
    pub formatted: String,
    /// Display label of the target unit, e.g. `Feet (ft)`.
    pub unit_label: &'static str,
}

pub struct ConverterService<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> ConverterService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn load_form(&self) -> ServiceResult<ConverterForm> {
        let defaults = ConverterForm::default();
        Ok(ConverterForm {
            category: persisted(&self.repo, CONVERTER_CATEGORY, defaults.category)?
                .into_inner(),
            from_unit: persisted(&self.repo, CONVERTER_FROM_UNIT, defaults.from_unit)?
                .into_inner(),
            to_unit: persisted(&self.repo, CONVERTER_TO_UNIT, defaults.to_unit)?.into_inner(),
            input_value: persisted(&self.repo, CONVERTER_INPUT_VALUE, defaults.input_value)?
                .into_inner(),
            decimal_points: persisted(
                &self.repo,
                CONVERTER_DECIMAL_POINTS,
                defaults.decimal_points,
            )?
            .into_inner(),
        })
    }

    /// Switches category, resetting the unit pair and the input value.
    pub fn set_category(&self, name: &str) -> ServiceResult<()> {
        let category =
            units::category(name).ok_or_else(|| FormError::UnknownCategory(name.to_string()))?;
        let (from, to) = category.default_pair();

        persisted(&self.repo, CONVERTER_CATEGORY, String::new())?.set(category.name.to_string())?;
        self.write_unit(CONVERTER_FROM_UNIT, from)?;
        self.write_unit(CONVERTER_TO_UNIT, to)?;
        self.set_input_value("")
    }

    pub fn set_from_unit(&self, code: &str) -> ServiceResult<()> {
        self.ensure_unit(code)?;
        self.write_unit(CONVERTER_FROM_UNIT, code)
    }

    pub fn set_to_unit(&self, code: &str) -> ServiceResult<()> {
        self.ensure_unit(code)?;
        self.write_unit(CONVERTER_TO_UNIT, code)
    }

    pub fn set_input_value(&self, raw: &str) -> ServiceResult<()> {
        persisted(&self.repo, CONVERTER_INPUT_VALUE, String::new())?
            .set(raw.trim().to_string())?;
        Ok(())
    }

    /// Remembers the precision as entered; it is validated on convert.
    pub fn set_decimal_points(&self, decimal_points: i64) -> ServiceResult<()> {
        persisted(&self.repo, CONVERTER_DECIMAL_POINTS, DEFAULT_DECIMAL_POINTS)?
            .set(decimal_points)?;
        Ok(())
    }

    /// Exchanges the from/to units.
    pub fn swap(&self) -> ServiceResult<()> {
        let form = self.load_form()?;
        self.write_unit(CONVERTER_FROM_UNIT, &form.to_unit)?;
        self.write_unit(CONVERTER_TO_UNIT, &form.from_unit)
    }

    /// Converts the remembered input value.
    pub fn convert(&self) -> ServiceResult<ConversionOutcome> {
        let form = self.load_form()?;
        match evaluate(&form) {
            Ok(outcome) => {
                info!(
                    "event=unit_convert module=service status=ok category={} from={} to={} decimals={}",
                    form.category, form.from_unit, form.to_unit, form.decimal_points
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(
                    "event=unit_convert module=service status=rejected category={} error={}",
                    form.category, err
                );
                Err(err)
            }
        }
    }

    fn ensure_unit(&self, code: &str) -> ServiceResult<()> {
        let form = self.load_form()?;
        let category = units::category(&form.category)
            .ok_or_else(|| ConversionError::UnknownCategory(form.category.clone()))?;
        if category.unit(code).is_none() {
            return Err(FormError::UnknownUnit(code.to_string()).into());
        }
        Ok(())
    }

    fn write_unit(&self, key: &str, code: &str) -> ServiceResult<()> {
        persisted(&self.repo, key, String::new())?.set(code.to_string())?;
        Ok(())
    }
}

/// Validates a converter form and converts its value.
///
/// Checks run in page order: missing value, invalid number, precision.
pub fn evaluate(form: &ConverterForm) -> ServiceResult<ConversionOutcome> {
    let value = parse_number(&form.input_value)?.ok_or(FormError::MissingValue)?;
    units::validate_decimal_points(form.decimal_points)?;

    let converted = units::convert(&form.category, value, &form.from_unit, &form.to_unit)?;
    let formatted = units::format_fixed(converted, form.decimal_points)?;
    let unit_label = units::category(&form.category)
        .and_then(|category| category.unit(&form.to_unit))
        .map_or("", |unit| unit.label);

    Ok(ConversionOutcome {
        value: converted,
        formatted,
        unit_label,
    })
}
