//! Body Mass Index calculator.
//!
//! # Invariants
//! - Category bands are half-open; a boundary value belongs to the higher band.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Multiplier for pounds-per-square-inch inputs.
const IMPERIAL_FACTOR: f64 = 703.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Kilograms and metres.
    Metric,
    /// Pounds and inches.
    Imperial,
}

impl UnitSystem {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "metric" => Some(Self::Metric),
            "imperial" => Some(Self::Imperial),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn for_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl Display for BmiCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI from weight and height.
///
/// Metric expects kilograms and metres, imperial pounds and inches.
/// Callers validate that `height` is positive.
pub fn bmi(weight: f64, height: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Metric => weight / (height * height),
        UnitSystem::Imperial => IMPERIAL_FACTOR * weight / (height * height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_half_open() {
        assert_eq!(BmiCategory::for_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::for_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::for_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::for_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn unit_system_parse_is_case_insensitive() {
        assert_eq!(UnitSystem::parse(" Imperial "), Some(UnitSystem::Imperial));
        assert_eq!(UnitSystem::parse("si"), None);
    }
}
