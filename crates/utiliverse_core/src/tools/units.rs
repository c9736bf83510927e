//! Unit conversion engine.
//!
//! # Responsibility
//! - Define the canonical category/unit vocabulary and factor tables.
//! - Convert values linearly through each category's base unit, or through
//!   Celsius for temperatures.
//! - Render results with a validated decimal precision.
//!
//! # Invariants
//! - Every unit listed by a linear category has a factor entry.
//! - Unknown categories and unit codes are errors, never pass-through.
//! - Precision is accepted only in `0..=100`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Category converted through Celsius instead of a factor table.
pub const TEMPERATURE: &str = "Temperature";
pub const DEFAULT_CATEGORY: &str = "Length";
pub const MIN_DECIMAL_POINTS: i64 = 0;
pub const MAX_DECIMAL_POINTS: i64 = 100;
pub const DEFAULT_DECIMAL_POINTS: i64 = 2;

const ABSOLUTE_ZERO_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    UnknownCategory(String),
    UnknownUnit { category: String, unit: String },
    PrecisionOutOfRange(i64),
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCategory(name) => write!(f, "unknown conversion category `{name}`"),
            Self::UnknownUnit { category, unit } => {
                write!(f, "unknown unit `{unit}` in category `{category}`")
            }
            Self::PrecisionOutOfRange(_) => write!(
                f,
                "Decimal precision must be between {MIN_DECIMAL_POINTS} and {MAX_DECIMAL_POINTS}."
            ),
        }
    }
}

impl Error for ConversionError {}

/// Selectable unit: stable code plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// How values move between units of a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Units of base per one unit, keyed by unit code.
    Linear(&'static [(&'static str, f64)]),
    /// Affine Celsius/Fahrenheit/Kelvin formulas.
    Temperature,
}

/// Family of mutually convertible units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Category {
    pub name: &'static str,
    pub units: &'static [UnitOption],
    pub scale: Scale,
}

impl Category {
    pub fn unit(&self, code: &str) -> Option<&'static UnitOption> {
        self.units.iter().find(|unit| unit.code == code)
    }

    /// Factor of `code` against the base unit; `None` for temperatures.
    pub fn factor(&self, code: &str) -> Option<f64> {
        match self.scale {
            Scale::Linear(factors) => factors
                .iter()
                .find(|(unit, _)| *unit == code)
                .map(|(_, factor)| *factor),
            Scale::Temperature => None,
        }
    }

    /// First two units, used as from/to defaults after a category change.
    pub fn default_pair(&self) -> (&'static str, &'static str) {
        let from = self.units.first().map_or("", |unit| unit.code);
        let to = self.units.get(1).map_or(from, |unit| unit.code);
        (from, to)
    }
}

const fn unit(code: &'static str, label: &'static str) -> UnitOption {
    UnitOption { code, label }
}

static CATEGORIES: &[Category] = &[
    Category {
        name: "Area",
        units: &[
            unit("acres", "Acres (ac)"),
            unit("ares", "Ares (a)"),
            unit("hectares", "Hectares (ha)"),
            unit("sq_cm", "Square centimetres (cm²)"),
            unit("sq_ft", "Square feet (ft²)"),
            unit("sq_in", "Square inches (in²)"),
            unit("sq_m", "Square metres (m²)"),
        ],
        scale: Scale::Linear(&[
            ("acres", 4046.86),
            ("ares", 100.0),
            ("hectares", 10_000.0),
            ("sq_cm", 0.0001),
            ("sq_ft", 0.092903),
            ("sq_in", 0.00064516),
            ("sq_m", 1.0),
        ]),
    },
    Category {
        name: "Length",
        units: &[
            unit("mm", "Millimetres (mm)"),
            unit("cm", "Centimetres (cm)"),
            unit("m", "Metres (m)"),
            unit("km", "Kilometres (km)"),
            unit("in", "Inches (in)"),
            unit("ft", "Feet (ft)"),
            unit("yd", "Yards (yd)"),
            unit("mi", "Miles (mi)"),
            unit("NM", "Nautical miles (NM)"),
            unit("mil", "Mils (mil)"),
        ],
        scale: Scale::Linear(&[
            ("mm", 0.001),
            ("cm", 0.01),
            ("m", 1.0),
            ("km", 1000.0),
            ("in", 0.0254),
            ("ft", 0.3048),
            ("yd", 0.9144),
            ("mi", 1609.34),
            ("NM", 1852.0),
            ("mil", 0.0000254),
        ]),
    },
    Category {
        name: TEMPERATURE,
        units: &[
            unit("celsius", "Celsius (°C)"),
            unit("fahrenheit", "Fahrenheit (°F)"),
            unit("kelvin", "Kelvin (K)"),
        ],
        scale: Scale::Temperature,
    },
    Category {
        name: "Volume",
        units: &[
            unit("uk_gallon", "UK gallons (gal)"),
            unit("us_gallon", "US gallons (gal)"),
            unit("litres", "Litres (L)"),
            unit("millilitres", "Millilitres (mL)"),
            unit("cc", "Cubic centimetres (cc)"),
            unit("m3", "Cubic metres (m³)"),
            unit("in3", "Cubic inches (in³)"),
            unit("ft3", "Cubic feet (ft³)"),
        ],
        scale: Scale::Linear(&[
            ("uk_gallon", 4.54609),
            ("us_gallon", 3.78541),
            ("litres", 1.0),
            ("millilitres", 0.001),
            ("cc", 0.001),
            ("m3", 1000.0),
            ("in3", 0.0163871),
            ("ft3", 28.3168),
        ]),
    },
    Category {
        name: "Mass",
        units: &[
            unit("tons", "Tons (t)"),
            unit("uk_ton", "UK tons (t)"),
            unit("us_ton", "US tons (t)"),
            unit("lb", "Pounds (lb)"),
            unit("oz", "Ounces (oz)"),
            unit("kg", "Kilogrammes (kg)"),
            unit("g", "Grams (g)"),
        ],
        scale: Scale::Linear(&[
            ("tons", 1000.0),
            ("uk_ton", 1016.05),
            ("us_ton", 907.185),
            ("lb", 0.453592),
            ("oz", 0.0283495),
            ("kg", 1.0),
            ("g", 0.001),
        ]),
    },
    Category {
        name: "Data",
        units: &[
            unit("bit", "Bits (b)"),
            unit("B", "Bytes (B)"),
            unit("KB", "Kilobytes (KB)"),
            unit("KiB", "Kibibytes (KiB)"),
            unit("MB", "Megabytes (MB)"),
            unit("MiB", "Mebibytes (MiB)"),
            unit("GB", "Gigabytes (GB)"),
            unit("GiB", "Gibibytes (GiB)"),
            unit("TB", "Terabytes (TB)"),
            unit("TiB", "Tebibytes (TiB)"),
        ],
        scale: Scale::Linear(&[
            ("bit", 1.0 / 8.0),
            ("B", 1.0),
            ("KB", 1e3),
            ("KiB", 1024.0),
            ("MB", 1e6),
            ("MiB", 1_048_576.0),
            ("GB", 1e9),
            ("GiB", 1_073_741_824.0),
            ("TB", 1e12),
            ("TiB", 1_099_511_627_776.0),
        ]),
    },
    Category {
        name: "Speed",
        units: &[
            unit("mps", "Metres per second (m/s)"),
            unit("mph", "Miles per hour (mph)"),
            unit("kmps", "Kilometres per second (km/s)"),
            unit("kmph", "Kilometres per hour (km/h)"),
            unit("inps", "Inches per second (in/s)"),
            unit("inph", "Inches per hour (in/h)"),
            unit("ftps", "Feet per second (ft/s)"),
            unit("ftph", "Feet per hour (ft/h)"),
            unit("mips", "Miles per second (mi/s)"),
            unit("mi_h", "Miles per hour (mi/h)"),
            unit("kn", "Knots (kn)"),
        ],
        scale: Scale::Linear(&[
            ("mps", 1.0),
            ("mph", 0.44704),
            ("kmps", 1000.0),
            ("kmph", 0.277778),
            ("inps", 0.0254),
            ("inph", 0.0254 / 3600.0),
            ("ftps", 0.3048),
            ("ftph", 0.3048 / 3600.0),
            ("mips", 1609.34),
            ("mi_h", 0.44704),
            ("kn", 0.514444),
        ]),
    },
    Category {
        name: "Time",
        units: &[
            unit("ms", "Milliseconds (ms)"),
            unit("s", "Seconds (s)"),
            unit("min", "Minutes (min)"),
            unit("h", "Hours (h)"),
            unit("d", "Days (d)"),
            unit("wk", "Weeks (wk)"),
        ],
        scale: Scale::Linear(&[
            ("ms", 0.001),
            ("s", 1.0),
            ("min", 60.0),
            ("h", 3600.0),
            ("d", 86_400.0),
            ("wk", 604_800.0),
        ]),
    },
];

/// All categories in display order.
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

pub fn category(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.name == name)
}

/// Converts `value` from `from_unit` to `to_unit` within `category_name`.
///
/// # Errors
/// - `UnknownCategory` when the category is not in the vocabulary.
/// - `UnknownUnit` when either unit code is not part of the category.
pub fn convert(
    category_name: &str,
    value: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<f64, ConversionError> {
    let category = category(category_name)
        .ok_or_else(|| ConversionError::UnknownCategory(category_name.to_string()))?;

    match category.scale {
        Scale::Temperature => {
            let celsius = to_celsius(category, value, from_unit)?;
            let converted = from_celsius(category, celsius, to_unit)?;
            if from_unit == to_unit {
                return Ok(value);
            }
            Ok(converted)
        }
        Scale::Linear(_) => {
            let factor_from = linear_factor(category, from_unit)?;
            let factor_to = linear_factor(category, to_unit)?;
            Ok(value * factor_from / factor_to)
        }
    }
}

/// Renders `value` with exactly `decimal_points` fractional digits.
///
/// `0` renders an integer string without a decimal point.
pub fn format_fixed(value: f64, decimal_points: i64) -> Result<String, ConversionError> {
    let precision = validate_decimal_points(decimal_points)?;
    Ok(format!("{value:.precision$}"))
}

/// Checks `decimal_points` against `0..=100`.
pub fn validate_decimal_points(decimal_points: i64) -> Result<usize, ConversionError> {
    if !(MIN_DECIMAL_POINTS..=MAX_DECIMAL_POINTS).contains(&decimal_points) {
        return Err(ConversionError::PrecisionOutOfRange(decimal_points));
    }
    usize::try_from(decimal_points).map_err(|_| ConversionError::PrecisionOutOfRange(decimal_points))
}

fn linear_factor(category: &Category, code: &str) -> Result<f64, ConversionError> {
    category
        .factor(code)
        .filter(|factor| *factor != 0.0)
        .ok_or_else(|| unknown_unit(category, code))
}

fn to_celsius(category: &Category, value: f64, from_unit: &str) -> Result<f64, ConversionError> {
    match from_unit {
        "celsius" => Ok(value),
        "fahrenheit" => Ok((value - 32.0) * 5.0 / 9.0),
        "kelvin" => Ok(value - ABSOLUTE_ZERO_OFFSET),
        other => Err(unknown_unit(category, other)),
    }
}

fn from_celsius(category: &Category, celsius: f64, to_unit: &str) -> Result<f64, ConversionError> {
    match to_unit {
        "celsius" => Ok(celsius),
        "fahrenheit" => Ok(celsius * 9.0 / 5.0 + 32.0),
        "kelvin" => Ok(celsius + ABSOLUTE_ZERO_OFFSET),
        other => Err(unknown_unit(category, other)),
    }
}

fn unknown_unit(category: &Category, unit: &str) -> ConversionError {
    ConversionError::UnknownUnit {
        category: category.name.to_string(),
        unit: unit.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_linear_unit_has_a_factor() {
        for category in categories() {
            if let Scale::Linear(factors) = category.scale {
                assert_eq!(category.units.len(), factors.len(), "{}", category.name);
                for unit in category.units {
                    assert!(
                        category.factor(unit.code).is_some(),
                        "{} is missing {}",
                        category.name,
                        unit.code
                    );
                }
            }
        }
    }

    #[test]
    fn every_category_offers_a_default_pair() {
        for category in categories() {
            let (from, to) = category.default_pair();
            assert_ne!(from, to, "{}", category.name);
        }
        assert_eq!(category(DEFAULT_CATEGORY).unwrap().default_pair(), ("mm", "cm"));
    }

    #[test]
    fn unknown_codes_fail_instead_of_passing_through() {
        assert_eq!(
            convert("Length", 5.0, "m", "furlong"),
            Err(ConversionError::UnknownUnit {
                category: "Length".to_string(),
                unit: "furlong".to_string(),
            })
        );
        assert_eq!(
            convert("Length", 5.0, "meters", "feet"),
            Err(ConversionError::UnknownUnit {
                category: "Length".to_string(),
                unit: "meters".to_string(),
            })
        );
        assert_eq!(
            convert("Energy", 5.0, "J", "cal"),
            Err(ConversionError::UnknownCategory("Energy".to_string()))
        );
        assert!(matches!(
            convert(TEMPERATURE, 5.0, "rankine", "rankine"),
            Err(ConversionError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn format_fixed_pads_and_rounds() {
        assert_eq!(format_fixed(3.14159, 2).unwrap(), "3.14");
        assert_eq!(format_fixed(2.0, 3).unwrap(), "2.000");
        assert_eq!(format_fixed(0.3048, 0).unwrap(), "0");
        assert_eq!(format_fixed(12.7, 0).unwrap(), "13");
    }
}
