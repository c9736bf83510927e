//! Store key conventions.
//!
//! Tool pages use `tool_<tool>_<field>`; the unit converter keeps its own
//! `unitConverter_<field>` namespace, which the cache-clear action leaves alone.

/// Namespace removed by [`super::clear_cache`].
pub const TOOL_KEY_PREFIX: &str = "tool_";
pub const CONVERTER_KEY_PREFIX: &str = "unitConverter_";

pub const AGE_BIRTH_DATE: &str = "tool_age_calculator_input";

pub const BMI_UNIT: &str = "tool_bmi_unit";
pub const BMI_WEIGHT: &str = "tool_bmi_weight";
pub const BMI_HEIGHT: &str = "tool_bmi_height";

pub const QR_INPUT: &str = "tool_qrcode_input";

pub const CONVERTER_CATEGORY: &str = "unitConverter_conversionType";
pub const CONVERTER_FROM_UNIT: &str = "unitConverter_fromUnit";
pub const CONVERTER_TO_UNIT: &str = "unitConverter_toUnit";
pub const CONVERTER_INPUT_VALUE: &str = "unitConverter_inputValue";
pub const CONVERTER_DECIMAL_POINTS: &str = "unitConverter_decimalPoints";

/// Builds a `tool_<tool>_<field>` key.
pub fn tool_key(tool: &str, field: &str) -> String {
    format!("{TOOL_KEY_PREFIX}{tool}_{field}")
}

/// Builds a `unitConverter_<field>` key.
pub fn converter_key(field: &str) -> String {
    format!("{CONVERTER_KEY_PREFIX}{field}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_match_fixed_keys() {
        assert_eq!(tool_key("bmi", "weight"), BMI_WEIGHT);
        assert_eq!(tool_key("age_calculator", "input"), AGE_BIRTH_DATE);
        assert_eq!(tool_key("qrcode", "input"), QR_INPUT);
        assert_eq!(converter_key("decimalPoints"), CONVERTER_DECIMAL_POINTS);
    }

    #[test]
    fn converter_keys_are_outside_tool_namespace() {
        for key in [
            CONVERTER_CATEGORY,
            CONVERTER_FROM_UNIT,
            CONVERTER_TO_UNIT,
            CONVERTER_INPUT_VALUE,
            CONVERTER_DECIMAL_POINTS,
        ] {
            assert!(!key.starts_with(TOOL_KEY_PREFIX));
        }
    }
}
