//! `convert` and `units`: unit converter page.

use anyhow::Result;
use clap::Args;
use utiliverse_core::tools::units::{self, DEFAULT_DECIMAL_POINTS};
use utiliverse_core::{AppContext, FormError, ServiceError};

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Category, e.g. Length or Temperature; resets units and value
    #[arg(long)]
    category: Option<String>,

    /// Source unit code
    #[arg(long = "from", value_name = "UNIT")]
    from_unit: Option<String>,

    /// Target unit code
    #[arg(long = "to", value_name = "UNIT")]
    to_unit: Option<String>,

    /// Value to convert
    #[arg(long, allow_hyphen_values = true)]
    value: Option<String>,

    /// Decimal places in the result (0 to 100)
    #[arg(long, allow_negative_numbers = true)]
    precision: Option<i64>,

    /// Exchange source and target units before converting
    #[arg(long)]
    swap: bool,
}

pub fn run(ctx: &AppContext, args: ConvertArgs) -> Result<()> {
    let service = ctx.converter();
    if let Some(category) = &args.category {
        service.set_category(category.trim())?;
    }
    if let Some(from) = &args.from_unit {
        service.set_from_unit(from.trim())?;
    }
    if let Some(to) = &args.to_unit {
        service.set_to_unit(to.trim())?;
    }
    if args.swap {
        service.swap()?;
    }
    if let Some(value) = &args.value {
        service.set_input_value(value)?;
    }
    if let Some(precision) = args.precision {
        service.set_decimal_points(precision)?;
    }

    let outcome = service.convert()?;
    let form = service.load_form()?;
    let from_label = units::category(&form.category)
        .and_then(|category| category.unit(&form.from_unit))
        .map_or(form.from_unit.as_str(), |unit| unit.label);
    println!(
        "{} {} = {} {}",
        form.input_value, from_label, outcome.formatted, outcome.unit_label
    );
    Ok(())
}

/// Lists categories, or the units of one category.
pub fn list_units(category: Option<&str>) -> Result<()> {
    let Some(name) = category else {
        for category in units::categories() {
            let (from, to) = category.default_pair();
            println!("{:<12} {} units (default {from} -> {to})", category.name, category.units.len());
        }
        println!();
        println!("default precision: {DEFAULT_DECIMAL_POINTS} decimal places");
        return Ok(());
    };

    let category = units::category(name.trim())
        .ok_or_else(|| ServiceError::from(FormError::UnknownCategory(name.to_string())))?;
    for unit in category.units {
        println!("{:<12} {}", unit.code, unit.label);
    }
    Ok(())
}
