//! `bmi`: BMI calculator page.

use anyhow::Result;
use clap::Args;
use utiliverse_core::{AppContext, FormError, ServiceError, UnitSystem};

#[derive(Debug, Args)]
pub struct BmiArgs {
    /// `metric` (kg, cm) or `imperial` (lb, in)
    #[arg(long)]
    unit: Option<String>,

    /// Weight in kilograms or pounds
    #[arg(long)]
    weight: Option<String>,

    /// Height in centimetres or inches
    #[arg(long)]
    height: Option<String>,

    /// Clear weight and height; the unit choice is kept
    #[arg(long, conflicts_with_all = ["weight", "height"])]
    reset: bool,
}

pub fn run(ctx: &AppContext, args: BmiArgs) -> Result<()> {
    let service = ctx.bmi();
    if let Some(raw) = &args.unit {
        let unit = UnitSystem::parse(raw)
            .ok_or_else(|| ServiceError::from(FormError::UnknownUnitSystem(raw.clone())))?;
        service.set_unit(unit)?;
    }
    if args.reset {
        service.reset()?;
        println!("Measurements cleared.");
        return Ok(());
    }
    if let Some(weight) = &args.weight {
        service.set_weight(weight)?;
    }
    if let Some(height) = &args.height {
        service.set_height(height)?;
    }

    let outcome = service.calculate()?;
    println!("BMI:      {}", outcome.display);
    println!("Category: {}", outcome.category);
    Ok(())
}
