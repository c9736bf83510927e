//! `age`: age calculator page.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use utiliverse_core::tools::age::parse_date;
use utiliverse_core::{AppContext, FormError, ServiceError};

#[derive(Debug, Args)]
pub struct AgeArgs {
    /// Birth date (YYYY-MM-DD); remembered for later runs
    #[arg(long, value_name = "DATE")]
    birth: Option<String>,

    /// Calculate as of this date instead of today
    #[arg(long, value_name = "DATE")]
    as_of: Option<String>,

    /// Also show the age reached on this later date
    #[arg(long, value_name = "DATE")]
    future: Option<String>,

    /// Forget the remembered birth date
    #[arg(long, conflicts_with_all = ["birth", "as_of", "future"])]
    reset: bool,
}

pub fn run(ctx: &AppContext, args: AgeArgs) -> Result<()> {
    let service = ctx.age();
    if args.reset {
        service.reset()?;
        println!("Birth date cleared.");
        return Ok(());
    }

    if let Some(birth) = &args.birth {
        service.set_birth_date(birth)?;
    }
    let as_of = match &args.as_of {
        Some(raw) => parse_date(raw).map_err(|_| ServiceError::from(FormError::InvalidDate))?,
        None => today(),
    };

    let report = service.calculate(as_of)?;
    println!("Age:            {}", report.age);
    println!("Days lived:     {}", report.total_days);
    match report.days_until_birthday {
        0 => println!("Next birthday:  today, happy birthday!"),
        days => println!("Next birthday:  in {days} days"),
    }
    println!("Zodiac sign:    {}", report.zodiac);
    println!();
    println!("Weeks lived:    {}", report.facts.total_weeks);
    println!("Minutes lived:  {}", report.facts.total_minutes);
    println!("Dog years:      {}", report.facts.dog_years);
    println!("Days lived in ten years: {}", report.facts.days_lived_in_ten_years);

    if let Some(future) = &args.future {
        let age = service.future_age(future, as_of)?;
        println!();
        println!("On {}: {age}", future.trim());
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
