//! Age calculator.
//!
//! # Responsibility
//! - Break the span between two dates into calendar years, months and days.
//! - Derive elapsed days, days to the next birthday and the zodiac sign.
//!
//! # Invariants
//! - Subtraction is calendar-field based: day borrow first, then month borrow.
//! - A day borrow adds the length of the month preceding the as-of month.
//! - A birthday falling on the as-of date is `0` days away.
//! - A Feb 29 birthday is celebrated on Mar 1 in non-leap years.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MINUTES_PER_DAY: i64 = 24 * 60;
const DOG_YEARS_PER_YEAR: u32 = 7;
const PROJECTION_YEARS: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeError {
    InvalidDate(String),
    BirthAfterAsOf { birth: NaiveDate, as_of: NaiveDate },
}

impl Display for AgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(raw) => write!(f, "invalid date `{raw}`, expected YYYY-MM-DD"),
            Self::BirthAfterAsOf { birth, as_of } => {
                write!(f, "birth date {birth} is after {as_of}")
            }
        }
    }
}

impl Error for AgeError {}

/// Calendar span in whole years, months and days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Display for AgeBreakdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days",
            self.years, self.months, self.days
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZodiacSign {
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
}

/// `(sign, (start month, start day), (end month, end day))`, both ends inclusive.
const ZODIAC_RANGES: &[(ZodiacSign, (u32, u32), (u32, u32))] = &[
    (ZodiacSign::Aquarius, (1, 20), (2, 18)),
    (ZodiacSign::Pisces, (2, 19), (3, 20)),
    (ZodiacSign::Aries, (3, 21), (4, 19)),
    (ZodiacSign::Taurus, (4, 20), (5, 20)),
    (ZodiacSign::Gemini, (5, 21), (6, 20)),
    (ZodiacSign::Cancer, (6, 21), (7, 22)),
    (ZodiacSign::Leo, (7, 23), (8, 22)),
    (ZodiacSign::Virgo, (8, 23), (9, 22)),
    (ZodiacSign::Libra, (9, 23), (10, 22)),
    (ZodiacSign::Scorpio, (10, 23), (11, 21)),
    (ZodiacSign::Sagittarius, (11, 22), (12, 21)),
    (ZodiacSign::Capricorn, (12, 22), (1, 19)),
];

impl ZodiacSign {
    /// Sign for a birth date's month and day.
    pub fn for_date(date: NaiveDate) -> Self {
        let key = (date.month(), date.day());
        ZODIAC_RANGES
            .iter()
            .find(|(_, start, end)| {
                if start <= end {
                    *start <= key && key <= *end
                } else {
                    key >= *start || key <= *end
                }
            })
            .map_or(Self::Capricorn, |(sign, _, _)| *sign)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
        }
    }
}

impl Display for ZodiacSign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Side facts shown under the main result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeFacts {
    pub total_weeks: i64,
    pub total_minutes: i64,
    pub dog_years: u32,
    /// Days lived by the as-of date plus ten years.
    pub days_lived_in_ten_years: i64,
}

/// Everything the age page renders after a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeReport {
    pub age: AgeBreakdown,
    pub total_days: i64,
    pub days_until_birthday: i64,
    pub zodiac: ZodiacSign,
    pub facts: AgeFacts,
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AgeError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AgeError::InvalidDate(raw.to_string()))
}

/// Calendar difference between `birth` and `as_of`.
///
/// # Errors
/// - `BirthAfterAsOf` when `as_of` is earlier than `birth`.
pub fn age_between(birth: NaiveDate, as_of: NaiveDate) -> Result<AgeBreakdown, AgeError> {
    if as_of < birth {
        return Err(AgeError::BirthAfterAsOf { birth, as_of });
    }

    let mut years = as_of.year() - birth.year();
    let mut months = as_of.month() as i32 - birth.month() as i32;
    let mut days = as_of.day() as i32 - birth.day() as i32;

    // A single borrow can leave `days` negative after a short month
    // (e.g. Jan 31 -> Mar 1); keep borrowing from earlier months.
    let mut borrow_month = as_of;
    while days < 0 {
        months -= 1;
        borrow_month = last_day_of_previous_month(borrow_month);
        days += borrow_month.day() as i32;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    Ok(AgeBreakdown {
        years: years.unsigned_abs(),
        months: months.unsigned_abs(),
        days: days.unsigned_abs(),
    })
}

/// Age on a later date; `None` unless `future` is after `birth`.
pub fn future_age_between(birth: NaiveDate, future: NaiveDate) -> Option<AgeBreakdown> {
    if future <= birth {
        return None;
    }
    age_between(birth, future).ok()
}

/// Whole days elapsed between the two dates.
pub fn total_days(birth: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - birth).num_days()
}

/// Days until the next birthday; `0` when the birthday is `as_of`.
pub fn days_until_next_birthday(birth: NaiveDate, as_of: NaiveDate) -> i64 {
    let mut next = anniversary(birth, as_of.year());
    if next < as_of {
        next = anniversary(birth, as_of.year() + 1);
    }
    (next - as_of).num_days()
}

/// Full report for the age page.
pub fn age_report(birth: NaiveDate, as_of: NaiveDate) -> Result<AgeReport, AgeError> {
    let age = age_between(birth, as_of)?;
    let total_days = total_days(birth, as_of);
    let in_ten_years = anniversary(as_of, as_of.year() + PROJECTION_YEARS);

    Ok(AgeReport {
        age,
        total_days,
        days_until_birthday: days_until_next_birthday(birth, as_of),
        zodiac: ZodiacSign::for_date(birth),
        facts: AgeFacts {
            total_weeks: total_days / 7,
            total_minutes: total_days * MINUTES_PER_DAY,
            dog_years: age.years * DOG_YEARS_PER_YEAR,
            days_lived_in_ten_years: (in_ten_years - birth).num_days(),
        },
    })
}

/// Same month and day in `year`; Feb 29 rolls over to Mar 1 in common years.
fn anniversary(birth: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(NaiveDate::MAX)
}

fn last_day_of_previous_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

    #[test]
    fn zodiac_boundaries_are_inclusive() {
        assert_eq!(ZodiacSign::for_date(date("1990-01-19")), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::for_date(date("1990-01-20")), ZodiacSign::Aquarius);
        assert_eq!(ZodiacSign::for_date(date("1990-02-18")), ZodiacSign::Aquarius);
        assert_eq!(ZodiacSign::for_date(date("1992-02-29")), ZodiacSign::Pisces);
        assert_eq!(ZodiacSign::for_date(date("1990-07-22")), ZodiacSign::Cancer);
        assert_eq!(ZodiacSign::for_date(date("1990-07-23")), ZodiacSign::Leo);
        assert_eq!(ZodiacSign::for_date(date("1990-11-21")), ZodiacSign::Scorpio);
        assert_eq!(ZodiacSign::for_date(date("1990-12-21")), ZodiacSign::Sagittarius);
        assert_eq!(ZodiacSign::for_date(date("1990-12-22")), ZodiacSign::Capricorn);
        assert_eq!(ZodiacSign::for_date(date("1990-12-31")), ZodiacSign::Capricorn);
    }

    #[test]
    fn previous_month_length_tracks_leap_years() {
        assert_eq!(last_day_of_previous_month(date("2024-03-10")).day(), 29);
        assert_eq!(last_day_of_previous_month(date("2023-03-10")).day(), 28);
        assert_eq!(last_day_of_previous_month(date("2023-01-05")), date("2022-12-31"));
    }

    #[test]
    fn ten_year_projection_rolls_leap_day_forward() {
        let report = age_report(date("2000-01-01"), date("2024-02-29")).unwrap();
        let expected = (date("2034-03-01") - date("2000-01-01")).num_days();
        assert_eq!(report.facts.days_lived_in_ten_years, expected);

        let report = age_report(date("2000-01-01"), date("2024-05-15")).unwrap();
        let expected = (date("2034-05-15") - date("2000-01-01")).num_days();
        assert_eq!(report.facts.days_lived_in_ten_years, expected);
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("01/02/2000").is_err());
        assert!(parse_date("2001-02-29").is_err());
        assert_eq!(parse_date(" 2000-02-29 ").unwrap(), date("2000-02-29"));
    }
}
