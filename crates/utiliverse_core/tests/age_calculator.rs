use chrono::NaiveDate;
use utiliverse_core::tools::age::{
    age_between, age_report, days_until_next_birthday, future_age_between, parse_date, total_days,
    AgeBreakdown,
};
use utiliverse_core::{AppContext, FormError, ZodiacSign};

fn date(raw: &str) -> NaiveDate {
    parse_date(raw).unwrap()
}

fn breakdown(years: u32, months: u32, days: u32) -> AgeBreakdown {
    AgeBreakdown {
        years,
        months,
        days,
    }
}

#[test]
fn leap_day_birth_reaches_whole_years_on_march_first() {
    let age = age_between(date("2000-02-29"), date("2021-03-01")).unwrap();
    assert_eq!(age, breakdown(21, 0, 0));
}

#[test]
fn day_borrow_crosses_short_february() {
    let age = age_between(date("2021-01-31"), date("2021-03-01")).unwrap();
    assert_eq!(age, breakdown(0, 0, 29));
    assert_eq!(total_days(date("2021-01-31"), date("2021-03-01")), 29);
}

#[test]
fn day_before_birthday_borrows_a_month_and_a_year() {
    let age = age_between(date("1990-05-16"), date("2024-05-15")).unwrap();
    assert_eq!(age, breakdown(33, 11, 29));
    assert_eq!(days_until_next_birthday(date("1990-05-16"), date("2024-05-15")), 1);
}

#[test]
fn birthday_today_is_zero_days_away() {
    let birth = date("1990-05-15");
    let as_of = date("2024-05-15");
    assert_eq!(age_between(birth, as_of).unwrap(), breakdown(34, 0, 0));
    assert_eq!(days_until_next_birthday(birth, as_of), 0);
}

#[test]
fn leap_day_birthday_is_celebrated_on_march_first() {
    let birth = date("2000-02-29");
    assert_eq!(days_until_next_birthday(birth, date("2023-02-28")), 1);
    assert_eq!(days_until_next_birthday(birth, date("2023-03-01")), 0);
    assert_eq!(days_until_next_birthday(birth, date("2023-03-02")), 364);
    assert_eq!(days_until_next_birthday(birth, date("2024-02-29")), 0);
}

#[test]
fn as_of_before_birth_is_an_error() {
    assert!(age_between(date("2020-01-02"), date("2020-01-01")).is_err());
}

#[test]
fn future_age_requires_a_later_date() {
    let birth = date("1990-05-15");
    assert_eq!(future_age_between(birth, birth), None);
    assert_eq!(future_age_between(birth, date("1989-01-01")), None);
    assert_eq!(
        future_age_between(birth, date("2050-05-15")),
        Some(breakdown(60, 0, 0))
    );
}

#[test]
fn report_derives_facts_from_elapsed_days() {
    let report = age_report(date("2000-01-01"), date("2010-01-01")).unwrap();
    assert_eq!(report.age, breakdown(10, 0, 0));
    assert_eq!(report.total_days, 3653);
    assert_eq!(report.days_until_birthday, 0);
    assert_eq!(report.zodiac, ZodiacSign::Capricorn);
    assert_eq!(report.facts.total_weeks, 521);
    assert_eq!(report.facts.total_minutes, 3653 * 1440);
    assert_eq!(report.facts.dog_years, 70);
    assert_eq!(report.facts.days_lived_in_ten_years, 7305);
}

#[test]
fn dates_must_be_iso_formatted() {
    assert!(parse_date("15/05/1990").is_err());
    assert!(parse_date("1990-02-30").is_err());
    assert_eq!(parse_date(" 1990-05-15 ").unwrap(), date("1990-05-15"));
}

#[test]
fn service_reports_form_messages() {
    let ctx = AppContext::open_in_memory().unwrap();
    let age = ctx.age();
    let today = date("2024-05-15");

    let err = age.calculate(today).unwrap_err();
    assert_eq!(err.as_form(), Some(&FormError::MissingBirthDate));
    assert_eq!(err.to_string(), "Please enter your birth date.");

    age.set_birth_date("15/05/1990").unwrap();
    let err = age.calculate(today).unwrap_err();
    assert_eq!(err.to_string(), "Please enter a valid date (YYYY-MM-DD).");

    age.set_birth_date("2024-05-16").unwrap();
    let err = age.calculate(today).unwrap_err();
    assert_eq!(err.as_form(), Some(&FormError::BirthInFuture));
}

#[test]
fn service_calculates_from_remembered_birth_date() {
    let ctx = AppContext::open_in_memory().unwrap();
    ctx.age().set_birth_date(" 1990-05-15 ").unwrap();
    assert_eq!(ctx.age().birth_date().unwrap(), "1990-05-15");

    let report = ctx.age().calculate(date("2024-05-15")).unwrap();
    assert_eq!(report.age, breakdown(34, 0, 0));
    assert_eq!(report.zodiac, ZodiacSign::Taurus);
}

#[test]
fn service_future_age_validates_the_future_date() {
    let ctx = AppContext::open_in_memory().unwrap();
    let age = ctx.age();
    let today = date("2024-05-15");
    age.set_birth_date("1990-05-15").unwrap();

    let err = age.future_age("", today).unwrap_err();
    assert_eq!(err.as_form(), Some(&FormError::MissingFutureDate));

    let err = age.future_age("1980-01-01", today).unwrap_err();
    assert_eq!(err.as_form(), Some(&FormError::FutureBeforeBirth));

    let err = age.future_age("next year", today).unwrap_err();
    assert_eq!(err.as_form(), Some(&FormError::InvalidDate));

    assert_eq!(
        age.future_age("2030-11-15", today).unwrap(),
        breakdown(40, 6, 0)
    );
}

#[test]
fn reset_forgets_the_birth_date() {
    let ctx = AppContext::open_in_memory().unwrap();
    ctx.age().set_birth_date("1990-05-15").unwrap();
    ctx.age().reset().unwrap();
    assert_eq!(ctx.age().birth_date().unwrap(), "");
}
