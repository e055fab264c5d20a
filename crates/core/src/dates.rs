use chrono::{Datelike, Duration, NaiveDate};

/// First calendar day of the month containing `today`.
pub fn effective_date_for(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap()
}

/// Expiration of a 12-month term: a flat 365-day span counted inclusive of
/// the effective day, so exactly 364 days after it. This is NOT a calendar
/// "+12 months" — across a leap day it lands a day short of the same date
/// next year.
pub fn expiration_date_for(effective: NaiveDate) -> NaiveDate {
    effective + Duration::days(365) - Duration::days(1)
}
