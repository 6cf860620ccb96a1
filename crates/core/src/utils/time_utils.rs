use chrono::{Datelike, Months, NaiveDate};

use crate::errors::{Result, ValidationError};

/// Wire format for every calendar date accepted or returned by the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` string into a day-granularity date.
///
/// `field` names the offending input in the validation error.
pub fn parse_calendar_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

/// Parses an optional query-string date, treating empty strings as absent.
pub fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_calendar_date(field, v).map(Some),
    }
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shifts `date` by a signed number of months, clamping to the last valid day.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_calendar_dates() {
        let date = parse_calendar_date("startDate", "2025-03-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn rejects_datetimes_and_garbage() {
        assert!(parse_calendar_date("startDate", "2025-03-01T10:00:00Z").is_err());
        assert!(parse_calendar_date("startDate", "03/01/2025").is_err());
        assert!(parse_calendar_date("startDate", "2025-02-30").is_err());
    }

    #[test]
    fn optional_dates_skip_blank_values() {
        assert_eq!(parse_optional_date("endDate", None).unwrap(), None);
        assert_eq!(parse_optional_date("endDate", Some("  ")).unwrap(), None);
        assert!(parse_optional_date("endDate", Some("nope")).is_err());
    }

    #[test]
    fn shift_months_clamps_to_month_end() {
        let jan31 = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(
            shift_months(jan31, 1),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert_eq!(
            shift_months(jan31, -6),
            NaiveDate::from_ymd_opt(2024, 7, 31).unwrap()
        );
    }
}
