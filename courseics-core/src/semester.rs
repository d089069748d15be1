//! Semester start dates.
//!
//! The start date is the Monday (or whichever weekday the timetable's first
//! day column is) of teaching week 1.

use chrono::{Datelike, NaiveDate};

use crate::error::{ScheduleError, ScheduleResult};

/// Parse a user-supplied start date. Only `YYYY-MM-DD` is accepted.
pub fn parse_start_date(input: &str) -> ScheduleResult<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScheduleError::MissingStartDate);
    }

    let well_shaped = input.len() == 10
        && input.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(ScheduleError::InvalidStartDate(input.to_string()));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidStartDate(input.to_string()))
}

/// A plausible start date to offer when none has been chosen yet.
///
/// Spring semesters start mid-February, autumn semesters early September;
/// January still belongs to the previous year's autumn semester.
pub fn suggest_start_date(today: NaiveDate) -> NaiveDate {
    let year = today.year();
    let (year, month, day) = match today.month() {
        2..=7 => (year, 2, 17),
        8..=12 => (year, 9, 2),
        _ => (year - 1, 9, 2),
    };
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(today)
}
