//! Expansion of courses into dated class meetings.

use chrono::{Days, NaiveDate};

use crate::course::Course;
use crate::slot_time::{self, SlotTimeMap};

/// One concrete class meeting of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub course: &'a Course,
    pub week: u32,
    pub date: NaiveDate,
    /// `HHmm` start of the first period
    pub start_time: String,
    /// `HHmm` end of the last period
    pub end_time: String,
}

/// Date of `day` in teaching week `week`, counting from the semester start.
///
/// `semester_start` is day 0 of week 1. Returns `None` only when the result
/// falls outside chrono's date range.
pub fn meeting_date(semester_start: NaiveDate, week: u32, day: u32) -> Option<NaiveDate> {
    let offset = i64::from(week) * 7 - 7 + i64::from(day);
    if offset >= 0 {
        semester_start.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        semester_start.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// Expand a course into one occurrence per week it meets.
///
/// Weeks are filtered by the course's odd/even marker; clock times come from
/// `overrides`, then the built-in schedule.
pub fn expand_course<'a>(
    course: &'a Course,
    semester_start: NaiveDate,
    overrides: Option<&SlotTimeMap>,
) -> Vec<Occurrence<'a>> {
    let Some((first_slot, last_slot)) = course.slot_bounds() else {
        return Vec::new();
    };
    let start_time = slot_time::start_time(first_slot, overrides);
    let end_time = slot_time::end_time(last_slot, overrides);

    course
        .weeks()
        .filter_map(|week| {
            let date = meeting_date(semester_start, week, course.day)?;
            Some(Occurrence {
                course,
                week,
                date,
                start_time: start_time.clone(),
                end_time: end_time.clone(),
            })
        })
        .collect()
}
