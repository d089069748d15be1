//! Error types for courseics.

use thiserror::Error;

/// Errors that can occur while parsing timetables or generating calendars.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Missing semester start date")]
    MissingStartDate,

    #[error("Invalid semester start date '{0}'. Expected YYYY-MM-DD")]
    InvalidStartDate(String),

    #[error("Invalid course: {0}")]
    InvalidCourse(String),

    #[error("Invalid slot times: {0}")]
    InvalidSlotTimes(String),
}

/// Result type alias for courseics operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
