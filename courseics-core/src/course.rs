//! Course records scraped from the timetable.
//!
//! A `Course` is one scheduled class block: a single cell entry of the grid,
//! repeated on the same weekday across a range of teaching weeks.

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Location used when a cell does not name a classroom.
pub const UNKNOWN_LOCATION: &str = "未知地点";

/// Highest teaching week a course may name.
const MAX_WEEK: u32 = 52;

/// A scheduled class block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub name: String,
    pub teacher: String,
    pub location: String,
    /// Day index relative to the grid's first day column (0 = leftmost)
    pub day: u32,
    /// First teaching week, 1-based and inclusive
    pub start_week: u32,
    /// Last teaching week, inclusive
    pub end_week: u32,
    pub week_type: WeekType,
    /// Class periods occupied by this block, in cell order
    pub slots: Vec<u32>,
}

impl Course {
    /// Check the invariants a record must hold before it is handed out.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.name.trim().is_empty() {
            return Err(ScheduleError::InvalidCourse("empty course name".into()));
        }
        if self.slots.is_empty() {
            return Err(ScheduleError::InvalidCourse(format!(
                "'{}' has no class periods",
                self.name
            )));
        }
        if self.slots.contains(&0) {
            return Err(ScheduleError::InvalidCourse(format!(
                "'{}' has a period numbered 0",
                self.name
            )));
        }
        if self.day > 6 {
            return Err(ScheduleError::InvalidCourse(format!(
                "'{}' has day index {} outside 0-6",
                self.name, self.day
            )));
        }
        if self.start_week > MAX_WEEK || self.end_week > MAX_WEEK {
            return Err(ScheduleError::InvalidCourse(format!(
                "'{}' has weeks {}-{} beyond week {MAX_WEEK}",
                self.name, self.start_week, self.end_week
            )));
        }
        Ok(())
    }

    /// First and last period of the block (the same for single-period blocks).
    pub fn slot_bounds(&self) -> Option<(u32, u32)> {
        Some((*self.slots.first()?, *self.slots.last()?))
    }

    /// Teaching weeks this course actually meets, after odd/even filtering.
    pub fn weeks(&self) -> impl Iterator<Item = u32> + '_ {
        (self.start_week..=self.end_week).filter(|w| self.week_type.includes(*w))
    }
}

/// Restricts a course to odd-numbered, even-numbered, or all weeks of its range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekType {
    #[default]
    All,
    Odd,
    Even,
}

impl WeekType {
    /// Interpret the marker that follows the week range, e.g. `单周` or `双周`.
    pub fn from_marker(marker: &str) -> Self {
        if marker.contains('单') {
            WeekType::Odd
        } else if marker.contains('双') {
            WeekType::Even
        } else {
            WeekType::All
        }
    }

    pub fn includes(self, week: u32) -> bool {
        match self {
            WeekType::All => true,
            WeekType::Odd => week % 2 == 1,
            WeekType::Even => week % 2 == 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeekType::All => "every week",
            WeekType::Odd => "odd weeks",
            WeekType::Even => "even weeks",
        }
    }
}
