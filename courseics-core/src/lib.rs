//! Core library for courseics.
//!
//! Turns a scraped academic-affairs timetable page into an iCalendar document:
//! - `parser` reconstructs the merged-cell timetable grid into `Course` records
//! - `ics` expands each course across its teaching weeks and writes the `.ics` text
//! - `slot_time` maps class periods to clock times, with optional user overrides

pub mod config;
pub mod course;
pub mod error;
pub mod ics;
pub mod occurrence;
pub mod parser;
pub mod semester;
pub mod slot_time;

pub use config::ExportConfig;
pub use course::{Course, WeekType, UNKNOWN_LOCATION};
pub use error::{ScheduleError, ScheduleResult};
pub use ics::{generate_ics, generate_ics_at};
pub use parser::{parse_schedule, parse_schedule_html};
pub use slot_time::{SlotTime, SlotTimeMap};
