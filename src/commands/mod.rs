pub mod config;
pub mod courses;
pub mod export;

use std::path::Path;

use anyhow::{Context, Result};
use courseics_core::{Course, SlotTimeMap, parse_schedule_html};
use tracing::debug;

/// Default file name for exported calendars
pub const DEFAULT_OUTPUT: &str = "njupt_schedule.ics";

/// Read a saved timetable page and parse its courses.
pub fn load_courses(page: &Path) -> Result<Vec<Course>> {
    let html = std::fs::read_to_string(page)
        .with_context(|| format!("Failed to read {}", page.display()))?;
    let courses = parse_schedule_html(&html);
    debug!(page = %page.display(), count = courses.len(), "Loaded timetable");
    Ok(courses)
}

/// Read a period-time override file, e.g. `{"1": {"s": "0810", "e": "0855"}}`.
pub fn load_slot_times(path: &Path) -> Result<(String, SlotTimeMap)> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let map = SlotTimeMap::from_json(&json)
        .with_context(|| format!("Invalid period times in {}", path.display()))?;
    Ok((json, map))
}
