//! Timetable page parsing.
//!
//! The academic-affairs timetable is a `<table id="Table1">` whose first two
//! columns are labels (morning/afternoon, `第N节`) and whose remaining seven
//! columns are days. Courses spanning several periods use `rowspan`, so the
//! physical cell order of a row does not match its logical columns. The
//! parser replays the spans on an occupancy grid to recover which column
//! each physical cell belongs to.

mod cell;
mod grid;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::course::Course;
use cell::{cell_text, extract_courses};
use grid::{COLUMNS, FIRST_DAY_COLUMN, OccupancyGrid, parse_span};

/// Text marking the row of the first class period.
const FIRST_PERIOD_MARKER: &str = "第1节";

/// Parse raw timetable HTML.
pub fn parse_schedule_html(html: &str) -> Vec<Course> {
    parse_schedule(&Html::parse_document(html))
}

/// Extract all courses from a timetable document.
///
/// Courses come out row by row, left to right, and top to bottom within a
/// cell. A page without the timetable (or without its first-period row)
/// yields no courses.
pub fn parse_schedule(document: &Html) -> Vec<Course> {
    let (Ok(table_selector), Ok(row_selector)) =
        (Selector::parse("#Table1"), Selector::parse("tr"))
    else {
        return Vec::new();
    };

    let Some(table) = document.select(&table_selector).next() else {
        debug!("No timetable found on page");
        return Vec::new();
    };

    let rows: Vec<ElementRef> = table.select(&row_selector).collect();
    let Some(start_row) = rows
        .iter()
        .position(|row| row.text().collect::<String>().contains(FIRST_PERIOD_MARKER))
    else {
        debug!("Timetable has no first-period row");
        return Vec::new();
    };

    let data_rows = &rows[start_row..];
    let mut grid = OccupancyGrid::new(data_rows.len());
    let mut courses = Vec::new();

    for (logical_row, row) in data_rows.iter().enumerate() {
        let cells = direct_cells(row);
        let mut next_cell = cells.iter();

        for col in 0..COLUMNS {
            if grid.is_occupied(logical_row, col) {
                continue;
            }

            let Some(cell) = next_cell.next() else {
                break;
            };

            let row_span = parse_span(cell.value().attr("rowspan"));
            let col_span = parse_span(cell.value().attr("colspan"));
            grid.occupy(logical_row, col, row_span, col_span);

            if col >= FIRST_DAY_COLUMN {
                let day = (col - FIRST_DAY_COLUMN) as u32;
                courses.extend(extract_courses(&cell_text(*cell), day));
            }
        }
    }

    debug!(count = courses.len(), "Parsed timetable");
    courses
}

/// The `<td>`/`<th>` children of a row, excluding cells of nested tables.
fn direct_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
        .collect()
}
