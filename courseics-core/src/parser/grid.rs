//! Occupancy tracking for merged timetable cells.

/// Minimum number of logical rows tracked; enough for twelve periods plus
/// the separator rows some timetables insert between morning and afternoon.
pub const MIN_ROWS: usize = 15;

/// Logical columns: two label columns followed by seven day columns.
pub const COLUMNS: usize = 9;

/// First logical column that holds course data.
pub const FIRST_DAY_COLUMN: usize = 2;

/// Which logical grid positions are already covered by an earlier cell's
/// `rowspan`/`colspan`.
///
/// Positions outside the grid are treated as free and marking them is a
/// no-op, so oversized spans at the bottom or right edge are harmless.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    cells: Vec<[bool; COLUMNS]>,
}

impl OccupancyGrid {
    /// A grid with at least `MIN_ROWS` rows.
    pub fn new(rows: usize) -> Self {
        OccupancyGrid {
            cells: vec![[false; COLUMNS]; rows.max(MIN_ROWS)],
        }
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Mark the block covered by a cell anchored at (`row`, `col`).
    pub fn occupy(&mut self, row: usize, col: usize, row_span: usize, col_span: usize) {
        for r in row..row.saturating_add(row_span) {
            let Some(cells) = self.cells.get_mut(r) else {
                break;
            };
            for c in col..col.saturating_add(col_span).min(COLUMNS) {
                cells[c] = true;
            }
        }
    }
}

/// Read a `rowspan`/`colspan` attribute value.
///
/// Leading digits are used (`"2;"` is 2); missing, non-numeric or zero
/// values count as a span of 1.
pub fn parse_span(value: Option<&str>) -> usize {
    value
        .map(str::trim)
        .map(|v| v.chars().take_while(char::is_ascii_digit).collect::<String>())
        .and_then(|digits| digits.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}
