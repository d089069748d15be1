//! Extraction of course blocks from a single timetable cell.
//!
//! A cell stacks one or more blocks separated by a blank line, each laid out
//! as:
//!
//! ```text
//! 线性代数
//! {第3-15周 第3,4节}
//! 张老师
//! A101
//! ```
//!
//! The descriptor line (the one in braces) may also sit in other positions,
//! e.g. `周一第1,2节{第1-16周|单周}` directly below the name.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Node};
use tracing::debug;

use crate::course::{Course, UNKNOWN_LOCATION, WeekType};

static RE_BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid block separator regex"));
static RE_WEEKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{.*?(第)?([0-9]+)-([0-9]+)周.*?(\|.*?)?\}").expect("valid week range regex")
});
static RE_SLOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"第([0-9,]+)节").expect("valid period list regex"));

/// Weeks assumed when the descriptor carries no range.
const DEFAULT_WEEKS: (u32, u32) = (1, 16);

/// Flatten a cell's markup to text, turning each `<br>` into a newline.
///
/// Text inside nested elements (`<font>`, `<span>`, ...) is kept and entities
/// are already decoded by the HTML parser.
pub fn cell_text(cell: ElementRef) -> String {
    let mut out = String::new();
    collect_text(cell, &mut out);
    out
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

/// Parse every course block in a cell's text, in top-to-bottom order.
pub fn extract_courses(text: &str, day: u32) -> Vec<Course> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    RE_BLOCK_SEPARATOR
        .split(text)
        .filter_map(|block| parse_block(block, day))
        .collect()
}

fn parse_block(block: &str, day: u32) -> Option<Course> {
    let lines: Vec<&str> = block
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() < 3 {
        debug!(?lines, "Skipping block with fewer than 3 lines");
        return None;
    }

    let name = lines[0];
    let descriptor = lines
        .iter()
        .copied()
        .find(|l| l.contains('{') && l.contains('}'))
        .unwrap_or(lines[1]);

    // Some layouts put the descriptor on line 2 and the teacher on line 1
    let teacher = if lines[2] == descriptor {
        lines[1]
    } else {
        lines[2]
    };
    let location = lines.get(3).copied().unwrap_or(UNKNOWN_LOCATION);

    let (start_week, end_week, week_type) = parse_weeks(descriptor);
    let slots = parse_slots(descriptor);

    let course = Course {
        name: name.to_string(),
        teacher: teacher.to_string(),
        location: location.to_string(),
        day,
        start_week,
        end_week,
        week_type,
        slots,
    };

    match course.validate() {
        Ok(()) => Some(course),
        Err(e) => {
            debug!(descriptor, "Skipping block: {e}");
            None
        }
    }
}

/// Week range and odd/even marker, e.g. `{第1-16周|单周}` gives (1, 16, Odd).
///
/// A range whose bounds do not both fit a week number falls back to the
/// default range as a whole.
fn parse_weeks(descriptor: &str) -> (u32, u32, WeekType) {
    let Some(caps) = RE_WEEKS.captures(descriptor) else {
        return (DEFAULT_WEEKS.0, DEFAULT_WEEKS.1, WeekType::All);
    };

    let week_type = caps
        .get(4)
        .map(|m| WeekType::from_marker(m.as_str().trim_start_matches('|')))
        .unwrap_or(WeekType::All);

    let bound = |i| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    match (bound(2), bound(3)) {
        (Some(start), Some(end)) => (start, end, week_type),
        _ => {
            debug!(descriptor, "Unreadable week range, using default weeks");
            (DEFAULT_WEEKS.0, DEFAULT_WEEKS.1, week_type)
        }
    }
}

/// Period list, e.g. `第3,4节` gives [3, 4].
fn parse_slots(descriptor: &str) -> Vec<u32> {
    RE_SLOTS
        .captures(descriptor)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .split(',')
                .filter_map(|n| n.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_extract_reference_block() {
        let courses = extract_courses("线性代数\n{第3-15周 第3,4节}\n张老师\nA101", 2);
        assert_eq!(courses.len(), 1);

        let course = &courses[0];
        assert_eq!(course.name, "线性代数");
        assert_eq!(course.start_week, 3);
        assert_eq!(course.end_week, 15);
        assert_eq!(course.slots, vec![3, 4]);
        assert_eq!(course.teacher, "张老师");
        assert_eq!(course.location, "A101");
        assert_eq!(course.day, 2);
        assert_eq!(course.week_type, WeekType::All);
    }

    #[test]
    fn test_extract_odd_and_even_markers() {
        let courses = extract_courses(
            "大学物理\n周二第1,2节{第1-16周|单周}\n王老师\n教3-205\n\n物理实验\n周二第1,2节{第2-16周|双周}\n赵老师\n实验楼",
            1,
        );
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].week_type, WeekType::Odd);
        assert_eq!(courses[0].slots, vec![1, 2]);
        assert_eq!(courses[1].name, "物理实验");
        assert_eq!((courses[1].start_week, courses[1].end_week), (2, 16));
        assert_eq!(courses[1].week_type, WeekType::Even);
    }

    #[test]
    fn test_teacher_falls_back_when_descriptor_is_on_line_two() {
        let courses = extract_courses("体育\n刘老师\n{第1-8周 第5节}\n操场", 4);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].teacher, "刘老师");
        assert_eq!(courses[0].slots, vec![5]);
        assert_eq!(courses[0].end_week, 8);
    }

    #[test]
    fn test_missing_location_uses_sentinel() {
        let courses = extract_courses("形势与政策\n{第9-12周 第11,12节}\n陈老师", 0);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].location, UNKNOWN_LOCATION);
    }

    #[test]
    fn test_missing_week_range_uses_defaults() {
        let courses = extract_courses("英语\n第7,8节\n孙老师\nB202", 3);
        assert_eq!(courses.len(), 1);
        assert_eq!((courses[0].start_week, courses[0].end_week), (1, 16));
        assert_eq!(courses[0].week_type, WeekType::All);
        assert_eq!(courses[0].slots, vec![7, 8]);
    }

    #[test]
    fn test_overflowing_week_range_uses_defaults() {
        let courses = extract_courses("英语\n{第1-99999999999周 第1节}\n孙老师\nB202", 0);
        assert_eq!(courses.len(), 1);
        assert_eq!((courses[0].start_week, courses[0].end_week), (1, 16));

        // One readable bound is not mixed with a default for the other
        let courses = extract_courses("英语\n{第20-99999999999周|单周 第1节}\n孙老师\nB202", 0);
        assert_eq!((courses[0].start_week, courses[0].end_week), (1, 16));
        assert_eq!(courses[0].week_type, WeekType::Odd);
    }

    #[test]
    fn test_week_range_beyond_a_year_is_skipped() {
        assert!(extract_courses("x\n{第1-4000000000周 第1节}\nt\nl", 0).is_empty());
        assert!(extract_courses("x\n{第60-70周 第1节}\nt\nl", 0).is_empty());
    }

    #[test]
    fn test_malformed_blocks_are_skipped() {
        // Too few lines, then no period list, then a good block
        let text = "只有名字\n一行\n\n无节次\n{第1-16周}\n周老师\n\n数据结构\n{第1-16周 第9,10节}\n吴老师\nC303";
        let courses = extract_courses(text, 5);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "数据结构");
    }

    #[test]
    fn test_blank_cell_yields_nothing() {
        assert!(extract_courses("", 0).is_empty());
        assert!(extract_courses("\u{a0}", 0).is_empty());
        assert!(extract_courses(" \n \n", 0).is_empty());
    }

    #[test]
    fn test_cell_text_converts_br_and_nested_markup() {
        let html = Html::parse_fragment(
            "<table><tr><td>线性代数<br>{第3-15周 第3,4节}<br/><font>张老师</font><br>A&amp;B101<br><br>体育</td></tr></table>",
        );
        let selector = Selector::parse("td").unwrap();
        let cell = html.select(&selector).next().unwrap();

        assert_eq!(
            cell_text(cell),
            "线性代数\n{第3-15周 第3,4节}\n张老师\nA&B101\n\n体育"
        );
    }
}
