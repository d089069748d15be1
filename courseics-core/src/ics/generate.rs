//! Calendar document generation.

use chrono::{DateTime, NaiveDate, Utc};
use icalendar::{Calendar, Component, EventLike, Property};
use tracing::{info, warn};
use uuid::Uuid;

use crate::course::Course;
use crate::error::ScheduleResult;
use crate::occurrence::{Occurrence, expand_course};
use crate::semester::parse_start_date;
use crate::slot_time::SlotTimeMap;

/// Time zone all class times are written in.
const TIMEZONE_ID: &str = "Asia/Shanghai";

const PRODUCT_ID: &str = "-//NJUPT//Course Schedule//CN";
const UID_DOMAIN: &str = "njupt.edu.cn";

/// Generate the .ics document for a timetable.
///
/// `semester_start` is the `YYYY-MM-DD` date of day 0 in week 1. When
/// `overrides` is given it replaces the built-in period times entirely.
pub fn generate_ics(
    courses: &[Course],
    semester_start: &str,
    overrides: Option<&SlotTimeMap>,
) -> ScheduleResult<String> {
    generate_ics_at(courses, semester_start, overrides, Utc::now())
}

/// Like [`generate_ics`], stamping every event with `now` as its `DTSTAMP`.
pub fn generate_ics_at(
    courses: &[Course],
    semester_start: &str,
    overrides: Option<&SlotTimeMap>,
    now: DateTime<Utc>,
) -> ScheduleResult<String> {
    let start = parse_start_date(semester_start)?;
    let dtstamp = now.format("%Y%m%dT%H%M%SZ").to_string();

    let mut cal = Calendar::new();
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.append_property(Property::new("X-WR-TIMEZONE", TIMEZONE_ID));

    let mut event_count = 0;
    for course in courses {
        if let Err(e) = course.validate() {
            warn!("Skipping course: {e}");
            continue;
        }
        for occurrence in expand_course(course, start, overrides) {
            cal.push(build_event(&occurrence, &dtstamp));
            event_count += 1;
        }
    }
    let cal = cal.done();

    info!(
        courses = courses.len(),
        events = event_count,
        semester_start = %start,
        "Generated calendar"
    );
    Ok(finish_calendar(&cal.to_string()))
}

fn build_event(occurrence: &Occurrence, dtstamp: &str) -> icalendar::Event {
    let course = occurrence.course;

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event_uid());
    ics_event.add_property("DTSTAMP", dtstamp);
    add_local_time(
        &mut ics_event,
        "DTSTART",
        occurrence.date,
        &occurrence.start_time,
    );
    add_local_time(&mut ics_event, "DTEND", occurrence.date, &occurrence.end_time);
    ics_event.summary(&plain_text(&course.name));
    ics_event.description(&format!(
        "第{}周 {}",
        occurrence.week,
        plain_text(&course.teacher)
    ));
    ics_event.location(&plain_text(&course.location));

    ics_event.done()
}

/// Datetime property in class-local time: `NAME;TZID=Asia/Shanghai:YYYYMMDDTHHmm00`
fn add_local_time(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate, clock: &str) {
    let mut prop = Property::new(name, format!("{}T{clock}00", date.format("%Y%m%d")));
    prop.add_parameter("TZID", TIMEZONE_ID);
    ics_event.append_property(prop);
}

/// Scraped text may carry CRLF line breaks; keep only the LF for escaping.
fn plain_text(value: &str) -> String {
    value.replace('\r', "")
}

/// Unique per event: UUIDv7 combines a millisecond timestamp with random bits.
fn event_uid() -> String {
    format!("{}@{UID_DOMAIN}", Uuid::now_v7())
}

/// Post-process the icalendar crate's output
/// - Replace PRODID with ours
/// - Declare the fixed UTC+8 VTIMEZONE ahead of the first event, so clients
///   that do not know the IANA zone still place events correctly
fn finish_calendar(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + 256);
    let mut timezone_written = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(&format!("PRODID:{PRODUCT_ID}\r\n"));
            continue;
        }

        if !timezone_written && (line == "BEGIN:VEVENT" || line == "END:VCALENDAR") {
            for tz_line in vtimezone_lines() {
                result.push_str(&tz_line);
                result.push_str("\r\n");
            }
            timezone_written = true;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn vtimezone_lines() -> [String; 10] {
    [
        "BEGIN:VTIMEZONE".to_string(),
        format!("TZID:{TIMEZONE_ID}"),
        format!("X-LIC-LOCATION:{TIMEZONE_ID}"),
        "BEGIN:STANDARD".to_string(),
        "TZOFFSETFROM:+0800".to_string(),
        "TZOFFSETTO:+0800".to_string(),
        "TZNAME:CST".to_string(),
        "DTSTART:19700101T000000".to_string(),
        "END:STANDARD".to_string(),
        "END:VTIMEZONE".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::WeekType;
    use crate::error::ScheduleError;
    use chrono::TimeZone;
    use icalendar::parser::{read_calendar, unfold};

    fn make_course(name: &str) -> Course {
        Course {
            name: name.to_string(),
            teacher: "张老师".to_string(),
            location: "A101".to_string(),
            day: 0,
            start_week: 1,
            end_week: 1,
            week_type: WeekType::All,
            slots: vec![1, 2],
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 20, 4, 30, 0).unwrap()
    }

    fn events(ics: &str) -> Vec<&str> {
        ics.split("BEGIN:VEVENT").skip(1).collect()
    }

    #[test]
    fn test_reference_example() {
        let ics = generate_ics(&[make_course("高等数学")], "2024-02-26", None).unwrap();

        assert_eq!(events(&ics).len(), 1);
        assert!(ics.contains("DTSTART;TZID=Asia/Shanghai:20240226T080000\r\n"));
        assert!(ics.contains("DTEND;TZID=Asia/Shanghai:20240226T094000\r\n"));
        assert!(ics.contains("SUMMARY:高等数学\r\n"));
        assert!(ics.contains("DESCRIPTION:第1周 张老师\r\n"));
        assert!(ics.contains("LOCATION:A101\r\n"));
    }

    #[test]
    fn test_document_structure() {
        let ics = generate_ics_at(&[make_course("高等数学")], "2024-02-26", None, fixed_now())
            .unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("VERSION:2.0\r\n"));
        assert!(ics.contains("PRODID:-//NJUPT//Course Schedule//CN\r\n"));
        assert_eq!(ics.matches("PRODID:").count(), 1);
        assert!(ics.contains("METHOD:PUBLISH\r\n"));
        assert!(ics.contains("X-WR-TIMEZONE:Asia/Shanghai\r\n"));
        assert!(ics.ends_with("END:VEVENT\r\nEND:VCALENDAR\r\n"));
        assert!(ics.contains("BEGIN:VTIMEZONE\r\nTZID:Asia/Shanghai\r\n"));
        assert!(ics.contains("TZOFFSETTO:+0800\r\n"));
        assert!(ics.contains("DTSTAMP:20240220T043000Z\r\n"));

        // The time zone is declared before any event uses it
        let vtimezone = ics.find("BEGIN:VTIMEZONE").unwrap();
        let first_event = ics.find("BEGIN:VEVENT").unwrap();
        assert!(vtimezone < first_event);

        // Every line is CRLF-terminated
        assert!(!ics.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_odd_week_course_emits_eight_events() {
        let mut course = make_course("大学物理");
        course.end_week = 16;
        course.week_type = WeekType::Odd;

        let ics = generate_ics(&[course], "2024-09-02", None).unwrap();
        let descriptions: Vec<&str> = ics
            .lines()
            .filter(|l| l.starts_with("DESCRIPTION:"))
            .collect();

        assert_eq!(descriptions.len(), 8);
        assert_eq!(descriptions[0], "DESCRIPTION:第1周 张老师");
        assert_eq!(descriptions[7], "DESCRIPTION:第15周 张老师");
    }

    #[test]
    fn test_summary_is_escaped() {
        let ics = generate_ics(&[make_course("数学,物理;化学\r\n实验")], "2024-02-26", None)
            .unwrap();
        let summary = ics.lines().find(|l| l.starts_with("SUMMARY:")).unwrap();
        assert_eq!(summary, "SUMMARY:数学\\,物理\\;化学\\n实验");
    }

    #[test]
    fn test_long_location_is_folded_and_reads_back() {
        let mut course = make_course("高等数学");
        course.location = "教".repeat(40);

        let ics = generate_ics(&[course], "2024-02-26", None).unwrap();
        assert!(ics.lines().all(|l| l.len() <= 75));

        let unfolded = unfold(&ics);
        let calendar = read_calendar(&unfolded).unwrap();
        let event = calendar
            .components
            .iter()
            .find(|c| c.name == "VEVENT")
            .unwrap();
        assert_eq!(
            event.find_prop("LOCATION").unwrap().val.as_str(),
            "教".repeat(40)
        );
    }

    #[test]
    fn test_uids_are_unique() {
        let mut course = make_course("高等数学");
        course.end_week = 16;

        let ics = generate_ics(&[course], "2024-02-26", None).unwrap();
        let uids: std::collections::HashSet<&str> =
            ics.lines().filter(|l| l.starts_with("UID:")).collect();
        assert_eq!(uids.len(), 16);
        assert!(uids.iter().all(|u| u.ends_with("@njupt.edu.cn")));
    }

    #[test]
    fn test_missing_or_invalid_start_date() {
        let courses = [make_course("高等数学")];
        assert_eq!(
            generate_ics(&courses, "", None),
            Err(ScheduleError::MissingStartDate)
        );
        assert!(matches!(
            generate_ics(&courses, "2024-13-01", None),
            Err(ScheduleError::InvalidStartDate(_))
        ));
    }

    #[test]
    fn test_custom_times_apply() {
        let overrides =
            SlotTimeMap::from_json(r#"{"1": {"s": "0810", "e": "0855"}, "2": {"s": "0900", "e": "0945"}}"#)
                .unwrap();
        let ics = generate_ics(&[make_course("高等数学")], "2024-02-26", Some(&overrides)).unwrap();

        assert!(ics.contains("DTSTART;TZID=Asia/Shanghai:20240226T081000\r\n"));
        assert!(ics.contains("DTEND;TZID=Asia/Shanghai:20240226T094500\r\n"));
    }

    #[test]
    fn test_partial_custom_times_do_not_borrow_defaults() {
        let overrides = SlotTimeMap::from_json(r#"{"1": {"s": "0810", "e": "0855"}}"#).unwrap();
        let ics = generate_ics(&[make_course("高等数学")], "2024-02-26", Some(&overrides)).unwrap();

        assert!(ics.contains("DTSTART;TZID=Asia/Shanghai:20240226T081000\r\n"));
        assert!(ics.contains("DTEND;TZID=Asia/Shanghai:20240226T000000\r\n"));
    }

    #[test]
    fn test_course_with_absurd_week_range_is_skipped() {
        let mut course = make_course("高等数学");
        course.end_week = 4_000_000_000;

        let ics = generate_ics(&[course, make_course("线性代数")], "2024-02-26", None).unwrap();
        assert_eq!(events(&ics).len(), 1);
        assert!(ics.contains("SUMMARY:线性代数\r\n"));
    }

    #[test]
    fn test_no_courses_still_produces_valid_calendar() {
        let ics = generate_ics(&[], "2024-02-26", None).unwrap();
        assert!(events(&ics).is_empty());
        assert!(ics.ends_with("END:VTIMEZONE\r\nEND:VCALENDAR\r\n"));
    }
}
