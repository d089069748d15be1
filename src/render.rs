//! Terminal rendering for courseics types.
//!
//! Extension traits that add colored output to courseics-core types
//! using owo_colors.

use courseics_core::{Course, WeekType};
use owo_colors::OwoColorize;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub trait Render {
    fn render(&self) -> String;
}

impl Render for WeekType {
    fn render(&self) -> String {
        match self {
            WeekType::All => self.label().dimmed().to_string(),
            WeekType::Odd | WeekType::Even => self.label().yellow().to_string(),
        }
    }
}

impl Render for Course {
    fn render(&self) -> String {
        let weekday = WEEKDAYS.get(self.day as usize).copied().unwrap_or("?");
        let periods = format_periods(&self.slots);
        let weeks = format!("weeks {}-{}", self.start_week, self.end_week);

        let mut line = format!(
            "{} {} {} {} {}",
            weekday.cyan(),
            periods,
            self.name.bold(),
            weeks.dimmed(),
            self.week_type.render()
        );
        if !self.teacher.is_empty() {
            line.push_str(&format!(" · {}", self.teacher));
        }
        line.push_str(&format!(" @ {}", self.location.dimmed()));
        line
    }
}

/// `p1-2` for consecutive periods, `p1,3` otherwise.
fn format_periods(slots: &[u32]) -> String {
    let consecutive = slots.windows(2).all(|w| w[1] == w[0] + 1);
    match (slots.first(), slots.last()) {
        (Some(first), Some(last)) if consecutive && first != last => format!("p{first}-{last}"),
        _ => format!(
            "p{}",
            slots
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",")
        ),
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
