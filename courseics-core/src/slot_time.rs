//! Class period to clock time mapping.
//!
//! Times are kept as 24-hour `HHmm` strings, the form they take both in the
//! user's override JSON and in the generated `DTSTART`/`DTEND` values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// Clock time written for a period no mapping knows about.
const UNKNOWN_TIME: &str = "0000";

/// Built-in schedule of the twelve daily class periods.
const DEFAULT_SLOT_TIMES: [(u32, &str, &str); 12] = [
    (1, "0800", "0845"),
    (2, "0855", "0940"),
    (3, "1000", "1045"),
    (4, "1055", "1140"),
    (5, "1150", "1235"),
    (6, "1345", "1430"),
    (7, "1440", "1525"),
    (8, "1540", "1625"),
    (9, "1635", "1720"),
    (10, "1830", "1915"),
    (11, "1925", "2010"),
    (12, "2020", "2105"),
];

/// Start and end of one class period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTime {
    #[serde(rename = "s")]
    pub start: String,
    #[serde(rename = "e")]
    pub end: String,
}

impl SlotTime {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        SlotTime {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A user mapping from period index to clock times.
///
/// When present it replaces the built-in schedule outright: a period it does
/// not name has no known time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotTimeMap {
    slots: BTreeMap<u32, SlotTime>,
}

impl SlotTimeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a user override such as `{"1": {"s": "0810", "e": "0855"}}`.
    ///
    /// Keys must be positive period numbers and both times must be valid
    /// `HHmm` clock times; anything else rejects the whole map.
    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        let raw: BTreeMap<String, SlotTime> = serde_json::from_str(json)
            .map_err(|e| ScheduleError::InvalidSlotTimes(e.to_string()))?;

        let mut map = SlotTimeMap::new();
        for (key, time) in raw {
            let slot = key
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ScheduleError::InvalidSlotTimes(format!("'{key}' is not a period number"))
                })?;

            for value in [&time.start, &time.end] {
                if !is_clock_time(value) {
                    return Err(ScheduleError::InvalidSlotTimes(format!(
                        "period {slot}: '{value}' is not an HHmm time"
                    )));
                }
            }
            map.insert(slot, time);
        }

        Ok(map)
    }

    pub fn insert(&mut self, slot: u32, time: SlotTime) {
        self.slots.insert(slot, time);
    }

    pub fn get(&self, slot: u32) -> Option<&SlotTime> {
        self.slots.get(&slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &SlotTime)> {
        self.slots.iter().map(|(slot, time)| (*slot, time))
    }
}

/// Resolve a period against the user mapping if there is one, otherwise
/// against the built-in schedule.
fn lookup(slot: u32, overrides: Option<&SlotTimeMap>) -> Option<SlotTime> {
    match overrides {
        Some(map) => map.get(slot).cloned(),
        None => DEFAULT_SLOT_TIMES
            .iter()
            .find(|(s, _, _)| *s == slot)
            .map(|(_, s, e)| SlotTime::new(*s, *e)),
    }
}

/// Clock time at which `slot` begins, `"0000"` if the mapping in use lacks it.
pub(crate) fn start_time(slot: u32, overrides: Option<&SlotTimeMap>) -> String {
    lookup(slot, overrides)
        .map(|t| t.start)
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// Clock time at which `slot` ends, `"0000"` if the mapping in use lacks it.
pub(crate) fn end_time(slot: u32, overrides: Option<&SlotTimeMap>) -> String {
    lookup(slot, overrides)
        .map(|t| t.end)
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

fn is_clock_time(value: &str) -> bool {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (hours, minutes) = value.split_at(2);
    matches!((hours.parse::<u32>(), minutes.parse::<u32>()), (Ok(h), Ok(m)) if h < 24 && m < 60)
}
