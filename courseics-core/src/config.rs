//! Export settings handed over by the caller.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::slot_time::SlotTimeMap;

/// User settings that influence an export.
///
/// Both fields are optional; the caller persists them however it likes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// JSON override for class period times, e.g. `{"1": {"s": "0810", "e": "0855"}}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_json: Option<String>,

    /// Previously chosen semester start date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

impl ExportConfig {
    /// The user's period-time override, if one is set and well formed.
    ///
    /// A malformed override is ignored so the export falls back to the
    /// built-in schedule.
    pub fn slot_overrides(&self) -> Option<SlotTimeMap> {
        let json = self.time_json.as_deref()?.trim();
        if json.is_empty() {
            return None;
        }

        match SlotTimeMap::from_json(json) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!("Ignoring custom period times: {e}");
                None
            }
        }
    }

    /// Saved start date, if it is non-blank.
    pub fn start_date(&self) -> Option<&str> {
        self.start_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
