//! ICS file generation.
//!
//! Writes the expanded course schedule as an RFC 5545 calendar with one
//! `VEVENT` per class meeting, in local `Asia/Shanghai` time.

mod generate;

pub use generate::{generate_ics, generate_ics_at};
