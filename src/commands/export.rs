use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use courseics_core::semester::{parse_start_date, suggest_start_date};
use courseics_core::{ExportConfig, generate_ics};
use dialoguer::Input;
use owo_colors::OwoColorize;
use tracing::info;

use crate::render::pluralize;
use crate::settings;

pub fn run(page: &Path, start: Option<String>, times: Option<PathBuf>, output: PathBuf) -> Result<()> {
    let courses = super::load_courses(page)?;
    if courses.is_empty() {
        anyhow::bail!(
            "No courses recognized in {}.\n\n\
            Save the timetable page (the one showing the weekly course table) \
            and pass that file.",
            page.display()
        );
    }

    let mut config = settings::load()?;
    let start_date = resolve_start_date(start, &mut config)?;

    let overrides = match times {
        Some(path) => Some(super::load_slot_times(&path)?.1),
        None => config.slot_overrides(),
    };

    let ics = generate_ics(&courses, &start_date, overrides.as_ref())?;
    std::fs::write(&output, &ics)
        .with_context(|| format!("Could not write {}", output.display()))?;

    let events = ics.matches("BEGIN:VEVENT").count();
    info!(output = %output.display(), events, "Exported calendar");

    println!(
        "{}",
        format!(
            "  Exported {} {} from {} {} to {}",
            events,
            pluralize("event", events),
            courses.len(),
            pluralize("course", courses.len()),
            output.display()
        )
        .green()
    );
    println!("  {}", format!("Semester starts {start_date}").dimmed());

    Ok(())
}

/// Start date from the flag, then saved settings, then an interactive prompt.
///
/// A prompted date is saved so the next export does not ask again.
fn resolve_start_date(flag: Option<String>, config: &mut ExportConfig) -> Result<String> {
    if let Some(date) = flag {
        parse_start_date(&date)?;
        return Ok(date.trim().to_string());
    }

    if let Some(date) = config.start_date() {
        return Ok(date.to_string());
    }

    let date = prompt_start_date()?;
    config.start_date = Some(date.clone());
    settings::save(config)?;
    Ok(date)
}

/// Prompt for the semester start date with retry on invalid input.
fn prompt_start_date() -> Result<String> {
    let suggested = suggest_start_date(Local::now().date_naive());
    println!(
        "{}",
        "  Enter the date of Monday in week 1 of this semester.".dimmed()
    );

    loop {
        let input: String = Input::new()
            .with_prompt("  Semester start (YYYY-MM-DD)")
            .default(suggested.format("%Y-%m-%d").to_string())
            .interact_text()
            .context("No semester start date given; pass one with --start")?;

        match parse_start_date(&input) {
            Ok(date) => return Ok(date.format("%Y-%m-%d").to_string()),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}
