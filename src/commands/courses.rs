use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

pub fn run(page: &Path, json: bool) -> Result<()> {
    let courses = super::load_courses(page)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&courses)?);
        return Ok(());
    }

    if courses.is_empty() {
        println!("{}", "No courses recognized on this page.".yellow());
        return Ok(());
    }

    for course in &courses {
        println!("  {}", course.render());
    }
    println!();
    println!(
        "{}",
        format!("{} {}", courses.len(), pluralize("course", courses.len())).dimmed()
    );

    Ok(())
}
