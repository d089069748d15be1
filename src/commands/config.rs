use std::path::PathBuf;

use anyhow::Result;
use courseics_core::semester::parse_start_date;
use owo_colors::OwoColorize;

use crate::settings;

pub struct ConfigUpdate {
    pub start: Option<String>,
    pub times: Option<PathBuf>,
    pub clear_start: bool,
    pub clear_times: bool,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.start.is_none() && self.times.is_none() && !self.clear_start && !self.clear_times
    }
}

pub fn run(update: ConfigUpdate) -> Result<()> {
    let config_path = settings::config_path()?;
    let mut config = settings::load()?;

    if !update.is_empty() {
        if update.clear_start {
            config.start_date = None;
        }
        if update.clear_times {
            config.time_json = None;
        }
        if let Some(date) = update.start {
            let date = parse_start_date(&date)?;
            config.start_date = Some(date.format("%Y-%m-%d").to_string());
        }
        if let Some(path) = update.times {
            let (json, _) = super::load_slot_times(&path)?;
            config.time_json = Some(json);
        }

        settings::save(&config)?;
        println!("{}", "  Settings saved".green());
    }

    println!("{}", "Paths".bold());
    println!("  Config:          {}", config_path.display());

    println!("{}", "Export".bold());
    println!(
        "  Semester start:  {}",
        config.start_date().unwrap_or("(ask on export)")
    );

    match config.slot_overrides() {
        Some(map) => {
            println!("  Period times:    {} custom", map.iter().count());
            for (slot, time) in map.iter() {
                println!("    {:>2}  {}-{}", slot, time.start, time.end);
            }
        }
        None if config
            .time_json
            .as_deref()
            .is_some_and(|json| !json.trim().is_empty()) =>
        {
            println!(
                "  Period times:    {}",
                "invalid custom times, using defaults".yellow()
            );
        }
        None => println!("  Period times:    {}", "defaults".dimmed()),
    }

    Ok(())
}
