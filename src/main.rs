mod commands;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "courseics")]
#[command(about = "Turn your academic-affairs timetable page into an .ics calendar")]
struct Cli {
    /// Show debug logging (which cells and blocks were parsed or skipped)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the courses on a saved timetable page to an .ics file
    Export {
        /// Saved timetable page (.html)
        page: PathBuf,

        /// Date of Monday in week 1 (YYYY-MM-DD); asked for if not saved
        #[arg(short, long)]
        start: Option<String>,

        /// JSON file with custom period times, e.g. {"1": {"s": "0810", "e": "0855"}};
        /// replaces the default times, so list every period you use
        #[arg(short, long)]
        times: Option<PathBuf>,

        /// Where to write the calendar
        #[arg(short, long, default_value = commands::DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// List the courses recognized on a saved timetable page
    Courses {
        /// Saved timetable page (.html)
        page: PathBuf,

        /// Print as JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Show or change saved export settings
    Config {
        /// Save this semester start date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_start")]
        start: Option<String>,

        /// Save custom period times from this JSON file
        #[arg(long, conflicts_with = "clear_times")]
        times: Option<PathBuf>,

        /// Forget the saved semester start date
        #[arg(long)]
        clear_start: bool,

        /// Go back to the default period times
        #[arg(long)]
        clear_times: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Export {
            page,
            start,
            times,
            output,
        } => commands::export::run(&page, start, times, output),
        Commands::Courses { page, json } => commands::courses::run(&page, json),
        Commands::Config {
            start,
            times,
            clear_start,
            clear_times,
        } => commands::config::run(commands::config::ConfigUpdate {
            start,
            times,
            clear_start,
            clear_times,
        }),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
