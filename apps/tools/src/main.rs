use std::path::PathBuf;

use anyhow::{anyhow, Result};
use calendar_core::{
    compute_grid, text::scene_to_text, Calendar, CalendarCallbacks, FixedClock, LocalClock,
    MonthGrid, SnapshotSurface,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use host_bridge::settings::{load_settings, DEFAULT_SETTINGS_FILE};
use shared::{
    domain::{DateKey, DateStateEntry},
    error::ApiError,
};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the 42 dates shown for a month.
    Grid {
        year: i32,
        /// 1-12; values outside roll into neighbouring years.
        month: i32,
        #[arg(long)]
        json: bool,
    },
    /// Render the calendar as text, with states from the settings file.
    Render {
        /// Selected date, YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Pretend today is this date.
        #[arg(long)]
        today: Option<String>,
    },
    /// Normalize a date key.
    Key {
        date: String,
        /// Report failures as a JSON error object instead of exiting.
        #[arg(long)]
        json: bool,
    },
}

/// Grid for a one-based month; out-of-range months roll into other years.
fn grid_for(year: i32, month: i32) -> Result<MonthGrid> {
    month
        .checked_sub(1)
        .and_then(|month0| compute_grid(year, month0))
        .ok_or_else(|| anyhow!("{year}-{month} is outside the displayable range"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.settings);
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Grid { year, month, json } => {
            let grid = grid_for(year, month)?;
            if json {
                let dates: Vec<String> = grid
                    .cells
                    .iter()
                    .map(|cell| DateKey::new(cell.date).to_string())
                    .collect();
                println!("{}", serde_json::to_string_pretty(&dates)?);
            } else {
                for row in grid.rows() {
                    let line: Vec<String> = row
                        .iter()
                        .map(|cell| DateKey::new(cell.date).to_string())
                        .collect();
                    println!("{}", line.join(" "));
                }
            }
        }
        Command::Render { date, today } => {
            let config = settings.control_config()?;
            let entries: Vec<DateStateEntry> = settings
                .date_states
                .iter()
                .map(|entry| DateStateEntry::new(entry.date.date(), &entry.state))
                .collect();

            let mut calendar = match today {
                Some(raw) => Calendar::with_clock(
                    SnapshotSurface::new(),
                    CalendarCallbacks::new(),
                    config.states,
                    Box::new(FixedClock(DateKey::parse(&raw)?.date())),
                ),
                None => Calendar::with_clock(
                    SnapshotSurface::new(),
                    CalendarCallbacks::new(),
                    config.states,
                    Box::new(LocalClock),
                ),
            };
            calendar.set_hilite_today(config.hilite_today);
            calendar.set_hilite_selected(config.hilite_selected);
            calendar.set_date_states(&entries);
            if let Some(raw) = date {
                calendar.set_current_date(DateKey::parse(&raw)?.date())?;
            }

            let view = calendar
                .surface()
                .current()
                .ok_or_else(|| anyhow!("nothing was rendered"))?;
            print!("{}", scene_to_text(&view.scene));
        }
        Command::Key { date, json } => match DateKey::parse(&date) {
            Ok(key) => {
                let today = Local::now().date_naive();
                println!("{key} ({} days from today)", (key.date() - today).num_days());
            }
            Err(err) if json => {
                println!("{}", serde_json::to_string(&ApiError::from(err))?);
            }
            Err(err) => return Err(err.into()),
        },
    }

    Ok(())
}
