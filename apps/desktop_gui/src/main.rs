use std::path::PathBuf;

mod controller;
mod surface;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use host_bridge::{
    settings::{load_settings, DEFAULT_SETTINGS_FILE},
    CalendarControl, ChannelHost, HostMessage,
};
use shared::protocol::DateStateRow;

use crate::{surface::EguiSurface, ui::CalendarApp};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
    /// Initially selected date, YYYY-MM-DD.
    #[arg(long)]
    date: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args.settings);
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let (host_tx, host_rx) = bounded::<HostMessage>(256);
    let mut control = CalendarControl::new(EguiSurface::default(), ChannelHost::new(host_tx));
    control.open(settings.control_config()?);

    let rows: Vec<DateStateRow> = settings
        .date_states
        .iter()
        .map(|entry| DateStateRow {
            date: entry.date.to_string(),
            state: entry.state.clone(),
        })
        .collect();
    control.set_state_list(&rows)?;
    if let Some(date) = &args.date {
        control.set_current_date(date)?;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Calendario")
            .with_inner_size([640.0, 520.0])
            .with_min_inner_size([560.0, 440.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Calendario",
        options,
        Box::new(|_cc| Ok(Box::new(CalendarApp::new(control, host_rx)))),
    )
    .map_err(|err| anyhow!("calendar window failed: {err}"))
}
