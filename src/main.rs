use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

use wayfarer::api::HttpTravelApi;
use wayfarer::core::config::{self, CliOverrides, ConfigNotes, WayfarerConfig};
use wayfarer::tui;

#[derive(Parser)]
#[command(name = "wayfarer", about = "Plan trips with an AI travel agent from the terminal")]
struct Args {
    /// Travel agent backend URL (overrides config and WAYFARER_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Refetch recommendations from the backend when changing day
    #[arg(long)]
    fetch_days: bool,

    /// Write the log here instead of wayfarer.log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let mut config_notes = ConfigNotes::default();
    let (file_config, config_error) = match config::load_config(&mut config_notes) {
        Ok(c) => (c, None),
        Err(e) => (WayfarerConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            fetch_days: args.fetch_days,
            log_file: args.log_file,
        },
        &mut config_notes,
    );

    // Terminal belongs to the UI, so everything goes to the log file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
        }
        Err(e) => eprintln!(
            "Could not open log file {}: {}",
            resolved.log_file.display(),
            e
        ),
    }

    config_notes.replay();
    if let Some(e) = config_error {
        log::warn!("Ignoring config file, using defaults: {}", e);
    }
    log::info!("Wayfarer starting up against {}", resolved.base_url);

    let api = Arc::new(HttpTravelApi::new(Some(resolved.base_url.clone())));
    tui::run(resolved, api)
}
