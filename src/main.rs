use clap::Parser;
use nafta::TripArg;
use nafta::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "nafta", about = "Fuel cost estimator for trips between known locations")]
struct Args {
    /// Data directory or base URL holding the JSON tables
    #[arg(short, long)]
    data: Option<String>,

    /// Seconds to wait for each data file
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Answer B→A with the cached A→B route
    #[arg(long)]
    symmetric_routes: bool,

    /// Trip type selected at startup
    #[arg(long, value_enum)]
    trip: Option<TripArg>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = config::load_config().map_err(std::io::Error::other)?;
    let resolved = config::resolve(
        &loaded.config,
        &CliOverrides {
            data_source: args.data,
            fetch_timeout_secs: args.timeout,
            symmetric_routes: args.symmetric_routes,
            default_trip_type: args.trip.map(Into::into),
            verbose: args.verbose,
        },
    );

    // File logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
    config::log_notes(&loaded.notes);
    config::log_notes(&resolved.notes);

    log::info!(
        "Nafta starting up: data={}, timeout={:?}, routes={:?}",
        resolved.data_source,
        resolved.fetch_timeout,
        resolved.route_policy
    );

    nafta::tui::run(resolved)
}
