//! CLI entry point for train_late.
//!
//! Loads the rail schedule once, then lists routes or trips, looks up how
//! late a single trip is, or serves the lookup interface over HTTP.

use std::ffi::OsStr;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use train_late::config::Settings;
use train_late::lookup::{Lookup, RouteSummary, TripSummary};
use train_late::schedule::ScheduleIndex;
use train_late::web::{AppState, LatenessResponse, create_router};

#[derive(Parser)]
#[command(name = "train_late")]
#[command(about = "How late is this train trip right now?", long_about = None)]
struct Cli {
    /// GTFS routes file
    #[arg(long, global = true, default_value = "data/routes.txt")]
    routes: PathBuf,

    /// GTFS trips file
    #[arg(long, global = true, default_value = "data/trips.txt")]
    trips: PathBuf,

    /// Answer lateness from this GTFS-RT file instead of the live feed
    #[arg(long, global = true, value_name = "FILE")]
    feed_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List rail routes as JSON
    Routes,
    /// List the trips of a route as JSON
    Trips {
        #[arg(value_name = "ROUTE_ID")]
        route: String,
    },
    /// Look up the current lateness of a trip
    Lateness {
        #[arg(value_name = "TRIP_ID")]
        trip: String,
    },
    /// Serve routes, trips and lateness over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let mut settings = Settings::from_env();
    let _file_guard = init_tracing(&settings.log_file_path)?;

    let cli = Cli::parse();
    if cli.feed_file.is_some() {
        settings.feed_file = cli.feed_file;
    }

    let schedule = ScheduleIndex::load(&cli.routes, &cli.trips).context("loading schedule")?;
    info!(
        routes = schedule.route_count(),
        trips = schedule.trip_count(),
        "Schedule ready"
    );

    match cli.command {
        Commands::Routes => {
            let routes: Vec<_> = schedule
                .routes_all()
                .iter()
                .map(RouteSummary::from)
                .collect();
            print_json(&routes)?;
        }
        Commands::Trips { route } => {
            let trips: Vec<_> = schedule
                .trips_for_route(&route)
                .into_iter()
                .map(TripSummary::from)
                .collect();
            print_json(&trips)?;
        }
        Commands::Lateness { trip } => {
            let lookup = Lookup::new(Arc::new(schedule), settings.lateness_source()?);
            let report = lookup.get_lateness(&trip).await?;
            print_json(&LatenessResponse::new(trip, report))?;
        }
        Commands::Serve { addr } => {
            let lookup = Lookup::new(Arc::new(schedule), settings.lateness_source()?);
            let app = create_router(AppState::new(lookup));

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {addr}"))?;
            info!(%addr, "Server listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// Colored stderr output plus a JSON log file rolled daily.
fn init_tracing(log_file_path: &Path) -> Result<WorkerGuard> {
    let log_dir = log_file_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("train_late.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_filter = EnvFilter::from_env("RUST_LOG").add_directive("info".parse::<Directive>()?);
    let json_filter =
        EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse::<Directive>()?);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(json_filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
