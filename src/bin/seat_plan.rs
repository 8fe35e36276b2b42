//! Seating Plan CLI
//!
//! Reads a layout description and one or more roster files, computes a
//! seating plan and prints it as JSON on stdout. Logs go to stderr.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `SEATING_MAX_BENCHES`: per-room bench ceiling (default: 45)
//! - `SEATING_SEED`: fixed shuffle seed for reproducible plans (default: unseeded)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin seat_plan --features cli -- layout.json cse.csv ece.pdf
//! ```

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use seating_kernel::{AllocationPolicy, LayoutConfig, PdfTextExtractor, PlanOutcome, RosterFile, SeatingPlanner};

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "seat_plan=info,seating_kernel=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    }
}

/// Media type hint from the file extension.
fn media_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("csv") => "text/csv",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

async fn load_roster(path: &Path) -> Result<RosterFile, std::io::Error> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(RosterFile::new(name, media_type_for(path), bytes))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((layout_path, roster_paths)) = args.split_first() else {
        eprintln!("usage: seat_plan <layout.json> <roster>...");
        return Ok(ExitCode::from(2));
    };

    let layout_text = tokio::fs::read_to_string(layout_path).await?;
    let layout: LayoutConfig = serde_json::from_str(&layout_text)?;

    let mut files = Vec::with_capacity(roster_paths.len());
    for path in roster_paths {
        files.push(load_roster(Path::new(path)).await?);
    }

    let policy = AllocationPolicy::from_env();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        files = files.len(),
        max_benches_per_room = policy.max_benches_per_room,
        seeded = policy.seed.is_some(),
        "Starting seating plan"
    );

    let started = Instant::now();
    let planner = SeatingPlanner::new(PdfTextExtractor, policy);
    let outcome = planner.run(&files, &layout).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    match outcome {
        PlanOutcome::Planned(plan) => {
            info!(
                latency_ms = started.elapsed().as_millis() as u64,
                seated = plan.seated_count(),
                unseated = plan.unseated_students().len(),
                "Seating plan written"
            );
            Ok(ExitCode::SUCCESS)
        }
        PlanOutcome::Failed { error } => {
            error!(error = %error, "Seating plan failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
