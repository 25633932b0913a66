//! `slots` CLI — find common free meeting slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Find slots for a JSON query (stdin → stdout)
//! cat query.json | slots find
//!
//! # Read from file, write pretty JSON to file
//! slots find -i query.json -o slots.json --pretty
//!
//! # Interpret dates and daily times in another timezone
//! slots --timezone Europe/London find -i query.json
//!
//! # Step between days by calendar date instead of fixed 24 hours
//! slots --day-step calendar find -i query.json
//!
//! # Show merged busy blocks and untiled free gaps
//! slots busy -i query.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use slot_engine::freebusy::busy_and_free;
use slot_engine::query::{parse_timezone, SlotOutput, DEFAULT_TIMEZONE};
use slot_engine::{DayStep, FreeSlot, SlotQuery};
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Find common free meeting slots across busy calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// IANA timezone for dates, daily times and output instants
    #[arg(long, global = true, env = "SLOTS_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// How to step from one day's window to the next
    #[arg(long, global = true, value_enum, default_value_t = DayStepArg::Fixed)]
    day_step: DayStepArg,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute free slots for a query
    Find {
        /// Input query file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the JSON response
        #[arg(long)]
        pretty: bool,
    },
    /// Show merged busy blocks and free gaps before daily-window tiling
    Busy {
        /// Input query file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DayStepArg {
    /// Exactly 24 hours
    Fixed,
    /// Next calendar date at the daily start time
    Calendar,
}

impl From<DayStepArg> for DayStep {
    fn from(arg: DayStepArg) -> Self {
        match arg {
            DayStepArg::Fixed => DayStep::FixedDuration,
            DayStepArg::Calendar => DayStep::CalendarDay,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let tz = parse_timezone(&cli.timezone).context("Failed to resolve --timezone")?;
    tracing::debug!(timezone = %tz, "resolved timezone");

    match cli.command {
        Commands::Find {
            input,
            output,
            pretty,
        } => {
            let query = read_query(input.as_deref())?;
            let response = query
                .run(tz, cli.day_step.into())
                .context("Failed to compute free slots")?;
            tracing::info!(slots = response.slots.len(), "computed free slots");

            let rendered = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Busy { input } => {
            let query = read_query(input.as_deref())?;
            let window = query
                .search_window(tz)
                .context("Invalid search window")?;
            let busy = query
                .busy_intervals()
                .context("Failed to gather busy intervals")?;

            let (merged, gaps) = busy_and_free(&busy, window.date_start(), window.date_end());
            let render = |spans: &[slot_engine::Interval]| -> Vec<SlotOutput> {
                spans
                    .iter()
                    .map(|&span| SlotOutput::from_slot(&FreeSlot::from(span), tz))
                    .collect()
            };

            let report = json!({
                "busy": render(&merged),
                "free": render(&gaps),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn init_logging(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn read_query(path: Option<&str>) -> Result<SlotQuery> {
    let json = read_input(path)?;
    SlotQuery::from_json(&json).context("Failed to parse query JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
