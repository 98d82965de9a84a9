//! Chaos CLI - Headless driver for chaos particle effects

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{layout, run};

#[derive(Parser)]
#[command(name = "chaos")]
#[command(about = "Run fractal chaos particle effects against LED layouts", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the effect and report intensity over time
    Run {
        /// Path to layout JSON
        #[arg(long)]
        layout: String,

        /// Palette image (defaults to a built-in gradient)
        #[arg(long)]
        palette: Option<String>,

        /// Effect config TOML overriding the default constants
        #[arg(long)]
        config: Option<String>,

        /// Population seed
        #[arg(long, default_value = "42")]
        seed: u32,

        /// Spawn point in the XZ plane (comma-separated x,z); defaults to the layout center
        #[arg(long, value_parser = parse_vec2)]
        at: Option<[f32; 2]>,

        /// Seconds of effect time to simulate
        #[arg(long, default_value = "10")]
        seconds: f32,

        /// Host frame rate
        #[arg(long, default_value = "60")]
        fps: f32,

        /// Print a report every N frames
        #[arg(long, default_value = "60")]
        report_every: u32,

        /// Pace frames against the wall clock instead of simulating instantly
        #[arg(long)]
        realtime: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show layout bounds and model diameter
    Layout {
        /// Path to layout JSON
        layout: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn parse_vec2(s: &str) -> Result<[f32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let z: f32 = parts[1].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, z])
}

fn verbosity_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Logger filtered at the `-v` level; RUST_LOG still overrides it
fn logger_builder(verbose: u8) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(verbosity_level(verbose))
        .parse_default_env();
    builder
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logger_builder(cli.verbose).init();

    match cli.command {
        Commands::Run {
            layout,
            palette,
            config,
            seed,
            at,
            seconds,
            fps,
            report_every,
            realtime,
            format,
        } => run::run(run::RunArgs {
            layout,
            palette,
            config,
            seed,
            at,
            seconds,
            fps,
            report_every,
            realtime,
            format,
        }),
        Commands::Layout { layout, format } => layout::run(&layout, &format),
    }
}
