//! Headless effect run with periodic intensity reports

use anyhow::{bail, Context, Result};
use chaos_core::Vec2;
use chaos_particles::{ChaosConfig, ChaosParticles, Palette};
use chaos_runtime::{FrameClock, FrameInfo, LogSink, ModelLayout};
use serde::Serialize;
use std::time::Duration;

pub struct RunArgs {
    pub layout: String,
    pub palette: Option<String>,
    pub config: Option<String>,
    pub seed: u32,
    pub at: Option<[f32; 2]>,
    pub seconds: f32,
    pub fps: f32,
    pub report_every: u32,
    pub realtime: bool,
    pub format: String,
}

/// One line of run output
#[derive(Serialize)]
struct FrameReport {
    frame: u64,
    time: f64,
    running: bool,
    total_intensity: Option<f32>,
    live: usize,
    max_generation: u32,
    steps: u64,
}

pub fn run(args: RunArgs) -> Result<()> {
    if !(args.fps > 0.0) {
        bail!("--fps must be positive, got {}", args.fps);
    }
    let json = match args.format.as_str() {
        "json" => true,
        "text" => false,
        other => bail!("unknown format '{}'; valid values: text, json", other),
    };

    let layout = ModelLayout::load(&args.layout)
        .with_context(|| format!("Failed to load layout {}", args.layout))?;
    let bounds = layout.bounding_box();

    let palette = match &args.palette {
        Some(path) => Palette::load(path).context("Failed to load palette")?,
        None => Palette::ember(),
    };
    let config = match &args.config {
        Some(path) => ChaosConfig::load(path).context("Failed to load effect config")?,
        None => ChaosConfig::default(),
    };

    let mut effect = ChaosParticles::new(palette, config).context("Invalid effect config")?;

    // Simulation space maps onto the model's XZ plane
    let center = bounds.center();
    let location = args
        .at
        .map(|[x, z]| Vec2::new(x, z))
        .unwrap_or(Vec2::new(center.x, center.z));
    effect.reseed(location, args.seed);

    if !json {
        println!(
            "Layout: {} points, diameter {:.3}",
            layout.len(),
            bounds.diameter()
        );
        println!(
            "Seed {} at ({:.3}, {:.3}), {} particles",
            args.seed,
            location.x,
            location.y,
            effect.dynamics().len()
        );
    }

    let mut clock = if args.realtime {
        FrameClock::realtime()
    } else {
        FrameClock::fixed(args.fps)
    };
    let frame_interval = Duration::from_secs_f32(1.0 / args.fps);
    let report_every = args.report_every.max(1) as u64;
    let mut frame_index = 0u64;

    while clock.total_time < args.seconds as f64 && effect.is_running() {
        if clock.is_realtime() {
            std::thread::sleep(frame_interval);
        }
        let dt = clock.tick();
        effect.on_frame(&FrameInfo::new(bounds, dt));
        frame_index += 1;

        if frame_index % report_every == 0 || !effect.is_running() {
            report(&effect, frame_index, clock.total_time, json)?;
        }
    }

    effect.debug(&mut LogSink::new("chaos-particles"));

    if !json {
        if effect.is_running() {
            println!("Stopped after {:.2}s with the population still alive", clock.total_time);
        } else {
            println!("Population exhausted after {:.2}s", clock.total_time);
        }
    }

    Ok(())
}

fn report(effect: &ChaosParticles, frame: u64, time: f64, json: bool) -> Result<()> {
    let intensity = effect.total_intensity();
    let line = FrameReport {
        frame,
        time,
        running: effect.is_running(),
        total_intensity: (!intensity.is_nan()).then_some(intensity),
        live: effect.live_count(),
        max_generation: effect.max_generation(),
        steps: effect.steps_run(),
    };

    if json {
        println!("{}", serde_json::to_string(&line)?);
    } else {
        let intensity = line
            .total_intensity
            .map(|i| format!("{:.3}", i))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  t={:>7.2}s  running={:<5}  intensity={:>9}  live={:>4}  gen={:>3}  steps={}",
            line.time, line.running, intensity, line.live, line.max_generation, line.steps
        );
    }
    Ok(())
}
