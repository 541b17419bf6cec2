use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use aviary_cli::{load_settings, run_wanderer, PointerPath, Runner};
use aviary_core::{Flock, FlockConfig, Viewport, Wanderer, WandererConfig};
use aviary_shared::FrameSnapshot;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// The boids flock
    Flock,
    /// The single meandering bird
    Wanderer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One JSON object per frame
    Frames,
    /// A single JSON summary once the run is done
    Summary,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the bird overlay simulation without a browser", long_about = None)]
struct Args {
    /// Number of birds (defaults to a random size between 20 and 30)
    #[arg(short, long)]
    count: Option<usize>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Seed for the initial spawn (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file; omitted fields keep their defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Pointer path: 'none', 'X,Y' or 'orbit:CX,CY,RADIUS,PERIOD'
    #[arg(short, long, default_value = "none")]
    pointer: PointerPath,

    #[arg(short, long, value_enum, default_value_t = Mode::Flock)]
    mode: Mode,

    #[arg(long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn run_flock(args: &Args, seed: u64, out: &mut impl Write) -> Result<()> {
    let config = match &args.settings {
        Some(path) => load_settings(path)?,
        None => FlockConfig::default(),
    };

    let flock = match args.count {
        Some(count) => Flock::seeded(count, args.width, args.height, config, seed),
        None => Flock::seeded_random_count(args.width, args.height, config, seed),
    }
    .context("Failed to create flock")?;
    log::info!("Flock of {} birds", flock.len());

    let viewport = Viewport::new(args.width, args.height);
    let mut runner = Runner::new(flock, args.pointer, viewport);
    let started = Instant::now();

    let summary = runner.run(args.frames, |frame, viewport, boids| {
        if args.format == Format::Frames {
            let snapshot = FrameSnapshot::capture(frame, viewport, boids);
            serde_json::to_writer(&mut *out, &snapshot)?;
            writeln!(out)?;
        }
        Ok(())
    })?;

    let elapsed = started.elapsed().as_secs_f64();
    if elapsed > 0.0 {
        log::info!(
            "Simulated {} frames in {:.1} ms ({:.0} fps)",
            summary.frames,
            elapsed * 1000.0,
            summary.frames as f64 / elapsed
        );
    }

    if args.format == Format::Summary {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    }
    Ok(())
}

fn run_single(args: &Args, seed: u64, out: &mut impl Write) -> Result<()> {
    let viewport = Viewport::new(args.width, args.height);
    let mut bird = Wanderer::seeded(viewport, WandererConfig::default(), seed)
        .context("Failed to create wanderer")?;

    let mut last = None;
    run_wanderer(&mut bird, args.pointer, viewport, args.frames, |frame| {
        if args.format == Format::Frames {
            serde_json::to_writer(&mut *out, frame)?;
            writeln!(out)?;
        }
        last = Some(frame.clone());
        Ok(())
    })?;

    if args.format == Format::Summary {
        serde_json::to_writer_pretty(&mut *out, &last)?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Aviary starting...");
    log::info!("Viewport: {}x{}", args.width, args.height);
    log::info!("Seed: {}", seed);
    log::debug!("Pointer: {:?}", args.pointer);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.mode {
        Mode::Flock => run_flock(&args, seed, &mut out).context("Flock run failed")?,
        Mode::Wanderer => run_single(&args, seed, &mut out).context("Wanderer run failed")?,
    }

    out.flush()?;
    Ok(())
}
