use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "gridclock", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a reveal pass for a number of ticks and write one PNG.
    Frame(FrameArgs),
    /// Write a PNG every few ticks until the pass completes.
    Sequence(SequenceArgs),
    /// Print resolved timing and pass length as JSON.
    Inspect(ClockArgs),
}

#[derive(Args, Debug)]
struct ClockArgs {
    /// Time to show, as HH:MM (24-hour).
    #[arg(long)]
    time: String,

    /// Show the hour in 12-hour form without a leading zero.
    #[arg(long)]
    twelve_hour: bool,

    /// Seed for the stagger and activation draws (defaults to the clock).
    #[arg(long)]
    seed: Option<u64>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 200)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 228)]
    height: u32,

    /// Cell edge in pixels.
    #[arg(long, default_value_t = 8)]
    cell_size: u32,

    /// Timing/theme JSON config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured theme.
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    clock: ClockArgs,

    /// Ticks to run; runs the whole pass when omitted.
    #[arg(long)]
    ticks: Option<u32>,

    /// Draw the fully revealed frame without animating.
    #[arg(long = "static")]
    static_frame: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    clock: ClockArgs,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Write every Nth tick.
    #[arg(long, default_value_t = 1)]
    every: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

/// Turn `HH:MM` into a display value, suppressing the leading hour zero in
/// 12-hour mode.
fn display_value(time: &str, twelve_hour: bool) -> anyhow::Result<gridclock::DisplayValue> {
    let (h, m) = time
        .split_once(':')
        .with_context(|| format!("time '{time}' must look like HH:MM"))?;
    let hours: u8 = h.parse().with_context(|| format!("parse hours '{h}'"))?;
    let minutes: u8 = m.parse().with_context(|| format!("parse minutes '{m}'"))?;
    anyhow::ensure!(hours < 24, "hours {hours} out of range");
    anyhow::ensure!(minutes < 60, "minutes {minutes} out of range");

    let (hours, format) = if twelve_hour {
        let h12 = match hours % 12 {
            0 => 12,
            h => h,
        };
        (h12, gridclock::HourFormat::TwelveHour)
    } else {
        (hours, gridclock::HourFormat::TwentyFourHour)
    };
    let tens = hours / 10;
    let leading = if twelve_hour && tens == 0 {
        None
    } else {
        Some(tens)
    };
    let value = gridclock::DisplayValue::from_digits([
        leading,
        Some(hours % 10),
        Some(minutes / 10),
        Some(minutes % 10),
    ])?;
    Ok(value.with_format(format))
}

fn build_face(args: &ClockArgs) -> anyhow::Result<gridclock::ClockFace> {
    let mut config = match &args.config {
        Some(path) => gridclock::ClockConfig::from_path(path)?,
        None => gridclock::ClockConfig::default(),
    };
    if let Some(theme) = args.theme {
        config.theme = match theme {
            ThemeChoice::Dark => gridclock::Theme::Dark,
            ThemeChoice::Light => gridclock::Theme::Light,
        };
    }

    let font = gridclock::GlyphFont::builtin();
    let geometry = gridclock::GridGeometry::fit(args.width, args.height, args.cell_size, &font)
        .context("lay out grid")?;
    let rng = match args.seed {
        Some(seed) => gridclock::Rng64::new(seed),
        None => gridclock::Rng64::from_clock(),
    };
    let mut face = gridclock::ClockFace::new(geometry, font, &config, rng)?;
    face.set_display(display_value(&args.time, args.twelve_hour)?);
    Ok(face)
}

fn write_png(path: &Path, frame: &gridclock::FrameRgba) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut face = build_face(&args.clock)?;
    if args.static_frame {
        face.set_enabled(false);
    } else {
        let ticks = args.ticks.unwrap_or_else(|| face.timing().max_pass_ticks());
        for _ in 0..ticks {
            if face.tick() && args.ticks.is_none() {
                break;
            }
        }
    }

    let frame = face.render_frame()?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.every > 0, "--every must be at least 1");
    let mut face = build_face(&args.clock)?;
    let frame_ms = u64::try_from(face.timing().frame_ms).context("frame period")?;
    let max_ticks = face.timing().max_pass_ticks();

    let mut driver = gridclock::FrameDriver::new(gridclock::ManualTimer::new());
    driver.restart(&mut face);

    let mut written = 0u32;
    let mut tick = 0u32;
    loop {
        if tick % args.every == 0 || driver.pending().is_none() {
            let path = args.out_dir.join(format!("frame_{tick:04}.png"));
            write_png(&path, &face.render_frame()?)?;
            written += 1;
        }
        if driver.pending().is_none() || tick >= max_ticks {
            break;
        }
        tick += driver.advance(&mut face, frame_ms);
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_inspect(args: ClockArgs) -> anyhow::Result<()> {
    let mut face = build_face(&args)?;
    let geometry = *face.geometry();
    let active_cells = face.background().active_count();
    let timing = *face.timing();

    let bound = timing.max_pass_ticks();
    let mut pass_ticks = None;
    for n in 1..=bound {
        if face.tick() {
            pass_ticks = Some(n);
            break;
        }
    }

    let report = serde_json::json!({
        "grid": {
            "cols": geometry.cols(),
            "rows": geometry.rows(),
            "cell_size": geometry.cell_size(),
            "digit_origin": geometry.digit_origin(),
            "pixel_size": geometry.pixel_size(),
        },
        "active_cells": active_cells,
        "timing": timing,
        "pass_ticks": pass_ticks,
        "pass_ms": pass_ticks.map(|n| i64::from(n) * i64::from(timing.frame_ms)),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize report")?
    );
    Ok(())
}
