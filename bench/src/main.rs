use std::time::{Duration, Instant};

use anyhow::Context as _;
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    cell_size: u32,
    time: String,
    seed: u64,
    warmup: u32,
    repeats: u32,
    render_every: u32,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    setup: Duration,
    tick_total: Duration,
    render_total: Duration,
    wall_total: Duration,
    ticks: u32,
    frames: u32,
    final_sha256: String,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be >= 1");
    }
    if args.render_every == 0 {
        anyhow::bail!("--render-every must be >= 1");
    }

    if args.warmup > 0 {
        eprintln!("warmup: {} run(s)", args.warmup);
        for _ in 0..args.warmup {
            let _ = run_once(&args)?;
        }
    }

    eprintln!(
        "bench: {repeats} run(s) ({profile} build), {w}x{h} @ cell {cell}, time={time}, seed={seed}, render_every={every}",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        w = args.width,
        h = args.height,
        cell = args.cell_size,
        time = args.time,
        seed = args.seed,
        every = args.render_every,
    );

    let mut runs = Vec::<RunMetrics>::with_capacity(args.repeats as usize);
    for _ in 0..args.repeats {
        runs.push(run_once(&args)?);
    }

    // Same seed, same pass: every run must land on the same final frame.
    let first = &runs[0];
    if let Some(bad) = runs.iter().find(|r| r.final_sha256 != first.final_sha256) {
        anyhow::bail!(
            "non-deterministic pass: final frame {} != {}",
            bad.final_sha256,
            first.final_sha256
        );
    }

    report_percentiles(&runs);

    let summary = json!({
        "ticks_per_pass": first.ticks,
        "frames_per_pass": first.frames,
        "final_sha256": first.final_sha256,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serialize summary")?
    );
    Ok(())
}

fn run_once(args: &BenchArgs) -> anyhow::Result<RunMetrics> {
    let wall = Instant::now();
    let mut m = RunMetrics::default();

    let t0 = Instant::now();
    let font = gridclock::GlyphFont::builtin();
    let geometry = gridclock::GridGeometry::fit(args.width, args.height, args.cell_size, &font)?;
    let mut face = gridclock::ClockFace::new(
        geometry,
        font,
        &gridclock::ClockConfig::default(),
        gridclock::Rng64::new(args.seed),
    )?;
    let value: gridclock::DisplayValue = args
        .time
        .parse()
        .with_context(|| format!("parse --time '{}'", args.time))?;
    face.set_display(value);
    m.setup = t0.elapsed();

    let bound = face.timing().max_pass_ticks();
    let mut last = None;
    loop {
        let t = Instant::now();
        let done = face.tick();
        m.tick_total += t.elapsed();
        m.ticks += 1;

        if done || m.ticks % args.render_every == 0 {
            let t = Instant::now();
            last = Some(face.render_frame()?);
            m.render_total += t.elapsed();
            m.frames += 1;
        }
        if done {
            break;
        }
        if m.ticks >= bound {
            anyhow::bail!("pass did not complete within {bound} ticks");
        }
    }

    let frame = last.context("no frame rendered (bug)")?;
    m.final_sha256 = sha256_hex(&frame.data);
    m.wall_total = wall.elapsed();
    Ok(m)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 200,
        height: 228,
        cell_size: 8,
        time: "12:30".to_string(),
        seed: 1,
        warmup: 1,
        repeats: 50,
        render_every: 1,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--cell-size" => out.cell_size = parse_u32(args.next(), "--cell-size")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--render-every" => out.render_every = parse_u32(args.next(), "--render-every")?,
            "--seed" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --seed"))?;
                out.seed = v
                    .parse()
                    .with_context(|| format!("invalid --seed '{v}'"))?;
            }
            "--time" => {
                out.time = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --time (expected HH:MM)"))?
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        "gridclock-bench: time full reveal passes (tick + CPU render)\n\
         \n\
         USAGE:\n\
         \x20 cargo run --manifest-path bench/Cargo.toml --release -- [options]\n\
         \n\
         OPTIONS:\n\
         \x20 --width <px>          surface width (default 200)\n\
         \x20 --height <px>         surface height (default 228)\n\
         \x20 --cell-size <px>      cell edge (default 8)\n\
         \x20 --time <HH:MM>        value to reveal (default 12:30)\n\
         \x20 --seed <n>            pass seed (default 1)\n\
         \x20 --warmup <n>          untimed runs first (default 1)\n\
         \x20 --repeats <n>         timed runs (default 50)\n\
         \x20 --render-every <n>    render every nth tick (default 1)"
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("invalid {flag} value '{v}'"))
}

fn report_percentiles(runs: &[RunMetrics]) {
    type Getter = fn(&RunMetrics) -> Duration;
    type Field = (&'static str, Getter);

    fn collect(runs: &[RunMetrics], f: Getter) -> Vec<Duration> {
        let mut v = runs.iter().map(f).collect::<Vec<_>>();
        v.sort_by_key(|d| d.as_nanos());
        v
    }

    fn p(v: &[Duration], p: f64) -> Duration {
        if v.is_empty() {
            return Duration::ZERO;
        }
        let n = v.len();
        let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
        v[rank - 1]
    }

    fn fmt_ms(d: Duration) -> String {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }

    let fields: &[Field] = &[
        ("setup", |m| m.setup),
        ("tick_total", |m| m.tick_total),
        ("render_total", |m| m.render_total),
        ("wall_total", |m| m.wall_total),
    ];

    eprintln!("\npercentiles across runs (p50/p90/p99):");
    for (name, getter) in fields {
        let v = collect(runs, *getter);
        eprintln!(
            "  {name:14} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}",
            name = *name,
            p50 = fmt_ms(p(&v, 0.50)),
            p90 = fmt_ms(p(&v, 0.90)),
            p99 = fmt_ms(p(&v, 0.99)),
        );
    }
}
