//! Minkowski diagram viewer CLI
//!
//! The hosting application for the engine: loads a scene from a JSON file or
//! a built-in demo, applies observer and time overrides, optionally runs the
//! time-scrub animation, and emits the renderable scene as JSON or a text
//! listing for downstream drawing.

mod scenarios;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minkowski_core::render::background;
use minkowski_core::{Animator, Scene, SceneSpec, Universe};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "minkowski-viewer")]
#[command(about = "Render Minkowski spacetime diagrams from scene specs", long_about = None)]
struct Args {
    /// Scene specification file (JSON). Overrides --demo.
    scene: Option<PathBuf>,

    /// Built-in demo scene (basic, approaching)
    #[arg(short, long, default_value = "basic")]
    demo: scenarios::DemoScene,

    /// Override the time cursor
    #[arg(short, long)]
    time: Option<f64>,

    /// Boost the root observer to this velocity (fraction of c)
    #[arg(short = 'V', long)]
    observer_velocity: Option<f64>,

    /// Run the time scrub (-4 to +4) over this many seconds before emitting
    #[arg(short, long)]
    animate: Option<f64>,

    /// Half-length used to materialize axes and worldlines
    #[arg(short, long, default_value = "10.0")]
    extent: f64,

    /// Include the coordinate grid and light cone in the output
    #[arg(short, long)]
    grid: bool,

    /// Emit the scene as JSON instead of a text listing
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let spec = match &args.scene {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read scene file {}", path.display()))?;
            SceneSpec::from_json(&text)
                .with_context(|| format!("failed to parse scene file {}", path.display()))?
        }
        None => {
            info!(demo = args.demo.name(), "loading built-in demo");
            args.demo.spec()
        }
    };

    let mut universe = Universe::load(&spec).context("failed to load scene")?;

    if let Some(v) = args.observer_velocity {
        universe
            .set_root_velocity(v)
            .context("invalid observer velocity")?;
    }
    if let Some(t) = args.time {
        universe.set_time(t).context("invalid time")?;
    }

    if let Some(seconds) = args.animate {
        run_animation(&mut universe, seconds)?;
    }

    let scene = universe.renderables(args.extent);
    if args.json {
        emit_json(&scene, &args)?;
    } else {
        print!("{}", render_text(&scene, args.grid, args.extent));
    }

    Ok(())
}

/// Drives the animator with wall-clock timestamps at roughly 30 Hz,
/// applying each step's time to the universe until the run halts.
fn run_animation(universe: &mut Universe, seconds: f64) -> anyhow::Result<()> {
    let duration = Duration::try_from_secs_f64(seconds).with_context(|| {
        format!("invalid animation duration {seconds}: expected a finite, non-negative number of seconds")
    })?;
    let frame = Duration::from_millis(33);
    let mut animator = Animator::new(-4.0, 4.0, duration);

    let origin = Instant::now();
    universe.set_time(animator.begin())?;
    info!(seconds, "starting time scrub");

    while let Some(step) = animator.step(origin.elapsed()) {
        universe.set_time(step.time)?;
        debug!(time = step.time, "scrub step");
        if !step.reschedule {
            break;
        }
        std::thread::sleep(frame);
    }

    info!(time = universe.time(), "time scrub finished");
    Ok(())
}

fn emit_json(scene: &Scene, args: &Args) -> anyhow::Result<()> {
    let payload = serde_json::json!({
        "scene": scene,
        "background": args.grid.then(|| background(args.extent, 1.0)),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// The text listing: one descriptor per line, mirroring what JSON mode
/// emits (including the background when requested).
fn render_text(scene: &Scene, grid: bool, extent: f64) -> String {
    let mut out = Vec::new();
    if let Some(description) = &scene.description {
        out.push(description.clone());
        out.push(String::new());
    }
    if grid {
        for line in background(extent, 1.0) {
            out.push(segment_row("background", &line));
        }
    }
    for line in &scene.axes {
        out.push(segment_row("axis", line));
    }
    for line in &scene.worldlines {
        out.push(segment_row("worldline", line));
    }
    for marker in &scene.events {
        out.push(marker_row("event", marker));
    }
    for marker in &scene.now_markers {
        out.push(marker_row("now", marker));
    }
    out.push(String::new());
    out.join("\n")
}

fn segment_row(label: &str, line: &minkowski_core::Line) -> String {
    format!(
        "{label:<10} ({:+.4}, {:+.4}) -> ({:+.4}, {:+.4})  {}",
        line.points[0].x, line.points[0].y, line.points[1].x, line.points[1].y, line.color
    )
}

fn marker_row(label: &str, marker: &minkowski_core::Marker) -> String {
    format!(
        "{label:<10} ({:+.4}, {:+.4})  {}",
        marker.position.x, marker.position.y, marker.color
    )
}
