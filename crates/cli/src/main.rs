#![deny(unsafe_code)]
//! CLI binary for the bz-lab simulation workspace.
//!
//! Subcommands:
//! - `render <engine>` — run an engine N steps, write a PNG snapshot
//! - `replay <spec.json>` — re-run a saved run spec bit-identically
//! - `list` — print available engines, boundary policies, and color maps

mod error;

use bz_lab_bz::Boundary;
use bz_lab_core::{Engine, Seed};
use bz_lab_engines::pixel::ColorMap;
use bz_lab_engines::EngineKind;
use clap::{Parser, Subcommand};
use error::CliError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "bz-lab", about = "Belousov-Zhabotinsky cellular automaton CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an engine for N steps and write a PNG snapshot.
    Render {
        /// Engine name (e.g. "bz").
        engine: String,

        /// Grid side length in cells (grids are square).
        #[arg(short, long, default_value_t = 300)]
        size: usize,

        /// Number of simulation steps.
        #[arg(long, default_value_t = 500)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Boundary policy (wrap, open, clamp).
        #[arg(short, long, default_value = "wrap")]
        boundary: String,

        /// Domain mask (none, disk). Disk forces the open boundary.
        #[arg(short, long, default_value = "none")]
        mask: String,

        /// Color map name (soft, triad, turbo).
        #[arg(short, long, default_value = "soft")]
        colormap: String,

        /// Disturbance applied to the initial state, as "ROW,COL". Repeatable.
        #[arg(long = "disturb", value_name = "ROW,COL")]
        disturbances: Vec<String>,

        /// Print mean substrate levels to stderr every N steps (0 = off).
        #[arg(long, default_value_t = 0)]
        trace_every: usize,

        /// Write a replayable run spec to this path.
        #[arg(long, value_name = "FILE")]
        save_spec: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Extra engine parameters as a JSON object string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Re-run a saved run spec and write a PNG snapshot.
    Replay {
        /// Path to a run spec written by `render --save-spec`.
        spec: PathBuf,

        /// Color map name (soft, triad, turbo).
        #[arg(short, long, default_value = "soft")]
        colormap: String,

        /// Output file path.
        #[arg(short, long, default_value = "replay.png")]
        output: PathBuf,
    },
    /// List available engines, boundary policies, and color maps.
    List,
}

/// Parses a "ROW,COL" disturbance coordinate pair.
fn parse_disturbance(text: &str) -> Result<(isize, isize), CliError> {
    let mut parts = text.splitn(2, ',');
    let row = parts.next().and_then(|p| p.trim().parse::<isize>().ok());
    let col = parts.next().and_then(|p| p.trim().parse::<isize>().ok());
    match (row, col) {
        (Some(row), Some(col)) => Ok((row, col)),
        _ => Err(CliError::Input(format!(
            "invalid --disturb '{text}': expected ROW,COL"
        ))),
    }
}

/// Merges the boundary/mask flags into the --params JSON object so the
/// resulting spec is self-contained.
fn merge_params(
    params: &str,
    boundary: &str,
    mask: &str,
) -> Result<serde_json::Value, CliError> {
    let mut value: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let object = value
        .as_object_mut()
        .ok_or_else(|| CliError::Input("--params must be a JSON object".into()))?;
    object.insert("boundary".into(), boundary.into());
    object.insert("mask".into(), mask.into());
    Ok(value)
}

/// Builds the engine a spec describes, applies its recorded disturbances to
/// the initial state, and runs it for the recorded number of steps.
///
/// Both `render` and `replay` go through this, so a replayed spec reproduces
/// the original run bit-for-bit.
fn run_spec(spec: &Seed, trace_every: usize) -> Result<EngineKind, CliError> {
    let mut engine = EngineKind::from_name(
        &spec.engine,
        spec.width,
        spec.height,
        spec.seed,
        &spec.params,
    )?;
    for &(row, col) in &spec.disturbances {
        engine.disturb(row, col)?;
    }
    run_steps(&mut engine, spec.steps, trace_every)?;
    Ok(engine)
}

/// Runs an engine for `steps` ticks, optionally tracing substrate levels.
fn run_steps(
    engine: &mut EngineKind,
    steps: usize,
    trace_every: usize,
) -> Result<(), CliError> {
    for i in 0..steps {
        engine.step()?;
        if trace_every > 0 && (i + 1) % trace_every == 0 {
            if let Some([a, b, c]) = engine.substrates() {
                eprintln!(
                    "step {}: a={:.4} b={:.4} c={:.4}",
                    i + 1,
                    a.mean(),
                    b.mean(),
                    c.mean()
                );
            }
        }
    }
    Ok(())
}

/// Reports the finished run, in JSON or human-readable form.
fn report(json_mode: bool, seed_spec: &Seed, engine: &EngineKind, output: &Path) {
    let levels = engine
        .substrates()
        .map(|[a, b, c]| (a.mean(), b.mean(), c.mean()));
    if json_mode {
        let mut info = serde_json::json!({
            "engine": seed_spec.engine,
            "width": seed_spec.width,
            "height": seed_spec.height,
            "steps": seed_spec.steps,
            "seed": seed_spec.seed,
            "output": output.display().to_string(),
        });
        if let Some((a, b, c)) = levels {
            info["mean_a"] = a.into();
            info["mean_b"] = b.into();
            info["mean_c"] = c.into();
        }
        println!("{}", serde_json::to_string_pretty(&info).unwrap_or_default());
    } else {
        eprintln!(
            "rendered {} ({}x{}, {} steps, seed {}) -> {}",
            seed_spec.engine,
            seed_spec.width,
            seed_spec.height,
            seed_spec.steps,
            seed_spec.seed,
            output.display()
        );
        if let Some((a, b, c)) = levels {
            eprintln!("mean levels: a={a:.4} b={b:.4} c={c:.4}");
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            let boundaries = Boundary::list_names();
            let colormaps = ColorMap::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "engines": engines,
                    "boundaries": boundaries,
                    "colormaps": colormaps,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
                println!("Boundaries:");
                println!("  {}", boundaries.join(", "));
                println!("Color maps:");
                println!("  {}", colormaps.join(", "));
            }
        }
        Command::Render {
            engine,
            size,
            steps,
            seed,
            boundary,
            mask,
            colormap,
            disturbances,
            trace_every,
            save_spec,
            output,
            params,
        } => {
            let colormap =
                ColorMap::from_name(&colormap).map_err(|e| CliError::Input(e.to_string()))?;

            let mut seed_spec = Seed::new(&engine, size, size, seed);
            seed_spec.params = merge_params(&params, &boundary, &mask)?;
            seed_spec.steps = steps;
            for text in &disturbances {
                seed_spec.disturbances.push(parse_disturbance(text)?);
            }

            let eng = run_spec(&seed_spec, trace_every)?;

            bz_lab_engines::snapshot::write_png(&eng, colormap, &output)?;

            if let Some(path) = &save_spec {
                let json = serde_json::to_string_pretty(&seed_spec)?;
                fs::write(path, json)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            }

            report(cli.json, &seed_spec, &eng, &output);
        }
        Command::Replay {
            spec,
            colormap,
            output,
        } => {
            let colormap =
                ColorMap::from_name(&colormap).map_err(|e| CliError::Input(e.to_string()))?;
            let text = fs::read_to_string(&spec)
                .map_err(|e| CliError::Io(format!("{}: {e}", spec.display())))?;
            let seed_spec: Seed = serde_json::from_str(&text)?;
            seed_spec.validate()?;

            let eng = run_spec(&seed_spec, 0)?;

            bz_lab_engines::snapshot::write_png(&eng, colormap, &output)?;

            report(cli.json, &seed_spec, &eng, &output);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
