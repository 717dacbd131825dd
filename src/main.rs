use anyhow::{Context, Result};
use calcpad::calculator::{AngleMode, Engine, split_labels};
use calcpad::config::{Config, OutputFormat};
use calcpad::display::DisplayStrings;
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AngleArg {
    Deg,
    Rad,
}

impl From<AngleArg> for AngleMode {
    fn from(arg: AngleArg) -> Self {
        match arg {
            AngleArg::Deg => AngleMode::Degrees,
            AngleArg::Rad => AngleMode::Radians,
        }
    }
}

/// Press calculator buttons from the terminal.
///
/// Each argument (or each stdin line when no arguments are given) is split
/// into button labels, e.g. `12+3=` or `9 0 sin =`, and the display is
/// printed after it.
#[derive(Debug, Parser)]
#[command(name = "calcpad", version, about)]
struct Cli {
    /// Button labels or runs of labels to press.
    labels: Vec<String>,

    /// Starting angle mode, overriding the config file.
    #[arg(long, value_enum)]
    angle: Option<AngleArg>,

    /// Print each display update as JSON.
    #[arg(long)]
    json: bool,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let angle = cli.angle.map_or(config.angle_mode, AngleMode::from);
    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };

    let mut engine = Engine::with_angle_mode(angle);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.labels.is_empty() {
        for run in &cli.labels {
            press_run(&mut engine, run);
            print_display(&mut out, &engine.display_strings(), format)?;
        }
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        press_run(&mut engine, &line);
        print_display(&mut out, &engine.display_strings(), format)?;
    }

    Ok(())
}

fn press_run(engine: &mut Engine, run: &str) {
    for label in split_labels(run) {
        engine.submit(&label);
    }
}

fn print_display(out: &mut impl Write, strings: &DisplayStrings, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{strings}")?,
        OutputFormat::Json => writeln!(out, "{}", strings.to_json()?)?,
    }
    out.flush()?;
    Ok(())
}
