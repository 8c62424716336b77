//! Contagion Grid Simulation Runner
//!
//! Generates (or parses) a grid, renders it after every propagation step
//! and reports how long the infection takes to saturate.
//!
//! Usage:
//!   cargo run -p contagion-sim
//!   cargo run -p contagion-sim -- --rows 10 --cols 20 --seed 7
//!   cargo run -p contagion-sim -- --layout "AAA/AIA/AAA" --json

mod args;
mod harness;
mod logger;

use std::fmt;

use contagion_logic::generation::{generate_seeded, ConfigError, GenerationConfig};
use contagion_logic::layout::{parse_layout, LayoutError};
use contagion_logic::render::render_grid;
use contagion_logic::{Census, Grid, StepObserver};
use log::LevelFilter;
use rand::Rng;
use serde::Serialize;

use args::{ArgError, Options, USAGE};

// ── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug)]
enum RunError {
    Config(ConfigError),
    Layout(LayoutError),
    Json(serde_json::Error),
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}

impl From<LayoutError> for RunError {
    fn from(e: LayoutError) -> Self {
        RunError::Layout(e)
    }
}

impl From<serde_json::Error> for RunError {
    fn from(e: serde_json::Error) -> Self {
        RunError::Json(e)
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "invalid configuration: {}", e),
            RunError::Layout(e) => write!(f, "invalid layout: {}", e),
            RunError::Json(e) => write!(f, "JSON encoding failed: {}", e),
        }
    }
}

impl std::error::Error for RunError {}

// ── Output ──────────────────────────────────────────────────────────────

/// Prints the grid after every step.
struct ConsoleRenderer;

impl StepObserver for ConsoleRenderer {
    fn on_step(&mut self, step: usize, grid: &Grid) {
        log::debug!("rendering step {}", step);
        print!("{}", render_grid(grid));
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: Option<u64>,
    config: Option<&'a GenerationConfig>,
    rows: usize,
    cols: usize,
    steps: usize,
    saturation_time: u32,
    census: Census,
    infection_times: Vec<Vec<Option<u32>>>,
}

// ── Entry point ─────────────────────────────────────────────────────────

fn main() {
    let options = match args::parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => exit_with_usage(&e),
    };

    if options.help {
        println!("{}", USAGE);
        return;
    }

    logger::init(if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });

    if options.selfcheck {
        if !harness::run(options.verbose) {
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run(&options) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(2);
    }
}

fn exit_with_usage(e: &ArgError) -> ! {
    eprintln!("error: {}\n\n{}", e, USAGE);
    std::process::exit(2);
}

fn run(options: &Options) -> Result<(), RunError> {
    let (mut grid, seed) = match &options.layout {
        Some(text) => (parse_layout(text)?, None),
        None => {
            let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
            log::info!("generating grid with seed {}", seed);
            (generate_seeded(&options.config, seed)?, Some(seed))
        }
    };

    if !options.json {
        print!("{}", render_grid(&grid));
    }

    let seconds = if options.quiet || options.json {
        grid.run()
    } else {
        grid.run_with(&mut ConsoleRenderer)
    };

    if options.json {
        let summary = Summary {
            seed,
            config: seed.map(|_| &options.config),
            rows: grid.rows(),
            cols: grid.cols(),
            steps: grid.steps(),
            saturation_time: seconds,
            census: grid.census(),
            infection_times: grid.infection_times(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Matrix would be infected in {} seconds", seconds);
    }
    Ok(())
}
