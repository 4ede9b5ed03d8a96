//! dungeon-gen: generate a room layout from the command line
//!
//! Settings come from the defaults, then an optional JSON config file, then
//! command-line flags.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, Log, Metadata, Record};
use thiserror::Error;

use dg_core::{Dungeon, GenerationError, GeneratorConfig, ReseedStrategy, WallPolicy};

/// Seeded BSP room-layout generator
#[derive(Parser, Debug)]
#[command(name = "dungeon-gen")]
#[command(author, version, about = "Generate a connected room layout", long_about = None)]
struct Args {
    /// Dungeon width in cells
    #[arg(short = 'W', long)]
    width: Option<i32>,

    /// Dungeon height in cells
    #[arg(short = 'H', long)]
    height: Option<i32>,

    /// Minimum room dimension
    #[arg(short = 'm', long = "min-size")]
    min_size: Option<i32>,

    /// Percentage of rooms to try removing (0-100)
    #[arg(short = 'p', long = "prune")]
    prune: Option<f64>,

    /// Initial seed
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Attempts per seed before reseeding
    #[arg(long = "max-attempts")]
    max_attempts: Option<u32>,

    /// Reseeds allowed before giving up
    #[arg(long = "max-reseeds", conflicts_with = "unbounded")]
    max_reseeds: Option<u32>,

    /// Keep reseeding until a layout connects
    #[arg(long)]
    unbounded: bool,

    /// Derive new seeds from the current stream instead of system entropy
    #[arg(long = "derived-reseed")]
    derived_reseed: bool,

    /// Leave walls shared by two rooms open
    #[arg(long = "open-seams")]
    open_seams: bool,

    /// JSON file with generator settings
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// More logging on stderr (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Map dump, top row first
    Ascii,
    /// The full dungeon as JSON
    Json,
    /// Run statistics and room list
    Summary,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Plain stderr logger, filtered by `-v`
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    // A logger may already be installed when embedded; keep it
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_for(verbose));
    }
}

fn load_config_file(path: &Path) -> Result<GeneratorConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Apply command-line overrides on top of a base config
fn apply_args(mut config: GeneratorConfig, args: &Args) -> GeneratorConfig {
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(min_size) = args.min_size {
        config.room_min_size = min_size;
    }
    if let Some(prune) = args.prune {
        config.percent_rooms_to_remove = prune;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(attempts) = args.max_attempts {
        config.max_attempts = attempts;
    }
    if args.unbounded {
        config.max_reseeds = None;
    } else if let Some(reseeds) = args.max_reseeds {
        config.max_reseeds = Some(reseeds);
    }
    if args.derived_reseed {
        config.reseed = ReseedStrategy::Derived;
    }
    if args.open_seams {
        config.wall_policy = WallPolicy::OpenSharedEdges;
    }
    config
}

fn build_config(args: &Args) -> Result<GeneratorConfig, CliError> {
    let base = match &args.config {
        Some(path) => load_config_file(path)?,
        None => GeneratorConfig::default(),
    };
    Ok(apply_args(base, args))
}

fn summary(dungeon: &Dungeon) -> String {
    let mut out = format!(
        "seed {} attempt {} reseeds {}\n{} rooms, {} doors, {} wall segments{}\n",
        dungeon.seed,
        dungeon.attempt,
        dungeon.reseeds,
        dungeon.rooms.len(),
        dungeon.doors.len(),
        dungeon.walls.len(),
        if dungeon.pruned { " (pruned)" } else { "" }
    );
    for room in &dungeon.rooms {
        let neighbors: Vec<String> = dungeon
            .door_graph
            .neighbors(room.id)
            .map(|id| id.to_string())
            .collect();
        out.push_str(&format!(
            "{} at ({}, {}) {}x{} -> [{}]\n",
            room.id,
            room.x,
            room.y,
            room.width,
            room.height,
            neighbors.join(", ")
        ));
    }
    out
}

fn render(dungeon: &Dungeon, format: Format) -> Result<String, CliError> {
    Ok(match format {
        Format::Ascii => dungeon.grid().to_string(),
        Format::Json => serde_json::to_string_pretty(dungeon)? + "\n",
        Format::Summary => summary(dungeon),
    })
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = build_config(args)?;
    log::debug!("config: {:?}", config);

    let dungeon = dg_core::generate_dungeon(&config)?;
    let output = render(&dungeon, args.format)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
