//! `harbor`: headless host for the seaport dashboard.
//!
//! `run` drives the frame loop and streams one JSON snapshot per emitted
//! frame to stdout while reading JSON commands from stdin. `layout` and
//! `panels` print the static scene and the text panels. Logs go to stderr.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use harbor_app::frame_loop::{FrameLoop, LoopSettings, WallClock};
use harbor_app::input::spawn_stdin_reader;
use harbor_app::sink::JsonLinesSink;
use harbor_app::{open_session, AppError};
use harbor_core::commands::DashboardCommand;
use harbor_core::config::DashboardConfig;
use harbor_core::fixtures::Fixtures;
use harbor_geo::sun_position;

const DEFAULT_CONFIG: &str = "harbor-config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Seaport dashboard scene and motion host")]
struct Cli {
    /// Config file (defaults to ./harbor-config.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the frame loop, streaming JSON snapshots to stdout
    Run {
        /// Stop after this many frames
        #[arg(long)]
        frames: Option<u64>,

        /// Scenario to play on the first frame
        #[arg(long)]
        scenario: Option<String>,

        /// Do not read commands from stdin
        #[arg(long)]
        no_stdin: bool,
    },

    /// Print the projected static layout as JSON
    Layout,

    /// Print the text panels
    Panels {
        /// Show this scenario as playing
        #[arg(long)]
        scenario: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            error!(%err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging.level);

    let result = match cli.command {
        Command::Run {
            frames,
            scenario,
            no_stdin,
        } => run(&config, frames, scenario, no_stdin),
        Command::Layout => print_layout(&config),
        Command::Panels { scenario } => print_panels(&config, scenario.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "harbor failed");
            ExitCode::FAILURE
        }
    }
}

/// Stderr only; stdout carries the JSON stream.
fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig, AppError> {
    match path {
        Some(path) => Ok(DashboardConfig::from_file(path)?),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Ok(DashboardConfig::from_file(Path::new(DEFAULT_CONFIG))?)
        }
        None => Ok(DashboardConfig::default()),
    }
}

fn run(
    config: &DashboardConfig,
    frames: Option<u64>,
    scenario: Option<String>,
    no_stdin: bool,
) -> Result<(), AppError> {
    let session = open_session(config)?;
    if let Some(key) = &scenario {
        if !session.fixtures().scenarios.contains_key(key) {
            return Err(AppError::UnknownScenario { key: key.clone() });
        }
    }

    let mut frame_loop = FrameLoop::new(
        session,
        WallClock::new(config.frame.target_fps),
        LoopSettings::from(&config.frame),
    );
    let handle = frame_loop.handle();
    if let Some(key) = scenario {
        handle.send(DashboardCommand::PlayScenario { key });
    }
    if !no_stdin {
        let _reader = spawn_stdin_reader(handle)?;
    }

    let mut sink = JsonLinesSink::new(io::stdout().lock());
    let summary = frame_loop.run(&mut sink, frames)?;
    info!(frames = summary.frames, emitted = summary.emitted, "run finished");
    Ok(())
}

fn print_layout(config: &DashboardConfig) -> Result<(), AppError> {
    let session = open_session(config)?;
    let projection = session.projection();
    let layout = &session.fixtures().layout;

    let output = json!({
        "port_name": layout.port_name,
        "origin": projection.origin(),
        "scale": projection.scale(),
        "sun": sun_position(layout, projection),
        "markers": session.layout_markers(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_panels(config: &DashboardConfig, scenario: Option<&str>) -> Result<(), AppError> {
    let fixtures = Fixtures::load(&config.data)?;
    if let Some(key) = scenario {
        if !fixtures.scenarios.contains_key(key) {
            return Err(AppError::UnknownScenario {
                key: key.to_string(),
            });
        }
    }

    let panels = harbor_panels::render_dashboard(&fixtures, scenario, chrono::Utc::now());
    for panel in panels {
        println!("{panel}");
    }
    Ok(())
}
