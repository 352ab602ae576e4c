//! `ais-refresh`: pull the current port vessel list from MyShipTracking and
//! rewrite the dashboard's AIS fixture.
//!
//! Credentials come from the environment or a `.env` file. The output file
//! is written only after the whole fetch succeeds.

mod client;
mod env;
mod error;
mod normalize;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use reqwest::Client;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::env::{load_env_file, Settings};
use crate::error::RefreshError;

#[derive(Parser, Debug)]
#[command(author, version, about = "Refresh the AIS vessel fixture from MyShipTracking")]
struct Args {
    /// Output file
    #[arg(long, default_value = "data/ais-data.json")]
    output: PathBuf,

    /// Env file consulted after the process environment
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match refresh(&args.env_file, &args.output).await {
        Ok(count) => {
            info!(path = %args.output.display(), vessels = count, "AIS data updated");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "failed to refresh AIS data");
            ExitCode::FAILURE
        }
    }
}

async fn refresh(env_file: &Path, output: &Path) -> Result<u32, RefreshError> {
    let file_env = load_env_file(env_file).await;
    let settings = Settings::resolve(|key| std::env::var(key).ok(), &file_env)?;

    info!(port = %settings.port, "fetching AIS data");
    let client = Client::new();
    let payload = client::fetch(&client, &settings).await?;

    let dataset = normalize::normalize(&payload, &settings.port, chrono::Utc::now());
    if dataset.vessels_in_port == 0 {
        warn!("API response contained no vessels; file will still be updated");
    }

    let mut json = serde_json::to_string_pretty(&dataset)?;
    json.push('\n');
    tokio::fs::write(output, json)
        .await
        .map_err(|source| RefreshError::Write {
            path: output.to_path_buf(),
            source,
        })?;
    Ok(dataset.vessels_in_port)
}
