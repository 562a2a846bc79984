use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

use sonicpulse::config::Config;
use sonicpulse::export::write_to_dir;
use sonicpulse::trends::TrendFetcher;

use super::{build_provider, load_snapshot};

pub async fn export(config: &Config, output: PathBuf, input: Option<PathBuf>) -> Result<()> {
    let data = match input {
        Some(path) => load_snapshot(&path)?,
        None => TrendFetcher::new(build_provider(config)?)
            .fetch()
            .await
            .context("Failed to fetch real-time music data")?,
    };

    let path = write_to_dir(&data.songs, &output, Utc::now().date_naive())
        .with_context(|| format!("Failed to export into {}", output.display()))?;

    println!("Exported {} songs to {}", data.songs.len(), path.display());
    Ok(())
}
