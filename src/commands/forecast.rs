use anyhow::{Context, Result};
use std::path::PathBuf;

use sonicpulse::config::Config;
use sonicpulse::trends::{ForecastGenerator, TrendFetcher};

use super::fetch::print_forecast;
use super::{build_provider, load_snapshot};

pub async fn forecast(config: &Config, input: Option<PathBuf>) -> Result<()> {
    let provider = build_provider(config)?;

    let data = match input {
        Some(path) => load_snapshot(&path)?,
        None => TrendFetcher::new(provider.clone())
            .fetch()
            .await
            .context("Failed to fetch real-time music data")?,
    };

    println!("Forecasting {} songs...", data.songs.len());

    let text = ForecastGenerator::new(provider)
        .forecast(&data.songs)
        .await
        .context("Forecast generation failed")?;
    print_forecast(&text);

    Ok(())
}
