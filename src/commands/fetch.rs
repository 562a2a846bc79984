use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;

use sonicpulse::analytics::{forecast_paragraphs, HeadlineStats};
use sonicpulse::config::Config;
use sonicpulse::export::write_to_dir;
use sonicpulse::provider::Provider;
use sonicpulse::trends::{ForecastGenerator, TrendFetcher};
use sonicpulse::utils::truncate_text;
use sonicpulse::{AnalyticsData, Song};

use super::build_provider;

pub async fn fetch(
    config: &Config,
    json: bool,
    export: Option<PathBuf>,
    forecast: bool,
) -> Result<()> {
    let provider = build_provider(config)?;

    let data = TrendFetcher::new(provider.clone())
        .fetch()
        .await
        .context("Failed to fetch real-time music data")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_report(&data);
    }

    if let Some(dir) = export {
        let path = write_to_dir(&data.songs, &dir, Utc::now().date_naive())?;
        eprintln!("CSV written to {}", path.display());
    }

    if forecast {
        if let Some(text) = try_forecast(provider, &data.songs).await {
            print_forecast(&text);
        }
    }

    Ok(())
}

/// Forecast `songs`, logging a failure instead of returning it
async fn try_forecast(provider: Arc<dyn Provider>, songs: &[Song]) -> Option<String> {
    match ForecastGenerator::new(provider).forecast(songs).await {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!(error = %e, "Forecast generation failed");
            None
        }
    }
}

/// Print the leaderboard, headline stats, summary and sources
pub fn print_report(data: &AnalyticsData) {
    let stats = HeadlineStats::from_data(data);

    println!("Trending Pulse - Top {} Worldwide", data.songs.len());
    println!("================================");
    println!(
        "Top artist: {} | Dominant genre: {} | Last sync: {}",
        stats.top_artist.as_deref().unwrap_or("-"),
        stats.dominant_genre.as_deref().unwrap_or("-"),
        stats.last_sync
    );
    println!();

    println!(
        "{:>4}  {:<28}  {:<24}  {:<12}  {:>9}  {:>5}  {}",
        "Rank", "Title", "Artist", "Genre", "Streams", "Score", "Trend"
    );
    for song in &data.songs {
        println!(
            "{:>4}  {:<28}  {:<24}  {:<12}  {:>8}M  {:>5}  {} {}",
            format!("#{}", song.rank),
            truncate_text(&song.title, 28),
            truncate_text(&song.artist, 24),
            truncate_text(&song.genre, 12),
            song.daily_streams,
            song.popularity_score,
            song.trend_direction().symbol(),
            song.trend
        );
    }

    if !data.summary.is_empty() {
        println!();
        println!("Summary");
        println!("-------");
        println!("{}", data.summary);
    }

    if !data.sources.is_empty() {
        println!();
        println!("Grounding Sources");
        println!("-----------------");
        for source in &data.sources {
            println!("  - {} <{}>", source.title, source.uri);
        }
    }
}

/// Print forecast paragraphs separated by blank lines
pub fn print_forecast(text: &str) {
    println!();
    println!("90-Day Forecast");
    println!("---------------");
    for paragraph in forecast_paragraphs(text) {
        println!("{paragraph}");
        println!();
    }
}
