//! CSV export of the leaderboard
//!
//! Writes the header `Rank,Title,Artist,Genre,Daily Streams (M),Popularity Score,Trend`
//! followed by one row per song in input order. Text columns are always
//! quoted with embedded quotes doubled, so a title like `1989` is written
//! as `"1989"`; numbers are written bare.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::models::Song;

/// Header row of the export
pub const HEADERS: [&str; 7] = [
    "Rank",
    "Title",
    "Artist",
    "Genre",
    "Daily Streams (M)",
    "Popularity Score",
    "Trend",
];

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Quote one text field
fn quoted(text: &str) -> ExportResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_field(text)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    String::from_utf8(bytes).map_err(|_| ExportError::Encoding)
}

/// Render `songs` as CSV text
pub fn to_csv(songs: &[Song]) -> ExportResult<String> {
    let mut header = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(HEADERS)?;
    let buffer = header
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    // text columns arrive pre-quoted, so rows are written verbatim
    let mut rows = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Never)
        .from_writer(buffer);
    for song in songs {
        rows.write_record([
            song.rank.to_string(),
            quoted(&song.title)?,
            quoted(&song.artist)?,
            quoted(&song.genre)?,
            song.daily_streams.to_string(),
            song.popularity_score.to_string(),
            quoted(&song.trend)?,
        ])?;
    }
    let mut bytes = rows
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    // no terminator after the last row
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    String::from_utf8(bytes).map_err(|_| ExportError::Encoding)
}

/// File name for an export made on `date`: `trending_music_<YYYY-MM-DD>.csv`
pub fn file_name(date: NaiveDate) -> String {
    format!("trending_music_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the export for `songs` into `dir`, creating it if needed
pub fn write_to_dir(songs: &[Song], dir: &Path, date: NaiveDate) -> ExportResult<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(file_name(date));
    fs::write(&path, to_csv(songs)?)?;

    tracing::info!(path = %path.display(), songs = songs.len(), "CSV export written");
    Ok(path)
}
