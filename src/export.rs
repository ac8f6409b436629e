//! Per-season JSON/CSV export of enriched game records.

use crate::error::AppError;
use crate::game::{EnrichedGameRecord, GameLocation, GameResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Column order of every export, JSON keys included.
pub const FIELDS: [&str; 10] = [
    "Season",
    "Game Location",
    "Opponent Team",
    "Distance Traveled (miles)",
    "Time Zone Change",
    "Rest Days",
    "Goals Scored",
    "Goals Conceded",
    "Result",
    "Game Date",
];

/// Which files to write per season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Json,
    Csv,
    #[default]
    Both,
}

impl ExportFormat {
    fn json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    fn csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }
}

/// One persisted row. Field order matches [`FIELDS`].
#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    #[serde(rename = "Season")]
    pub season: &'a str,
    #[serde(rename = "Game Location")]
    pub location: GameLocation,
    #[serde(rename = "Opponent Team")]
    pub opponent: &'a str,
    #[serde(rename = "Distance Traveled (miles)")]
    pub distance_traveled_miles: f64,
    #[serde(rename = "Time Zone Change")]
    pub time_zone_change_hours: f64,
    #[serde(rename = "Rest Days")]
    pub rest_days: u32,
    #[serde(rename = "Goals Scored")]
    pub goals_scored: u32,
    #[serde(rename = "Goals Conceded")]
    pub goals_conceded: u32,
    #[serde(rename = "Result")]
    pub result: GameResult,
    #[serde(rename = "Game Date")]
    pub game_date: NaiveDate,
}

impl<'a> From<&'a EnrichedGameRecord> for ExportRow<'a> {
    fn from(r: &'a EnrichedGameRecord) -> Self {
        Self {
            season: &r.game.season,
            location: r.game.location,
            opponent: &r.game.opponent,
            distance_traveled_miles: r.travel.distance_traveled_miles,
            time_zone_change_hours: r.travel.time_zone_change_hours,
            rest_days: r.travel.rest_days,
            goals_scored: r.game.goals_for,
            goals_conceded: r.game.goals_against,
            result: r.game.result,
            game_date: r.game.game_date,
        }
    }
}

impl ExportRow<'_> {
    fn cells(&self) -> Vec<String> {
        vec![
            self.season.to_string(),
            self.location.to_string(),
            self.opponent.to_string(),
            self.distance_traveled_miles.to_string(),
            self.time_zone_change_hours.to_string(),
            self.rest_days.to_string(),
            self.goals_scored.to_string(),
            self.goals_conceded.to_string(),
            self.result.to_string(),
            self.game_date.format("%Y-%m-%d").to_string(),
        ]
    }
}

/// `<prefix>_game_history_<season>`
pub fn file_stem(prefix: &str, season: &str) -> String {
    format!("{}_game_history_{}", prefix, season)
}

/// Pretty-printed JSON array of row objects.
pub fn to_json_string(records: &[EnrichedGameRecord]) -> Result<String, AppError> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(ExportRow::from).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/* ---------------- CSV ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single delimited row to any writer.
pub fn write_row<W: Write>(w: &mut W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header plus one row per record, comma separated.
pub fn to_csv_string(records: &[EnrichedGameRecord]) -> String {
    let mut out: Vec<u8> = Vec::new();
    let header: Vec<String> = FIELDS.iter().map(|s| s.to_string()).collect();
    // Writing into a Vec<u8> cannot fail.
    let _ = write_row(&mut out, &header, ',');
    for r in records {
        let _ = write_row(&mut out, &ExportRow::from(r).cells(), ',');
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Write one season's files into `out_dir`. Returns the paths written.
/// An empty season gets an empty JSON array and no CSV.
pub fn write_season(
    out_dir: &Path,
    prefix: &str,
    season: &str,
    records: &[EnrichedGameRecord],
    format: ExportFormat,
) -> Result<Vec<PathBuf>, AppError> {
    if !out_dir.as_os_str().is_empty() {
        fs::create_dir_all(out_dir)?;
    }
    let stem = file_stem(prefix, season);
    let mut written = Vec::new();

    if format.json() {
        let path = out_dir.join(format!("{}.json", stem));
        fs::write(&path, to_json_string(records)?)?;
        info!(path = %path.display(), games = records.len(), "game history saved");
        written.push(path);
    }

    if format.csv() {
        if records.is_empty() {
            info!(season, "no data to save, CSV skipped");
        } else {
            let path = out_dir.join(format!("{}.csv", stem));
            fs::write(&path, to_csv_string(records))?;
            info!(path = %path.display(), games = records.len(), "game history saved");
            written.push(path);
        }
    }

    Ok(written)
}
