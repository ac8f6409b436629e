//! Game records: the unvalidated shape from the fetch step, the validated
//! record, and the travel-enriched record.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where the game was played, relative to the tracked team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameLocation {
    Home,
    Away,
}

impl fmt::Display for GameLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Away => write!(f, "Away"),
        }
    }
}

/// Outcome for the tracked team. Anything but more goals scored is a loss,
/// including overtime/shootout losses and ties in older seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    pub fn from_score(goals_for: u32, goals_against: u32) -> Self {
        if goals_for > goals_against {
            Self::Win
        } else {
            Self::Loss
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "Win"),
            Self::Loss => write!(f, "Loss"),
        }
    }
}

/// A game as handed over by the fetch step, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGameRecord {
    pub season: String,
    pub location: String,
    pub opponent: String,
    pub goals_for: i64,
    pub goals_against: i64,
    #[serde(default)]
    pub game_date: Option<String>,
}

/// A validated game, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub season: String,
    pub location: GameLocation,
    pub opponent: String,
    pub goals_for: u32,
    pub goals_against: u32,
    pub result: GameResult,
    pub game_date: NaiveDate,
}

impl GameRecord {
    pub fn new(
        season: impl Into<String>,
        location: GameLocation,
        opponent: impl Into<String>,
        goals_for: u32,
        goals_against: u32,
        game_date: NaiveDate,
    ) -> Self {
        Self {
            season: season.into(),
            location,
            opponent: opponent.into(),
            goals_for,
            goals_against,
            result: GameResult::from_score(goals_for, goals_against),
            game_date,
        }
    }

    /// Validate a raw record. `index` is its position in the input batch and
    /// is carried into any error.
    pub fn from_raw(index: usize, raw: &RawGameRecord) -> Result<Self, RecordError> {
        let date_text = raw
            .game_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RecordError::MissingDate { index })?;
        let game_date = parse_game_date(date_text).ok_or_else(|| RecordError::InvalidDate {
            index,
            value: date_text.to_string(),
        })?;

        let location = match raw.location.trim() {
            "Home" | "home" | "HOME" => GameLocation::Home,
            "Away" | "away" | "AWAY" => GameLocation::Away,
            other => {
                return Err(RecordError::UnknownLocation {
                    index,
                    date: game_date,
                    value: other.to_string(),
                })
            }
        };

        let goals_for = goal_count(index, game_date, "goals_for", raw.goals_for)?;
        let goals_against = goal_count(index, game_date, "goals_against", raw.goals_against)?;

        Ok(Self::new(
            raw.season.clone(),
            location,
            raw.opponent.clone(),
            goals_for,
            goals_against,
            game_date,
        ))
    }
}

/// Validate a whole batch, stopping at the first bad record.
pub fn validate_all(raw: &[RawGameRecord]) -> Result<Vec<GameRecord>, RecordError> {
    validate_indexed(raw.iter().enumerate())
}

/// Validate records that carry their position in some larger input, so
/// errors name that position rather than one within a filtered subset.
pub fn validate_indexed<'a, I>(records: I) -> Result<Vec<GameRecord>, RecordError>
where
    I: IntoIterator<Item = (usize, &'a RawGameRecord)>,
{
    records
        .into_iter()
        .map(|(i, r)| GameRecord::from_raw(i, r))
        .collect()
}

fn goal_count(
    index: usize,
    date: NaiveDate,
    field: &'static str,
    value: i64,
) -> Result<u32, RecordError> {
    u32::try_from(value).map_err(|_| RecordError::InvalidGoals { index, date, field, value })
}

/// Accepts `YYYY-MM-DD` and ISO date-times (`YYYY-MM-DDTHH:MM:SS[Z]`).
pub fn parse_game_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    let s = s.strip_suffix('Z').unwrap_or(s);
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map(|dt| dt.date())
        .ok()
}

/// Per-game travel metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelMetrics {
    pub distance_traveled_miles: f64,
    pub time_zone_change_hours: f64,
    pub rest_days: u32,
}

/// A game plus its travel metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedGameRecord {
    pub game: GameRecord,
    pub travel: TravelMetrics,
}

impl EnrichedGameRecord {
    pub fn distance_traveled_miles(&self) -> f64 {
        self.travel.distance_traveled_miles
    }

    pub fn time_zone_change_hours(&self) -> f64 {
        self.travel.time_zone_change_hours
    }

    pub fn rest_days(&self) -> u32 {
        self.travel.rest_days
    }
}

/// Input validation failures. Fatal for the batch they occur in.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record {index}: missing game date")]
    MissingDate { index: usize },

    #[error("record {index}: unparsable game date '{value}'")]
    InvalidDate { index: usize, value: String },

    #[error("record {index} ({date}): unknown game location '{value}'")]
    UnknownLocation { index: usize, date: NaiveDate, value: String },

    #[error("record {index} ({date}): invalid {field} count {value}")]
    InvalidGoals {
        index: usize,
        date: NaiveDate,
        field: &'static str,
        value: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(location: &str, gf: i64, ga: i64, date: Option<&str>) -> RawGameRecord {
        RawGameRecord {
            season: "2023-2024".into(),
            location: location.into(),
            opponent: "Edmonton Oilers".into(),
            goals_for: gf,
            goals_against: ga,
            game_date: date.map(String::from),
        }
    }

    #[test]
    fn test_result_from_score() {
        assert_eq!(GameResult::from_score(4, 1), GameResult::Win);
        assert_eq!(GameResult::from_score(2, 3), GameResult::Loss);
        assert_eq!(GameResult::from_score(2, 2), GameResult::Loss);
    }

    #[test]
    fn test_from_raw_ok() {
        let g = GameRecord::from_raw(0, &raw("Away", 3, 1, Some("2023-10-11"))).unwrap();
        assert_eq!(g.location, GameLocation::Away);
        assert_eq!(g.result, GameResult::Win);
        assert_eq!(g.game_date, NaiveDate::from_ymd_opt(2023, 10, 11).unwrap());
    }

    #[test]
    fn test_from_raw_datetime() {
        let g = GameRecord::from_raw(0, &raw("Home", 0, 1, Some("2023-10-11T02:00:00Z"))).unwrap();
        assert_eq!(g.game_date, NaiveDate::from_ymd_opt(2023, 10, 11).unwrap());
    }

    #[test]
    fn test_missing_date() {
        let err = GameRecord::from_raw(3, &raw("Home", 1, 0, None)).unwrap_err();
        assert_eq!(err, RecordError::MissingDate { index: 3 });
        let err = GameRecord::from_raw(4, &raw("Home", 1, 0, Some("  "))).unwrap_err();
        assert_eq!(err, RecordError::MissingDate { index: 4 });
    }

    #[test]
    fn test_bad_date() {
        let err = GameRecord::from_raw(1, &raw("Home", 1, 0, Some("2023-13-40"))).unwrap_err();
        assert!(matches!(err, RecordError::InvalidDate { index: 1, .. }));
        assert!(err.to_string().contains("2023-13-40"));
    }

    #[test]
    fn test_negative_goals() {
        let err = GameRecord::from_raw(2, &raw("Away", -1, 0, Some("2023-10-11"))).unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidGoals { index: 2, field: "goals_for", value: -1, .. }
        ));
        assert!(err.to_string().contains("2023-10-11"));
    }

    #[test]
    fn test_unknown_location() {
        let err = GameRecord::from_raw(0, &raw("Neutral", 1, 0, Some("2023-10-11"))).unwrap_err();
        assert!(matches!(err, RecordError::UnknownLocation { .. }));
    }

    #[test]
    fn test_validate_all_reports_first_failure() {
        let batch = vec![
            raw("Home", 1, 0, Some("2023-10-11")),
            raw("Away", 1, 0, None),
            raw("Away", -5, 0, Some("2023-10-14")),
        ];
        let err = validate_all(&batch).unwrap_err();
        assert_eq!(err, RecordError::MissingDate { index: 1 });
    }

    #[test]
    fn test_validate_indexed_keeps_outer_positions() {
        let batch = vec![
            raw("Home", 1, 0, Some("2023-10-11")),
            raw("Away", 1, 0, Some("2023-10-12")),
            raw("Away", -3, 0, Some("2023-10-20")),
        ];
        let subset = [(4, &batch[0]), (7, &batch[2])];
        let err = validate_indexed(subset).unwrap_err();
        assert!(matches!(err, RecordError::InvalidGoals { index: 7, .. }));
        assert_eq!(validate_indexed([(9, &batch[1])]).unwrap().len(), 1);
    }

    #[test]
    fn test_raw_deserialize_without_date() {
        let json = r#"{"season":"2023-2024","location":"Home","opponent":"Dallas Stars","goals_for":2,"goals_against":1}"#;
        let r: RawGameRecord = serde_json::from_str(json).unwrap();
        assert!(r.game_date.is_none());
    }
}
