//! Payload types for the NHL stats REST API (`/stats/rest/en`).
//!
//! Every list endpoint wraps its rows as `{"data": [...], "total": N}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiList<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// A row of `GET /team`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub tri_code: Option<String>,
}

/// A row of `GET /season`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSeason {
    /// Compact id, e.g. `20232024`.
    pub id: i64,
    #[serde(default)]
    pub formatted_season_id: Option<String>,
}

/// A row of `GET /game`. Scores are absent for games not yet played.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGame {
    pub id: i64,
    #[serde(default)]
    pub game_date: Option<String>,
    pub home_team_id: i64,
    pub visiting_team_id: i64,
    #[serde(default)]
    pub home_score: Option<i64>,
    #[serde(default)]
    pub visiting_score: Option<i64>,
    #[serde(default)]
    pub game_type: Option<i64>,
    #[serde(default)]
    pub season: Option<i64>,
}
