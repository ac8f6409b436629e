//! Blocking client for the NHL stats REST API.
//!
//! One request per call, no retry. Status and transport failures surface as
//! [`AppError`] for the caller to report.

use super::types::{ApiGame, ApiList, ApiSeason, ApiTeam};
use crate::error::AppError;
use crate::season::Season;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.nhle.com/stats/rest/en";

const USER_AGENT: &str = concat!("rink-travel/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub struct StatsClient {
    base_url: String,
    timeout: Duration,
}

impl Default for StatsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl StatsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        debug!(url, "GET");
        let response = ureq::get(url)
            .set("User-Agent", USER_AGENT)
            .timeout(self.timeout)
            .call()?;
        response
            .into_json::<T>()
            .map_err(|e| AppError::invalid_response(format!("{} ({})", e, url)))
    }

    /// `GET /team`: every team the API knows, defunct ones included.
    pub fn teams(&self) -> Result<Vec<ApiTeam>, AppError> {
        let url = format!("{}/team", self.base_url);
        let list: ApiList<ApiTeam> = self.get_json(&url)?;
        Ok(list.data)
    }

    /// `GET /season`: the most recent season listed.
    pub fn latest_season(&self) -> Result<Season, AppError> {
        let url = format!("{}/season", self.base_url);
        let list: ApiList<ApiSeason> = self.get_json(&url)?;
        list.data
            .iter()
            .map(|s| s.id)
            .max()
            .and_then(Season::from_api_id)
            .ok_or_else(|| AppError::invalid_response("season list is empty or malformed"))
    }

    /// `GET /game` for one team between two dates, both inclusive.
    pub fn game_history(
        &self,
        team_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ApiGame>, AppError> {
        let expr = cayenne_expression(team_id, start, end);
        let url = format!("{}/game?cayenneExp={}", self.base_url, urlencode(&expr));
        let list: ApiList<ApiGame> = self.get_json(&url)?;
        debug!(team_id, %start, %end, games = list.data.len(), "fetched game history");
        Ok(list.data)
    }
}

/// The API's filter expression for one team's games in a date window.
pub fn cayenne_expression(team_id: i64, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "(homeTeamId={id} or visitingTeamId={id}) and gameDate>='{start}' and gameDate<='{end}'",
        id = team_id,
        start = start.format("%Y-%m-%d"),
        end = end.format("%Y-%m-%d"),
    )
}

// ─── URL encoding (minimal, no extra dep) ───────────────────────

fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cayenne_expression() {
        let expr = cayenne_expression(
            23,
            NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
        );
        assert_eq!(
            expr,
            "(homeTeamId=23 or visitingTeamId=23) and gameDate>='2023-10-01' and gameDate<='2024-04-15'"
        );
    }

    #[test]
    fn test_urlencode() {
        assert_eq!(urlencode("a b"), "a%20b");
        assert_eq!(urlencode("gameDate>='2023-10-01'"), "gameDate%3E%3D%272023-10-01%27");
        assert_eq!(urlencode("(x=1)"), "%28x%3D1%29");
        assert_eq!(urlencode("é"), "%C3%A9");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = StatsClient::new("http://localhost:8080/stats/");
        assert_eq!(client.base_url(), "http://localhost:8080/stats");
    }
}
