//! Season driver: fetch → convert → validate → enrich → export.

use crate::error::AppError;
use crate::export::{self, ExportFormat};
use crate::game::{validate_indexed, EnrichedGameRecord, RawGameRecord};
use crate::geo::{Franchise, GeoTable};
use crate::nhl::{self, load_directory, ApiGame, DirectoryCache, StatsClient, TeamDirectory};
use crate::season::Season;
use crate::travel::{OffsetPolicy, TravelEnricher};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

/// Everything a run needs, assembled from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub team: Franchise,
    pub seasons: Vec<Season>,
    pub out_dir: PathBuf,
    pub format: ExportFormat,
    pub policy: OffsetPolicy,
    /// Pause between season requests.
    pub delay: Duration,
    /// Resolve the team directory from the local cache only.
    pub offline: bool,
    pub base_url: String,
}

impl RunConfig {
    pub fn new(team: Franchise, seasons: Vec<Season>) -> Self {
        Self {
            team,
            seasons,
            out_dir: PathBuf::from("."),
            format: ExportFormat::default(),
            policy: OffsetPolicy::default(),
            delay: Duration::from_millis(1000),
            offline: false,
            base_url: nhl::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Outcome of one exported season.
#[derive(Debug, Clone)]
pub struct SeasonSummary {
    pub season: String,
    pub games: usize,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub completed: Vec<SeasonSummary>,
    pub failed: Vec<(String, String)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert one season's API games and enrich them. Validation errors name
/// the game's position in the API response.
pub fn enrich_api_games(
    games: &[ApiGame],
    team_id: i64,
    season: Season,
    directory: &TeamDirectory,
    enricher: &TravelEnricher<'_>,
) -> Result<Vec<EnrichedGameRecord>, AppError> {
    let raw: Vec<(usize, RawGameRecord)> = games
        .iter()
        .enumerate()
        .filter_map(|(i, g)| nhl::to_raw_record(g, team_id, season, directory).map(|r| (i, r)))
        .collect();
    let validated = validate_indexed(raw.iter().map(|(i, r)| (*i, r)))?;
    Ok(enricher.enrich(validated))
}

fn process_season(
    client: &StatsClient,
    directory: &TeamDirectory,
    team_id: i64,
    season: Season,
    enricher: &TravelEnricher<'_>,
    config: &RunConfig,
) -> Result<SeasonSummary, AppError> {
    let (start, end) = season
        .start_date()
        .zip(season.end_date())
        .ok_or_else(|| AppError::config_error(format!("season {} is out of range", season)))?;

    let games = client.game_history(team_id, start, end)?;
    let enriched = enrich_api_games(&games, team_id, season, directory, enricher)?;

    let season_id = season.to_string();
    let files = export::write_season(
        &config.out_dir,
        &config.team.slug(),
        &season_id,
        &enriched,
        config.format,
    )?;

    Ok(SeasonSummary { season: season_id, games: enriched.len(), files })
}

/// Fetch, enrich and export every configured season. A failing season is
/// logged and recorded; the remaining seasons still run.
pub fn run(config: &RunConfig, table: &GeoTable) -> Result<RunReport, AppError> {
    let client = StatsClient::new(config.base_url.clone());
    let mut cache = DirectoryCache::load();
    let directory = load_directory(&client, &mut cache, config.offline)?;

    let team_id = directory
        .id_of(config.team.full_name())
        .ok_or_else(|| AppError::TeamNotFound(config.team.full_name().to_string()))?;
    info!(team = %config.team, team_id, seasons = config.seasons.len(), "starting run");

    let enricher = TravelEnricher::new(table, config.team).with_policy(config.policy);
    let mut report = RunReport::default();

    for (i, season) in config.seasons.iter().copied().enumerate() {
        if i > 0 && !config.delay.is_zero() {
            std::thread::sleep(config.delay);
        }
        info!(%season, "fetching season");
        match process_season(&client, &directory, team_id, season, &enricher, config) {
            Ok(summary) => report.completed.push(summary),
            Err(e) => {
                error!(%season, error = %e, "season failed");
                report.failed.push((season.to_string(), e.to_string()));
            }
        }
    }

    Ok(report)
}

/// Enrich a local JSON array of raw game records and export one file set per
/// season found in it. No network access. Validation errors name the record's
/// position in the file.
pub fn run_from_file(
    input: &Path,
    config: &RunConfig,
    table: &GeoTable,
) -> Result<RunReport, AppError> {
    let text = fs::read_to_string(input)?;
    let raw: Vec<RawGameRecord> = serde_json::from_str(&text)?;
    info!(path = %input.display(), records = raw.len(), "loaded raw records");

    let mut by_season: BTreeMap<Season, Vec<(usize, &RawGameRecord)>> = BTreeMap::new();
    for (i, r) in raw.iter().enumerate() {
        let season: Season = r
            .season
            .parse()
            .map_err(|e| AppError::config_error(format!("record {}: {}", i, e)))?;
        by_season.entry(season).or_default().push((i, r));
    }
    if by_season.is_empty() {
        warn!(path = %input.display(), "input holds no records");
    }

    let enricher = TravelEnricher::new(table, config.team).with_policy(config.policy);
    let mut report = RunReport::default();

    for (season, records) in by_season {
        let season_id = season.to_string();
        let result = validate_indexed(records)
            .map_err(AppError::from)
            .and_then(|games| {
                let enriched = enricher.enrich(games);
                let files = export::write_season(
                    &config.out_dir,
                    &config.team.slug(),
                    &season_id,
                    &enriched,
                    config.format,
                )?;
                Ok(SeasonSummary { season: season_id.clone(), games: enriched.len(), files })
            });
        match result {
            Ok(summary) => report.completed.push(summary),
            Err(e) => {
                error!(season = %season_id, error = %e, "season failed");
                report.failed.push((season_id, e.to_string()));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RecordError;
    use crate::nhl::ApiTeam;
    use tempfile::TempDir;

    fn api_game(id: i64, date: &str, home: i64, visiting: i64, hs: i64, vs: i64) -> ApiGame {
        ApiGame {
            id,
            game_date: Some(date.into()),
            home_team_id: home,
            visiting_team_id: visiting,
            home_score: Some(hs),
            visiting_score: Some(vs),
            game_type: Some(2),
            season: Some(20232024),
        }
    }

    #[test]
    fn test_enrich_api_games_sorted_with_rest_days() {
        let directory = TeamDirectory::from_teams(&[
            ApiTeam { id: 23, full_name: "Vancouver Canucks".into(), tri_code: None },
            ApiTeam { id: 22, full_name: "Edmonton Oilers".into(), tri_code: None },
            ApiTeam { id: 20, full_name: "Calgary Flames".into(), tri_code: None },
        ]);
        let games = vec![
            api_game(3, "2023-10-14", 20, 23, 2, 5),
            api_game(1, "2023-10-11", 23, 22, 8, 1),
            api_game(2, "2023-10-12", 22, 23, 4, 3),
        ];
        let table = GeoTable::builtin();
        let enricher = TravelEnricher::new(&table, Franchise::VancouverCanucks);

        let out = enrich_api_games(&games, 23, Season::new(2023), &directory, &enricher).unwrap();
        let rest: Vec<u32> = out.iter().map(|r| r.rest_days()).collect();
        assert_eq!(rest, vec![0, 1, 2]);
        assert_eq!(out[0].distance_traveled_miles(), 0.0);
        assert_eq!(out[1].game.opponent, "Edmonton Oilers");
        assert!(out[1].distance_traveled_miles() > 500.0);
        assert_eq!(out[2].game.goals_for, 5);
    }

    #[test]
    fn test_enrich_api_games_missing_date_is_fatal() {
        let directory = TeamDirectory::default();
        let mut game = api_game(1, "2023-10-11", 23, 22, 1, 0);
        game.game_date = None;
        let table = GeoTable::builtin();
        let enricher = TravelEnricher::new(&table, Franchise::VancouverCanucks);
        let err = enrich_api_games(&[game], 23, Season::new(2023), &directory, &enricher)
            .unwrap_err();
        assert!(matches!(err, AppError::Record(_)));
    }

    #[test]
    fn test_run_from_file_groups_by_season() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("raw.json");
        fs::write(
            &input,
            r#"[
                {"season":"2022-2023","location":"Away","opponent":"Seattle Kraken","goals_for":2,"goals_against":1,"game_date":"2022-10-15"},
                {"season":"2023-2024","location":"Home","opponent":"Edmonton Oilers","goals_for":8,"goals_against":1,"game_date":"2023-10-11"},
                {"season":"2022-2023","location":"Home","opponent":"Edmonton Oilers","goals_for":3,"goals_against":5,"game_date":"2022-10-12"}
            ]"#,
        )
        .unwrap();

        let mut config = RunConfig::new(Franchise::VancouverCanucks, Vec::new());
        config.out_dir = dir.path().join("out");
        let report = run_from_file(&input, &config, &GeoTable::builtin()).unwrap();

        assert!(report.is_success());
        assert_eq!(report.completed.len(), 2);
        assert_eq!(report.completed[0].season, "2022-2023");
        assert_eq!(report.completed[0].games, 2);

        let csv_path = dir.path().join("out").join("canucks_game_history_2022-2023.csv");
        let csv = fs::read_to_string(csv_path).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].ends_with("Loss,2022-10-12"));
        assert!(rows[2].contains(",Seattle Kraken,"));
        assert!(rows[2].ends_with(",3,2,1,Win,2022-10-15"));
    }

    #[test]
    fn test_run_from_file_records_bad_season() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("raw.json");
        fs::write(
            &input,
            r#"[{"season":"2023-2024","location":"Home","opponent":"Edmonton Oilers","goals_for":-1,"goals_against":1,"game_date":"2023-10-11"}]"#,
        )
        .unwrap();

        let mut config = RunConfig::new(Franchise::VancouverCanucks, Vec::new());
        config.out_dir = dir.path().to_path_buf();
        let report = run_from_file(&input, &config, &GeoTable::builtin()).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.failed[0].0, "2023-2024");
        assert!(report.failed[0].1.contains("record 0"));
    }

    #[test]
    fn test_run_from_file_error_names_file_position() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("raw.json");
        fs::write(
            &input,
            r#"[
                {"season":"2022-2023","location":"Home","opponent":"Edmonton Oilers","goals_for":3,"goals_against":1,"game_date":"2022-10-12"},
                {"season":"2023-2024","location":"Home","opponent":"Edmonton Oilers","goals_for":8,"goals_against":1,"game_date":"2023-10-11"},
                {"season":"2022-2023","location":"Away","opponent":"Seattle Kraken","goals_for":2,"goals_against":1,"game_date":"2022-10-15"},
                {"season":"2023-2024","location":"Away","opponent":"Calgary Flames","goals_for":-3,"goals_against":1,"game_date":"2023-10-20"}
            ]"#,
        )
        .unwrap();

        let mut config = RunConfig::new(Franchise::VancouverCanucks, Vec::new());
        config.out_dir = dir.path().to_path_buf();
        let report = run_from_file(&input, &config, &GeoTable::builtin()).unwrap();

        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "2023-2024");
        assert!(report.failed[0].1.contains("record 3 (2023-10-20)"));
    }

    #[test]
    fn test_run_from_file_rejects_bad_season_text() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("raw.json");
        fs::write(
            &input,
            r#"[{"season":"../2023","location":"Home","opponent":"Edmonton Oilers","goals_for":1,"goals_against":0,"game_date":"2023-10-11"}]"#,
        )
        .unwrap();

        let mut config = RunConfig::new(Franchise::VancouverCanucks, Vec::new());
        config.out_dir = dir.path().join("out");
        let err = run_from_file(&input, &config, &GeoTable::builtin()).unwrap_err();

        assert!(matches!(err, AppError::Config(ref m) if m.starts_with("record 0")));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_enrich_api_games_error_names_response_position() {
        let directory = TeamDirectory::default();
        let mut unplayed = api_game(1, "2023-10-11", 23, 22, 0, 0);
        unplayed.home_score = None;
        unplayed.visiting_score = None;
        let mut bad = api_game(3, "2023-10-14", 22, 23, 2, 1);
        bad.game_date = Some("not a date".into());
        let games = vec![unplayed, api_game(2, "2023-10-12", 23, 22, 4, 3), bad];

        let table = GeoTable::builtin();
        let enricher = TravelEnricher::new(&table, Franchise::VancouverCanucks);
        let err = enrich_api_games(&games, 23, Season::new(2023), &directory, &enricher)
            .unwrap_err();
        assert!(matches!(err, AppError::Record(RecordError::InvalidDate { index: 2, .. })));
    }
}
