//! Team directory (API id → full name) with a file cache at
//! `~/.rink_travel/teams.json`.
//!
//! TTL: 30 days. A missing or corrupt cache file reads as empty.
//! Fallback chain: fresh cache → `/team` → stale cache → error.

use super::client::StatsClient;
use super::types::ApiTeam;
use crate::error::AppError;
use crate::geo::Franchise;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CACHE_TTL_MS: i64 = 30 * 24 * 3600 * 1000; // 30 days in ms

/// Id → name lookup for every team the API lists.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    names: HashMap<i64, String>,
}

impl TeamDirectory {
    pub fn from_teams(teams: &[ApiTeam]) -> Self {
        Self {
            names: teams.iter().map(|t| (t.id, t.full_name.clone())).collect(),
        }
    }

    /// Full name for an id, or `Unknown Team (<id>)`.
    pub fn name_of(&self, id: i64) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown Team ({})", id))
    }

    /// Id of a team by name. Exact matches win; otherwise any entry resolving
    /// to the same franchise (accents, aliases). Ties go to the highest id,
    /// which is the franchise's current identity in the API.
    pub fn id_of(&self, full_name: &str) -> Option<i64> {
        let exact = self
            .names
            .iter()
            .filter(|(_, n)| n.as_str() == full_name)
            .map(|(id, _)| *id)
            .max();
        if exact.is_some() {
            return exact;
        }
        let wanted = Franchise::from_name(full_name)?;
        self.names
            .iter()
            .filter(|(_, n)| Franchise::from_name(n) == Some(wanted))
            .map(|(id, _)| *id)
            .max()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ─── Cache ──────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct CacheFile {
    timestamp: i64,
    #[serde(default)]
    teams: Vec<ApiTeam>,
}

pub struct DirectoryCache {
    path: PathBuf,
    file: Option<CacheFile>,
}

impl DirectoryCache {
    /// Load cache from the default location (~/.rink_travel/teams.json).
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load cache from a specific path (for testing).
    pub fn load_from(path: PathBuf) -> Self {
        let file = Self::read_file(&path);
        Self { path, file }
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rink_travel")
            .join("teams.json")
    }

    fn read_file(path: &Path) -> Option<CacheFile> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// The cached directory if present and younger than the TTL.
    pub fn fresh(&self) -> Option<TeamDirectory> {
        let file = self.file.as_ref()?;
        let now = chrono::Utc::now().timestamp_millis();
        if now - file.timestamp > CACHE_TTL_MS || file.teams.is_empty() {
            return None;
        }
        Some(TeamDirectory::from_teams(&file.teams))
    }

    /// The cached directory regardless of age.
    pub fn stale(&self) -> Option<TeamDirectory> {
        self.file
            .as_ref()
            .filter(|f| !f.teams.is_empty())
            .map(|f| TeamDirectory::from_teams(&f.teams))
    }

    /// Replace the cached team list and persist it.
    pub fn put(&mut self, teams: &[ApiTeam]) {
        self.file = Some(CacheFile {
            timestamp: chrono::Utc::now().timestamp_millis(),
            teams: teams.to_vec(),
        });
        self.persist();
    }

    fn persist(&self) {
        let Some(file) = &self.file else { return };
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(file) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!(path = %self.path.display(), error = %e, "could not write team cache");
                }
            }
            Err(e) => warn!(error = %e, "could not serialize team cache"),
        }
    }
}

/// Resolve the team directory through the cache/network fallback chain.
pub fn load_directory(
    client: &StatsClient,
    cache: &mut DirectoryCache,
    offline: bool,
) -> Result<TeamDirectory, AppError> {
    if let Some(dir) = cache.fresh() {
        debug!(teams = dir.len(), "team directory from cache");
        return Ok(dir);
    }

    if !offline {
        match client.teams() {
            Ok(teams) if !teams.is_empty() => {
                cache.put(&teams);
                info!(teams = teams.len(), "fetched team directory");
                return Ok(TeamDirectory::from_teams(&teams));
            }
            Ok(_) => warn!("stats API returned an empty team list"),
            Err(e) => warn!(error = %e, "team directory request failed"),
        }
    }

    match cache.stale() {
        Some(dir) => {
            warn!(teams = dir.len(), "using expired team directory cache");
            Ok(dir)
        }
        None => Err(AppError::DirectoryUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn teams() -> Vec<ApiTeam> {
        vec![
            ApiTeam { id: 23, full_name: "Vancouver Canucks".into(), tri_code: Some("VAN".into()) },
            ApiTeam { id: 8, full_name: "Montréal Canadiens".into(), tri_code: Some("MTL".into()) },
            ApiTeam { id: 27, full_name: "Phoenix Coyotes".into(), tri_code: Some("PHX".into()) },
            ApiTeam { id: 53, full_name: "Arizona Coyotes".into(), tri_code: Some("ARI".into()) },
        ]
    }

    fn test_cache() -> (DirectoryCache, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("teams.json");
        (DirectoryCache::load_from(path), dir)
    }

    #[test]
    fn test_name_of() {
        let d = TeamDirectory::from_teams(&teams());
        assert_eq!(d.name_of(23), "Vancouver Canucks");
        assert_eq!(d.name_of(99), "Unknown Team (99)");
    }

    #[test]
    fn test_id_of_exact_and_accent_insensitive() {
        let d = TeamDirectory::from_teams(&teams());
        assert_eq!(d.id_of("Vancouver Canucks"), Some(23));
        assert_eq!(d.id_of("Montreal Canadiens"), Some(8));
        assert_eq!(d.id_of("Quebec Nordiques"), None);
    }

    #[test]
    fn test_id_of_prefers_exact_then_latest() {
        let d = TeamDirectory::from_teams(&teams());
        assert_eq!(d.id_of("Phoenix Coyotes"), Some(27));
        assert_eq!(d.id_of("arizona coyotes"), Some(53));
    }

    #[test]
    fn test_id_of_duplicate_exact_names_picks_highest() {
        let mut list = teams();
        list.push(ApiTeam { id: 5, full_name: "Vancouver Canucks".into(), tri_code: None });
        list.push(ApiTeam { id: 61, full_name: "Vancouver Canucks".into(), tri_code: None });
        let d = TeamDirectory::from_teams(&list);
        assert_eq!(d.id_of("Vancouver Canucks"), Some(61));
    }

    #[test]
    fn test_cache_miss() {
        let (cache, _dir) = test_cache();
        assert!(cache.fresh().is_none());
        assert!(cache.stale().is_none());
    }

    #[test]
    fn test_cache_persistence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("teams.json");

        {
            let mut cache = DirectoryCache::load_from(path.clone());
            cache.put(&teams());
        }

        let cache2 = DirectoryCache::load_from(path);
        let d = cache2.fresh().unwrap();
        assert_eq!(d.len(), 4);
        assert_eq!(d.name_of(8), "Montréal Canadiens");
    }

    #[test]
    fn test_expired_cache_is_stale_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("teams.json");
        let json = r#"{"timestamp": 0, "teams": [{"id": 23, "fullName": "Vancouver Canucks"}]}"#;
        fs::write(&path, json).unwrap();

        let cache = DirectoryCache::load_from(path);
        assert!(cache.fresh().is_none());
        assert_eq!(cache.stale().unwrap().name_of(23), "Vancouver Canucks");
    }

    #[test]
    fn test_corrupt_cache_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("teams.json");
        fs::write(&path, "{not json").unwrap();
        assert!(DirectoryCache::load_from(path).stale().is_none());
    }

    #[test]
    fn test_load_directory_offline_uses_stale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("teams.json");
        fs::write(&path, r#"{"timestamp": 0, "teams": [{"id": 23, "fullName": "Vancouver Canucks"}]}"#).unwrap();
        let mut cache = DirectoryCache::load_from(path);

        let client = StatsClient::new("http://127.0.0.1:9");
        let d = load_directory(&client, &mut cache, true).unwrap();
        assert_eq!(d.id_of("Vancouver Canucks"), Some(23));
    }

    #[test]
    fn test_load_directory_offline_without_cache() {
        let (mut cache, _dir) = test_cache();
        let client = StatsClient::new("http://127.0.0.1:9");
        let err = load_directory(&client, &mut cache, true).unwrap_err();
        assert!(matches!(err, AppError::DirectoryUnavailable));
    }
}
