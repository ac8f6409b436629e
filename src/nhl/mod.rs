//! NHL stats API access: client, payload types, team directory, and the
//! conversion from API games to raw game records.

pub mod client;
pub mod directory;
pub mod types;

pub use client::{StatsClient, DEFAULT_BASE_URL};
pub use directory::{load_directory, DirectoryCache, TeamDirectory};
pub use types::{ApiGame, ApiTeam};

use crate::game::{GameLocation, RawGameRecord};
use crate::season::Season;
use tracing::{debug, warn};

/// Convert an API game to a raw record from `team_id`'s point of view.
///
/// Returns `None` for games without a final score (not yet played) and for
/// games the team did not take part in.
pub fn to_raw_record(
    game: &ApiGame,
    team_id: i64,
    season: Season,
    directory: &TeamDirectory,
) -> Option<RawGameRecord> {
    let (location, opponent_id) = if game.home_team_id == team_id {
        (GameLocation::Home, game.visiting_team_id)
    } else if game.visiting_team_id == team_id {
        (GameLocation::Away, game.home_team_id)
    } else {
        warn!(game = game.id, team_id, "game does not involve the tracked team, skipping");
        return None;
    };

    let (Some(home_score), Some(visiting_score)) = (game.home_score, game.visiting_score) else {
        debug!(game = game.id, "no final score, skipping");
        return None;
    };

    let (goals_for, goals_against) = match location {
        GameLocation::Home => (home_score, visiting_score),
        GameLocation::Away => (visiting_score, home_score),
    };

    Some(RawGameRecord {
        season: season.to_string(),
        location: location.to_string(),
        opponent: directory.name_of(opponent_id),
        goals_for,
        goals_against,
        game_date: game.game_date.clone(),
    })
}
