//! The travel enricher: sort by date, then a single fold that carries the
//! previous game date as its accumulator.

use super::geodesy::{self, OffsetPolicy};
use crate::game::{
    validate_all, EnrichedGameRecord, GameLocation, GameRecord, RawGameRecord, RecordError,
    TravelMetrics,
};
use crate::geo::{Franchise, GeoTable, TeamLocation};
use chrono::NaiveDate;
use tracing::debug;

/// Computes travel metrics for one team's games.
#[derive(Debug, Clone, Copy)]
pub struct TravelEnricher<'a> {
    table: &'a GeoTable,
    home: Franchise,
    policy: OffsetPolicy,
}

impl<'a> TravelEnricher<'a> {
    pub fn new(table: &'a GeoTable, home: Franchise) -> Self {
        Self { table, home, policy: OffsetPolicy::default() }
    }

    /// Set when zone offsets are evaluated.
    pub fn with_policy(mut self, policy: OffsetPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn home(&self) -> Franchise {
        self.home
    }

    /// Enrich a batch of validated games. Output is in ascending date order
    /// regardless of input order; equal dates keep their input order.
    pub fn enrich(&self, mut games: Vec<GameRecord>) -> Vec<EnrichedGameRecord> {
        games.sort_by_key(|g| g.game_date);

        let home = self.table.location_of(self.home);
        let count = games.len();

        let (_, enriched) = games.into_iter().fold(
            (None, Vec::with_capacity(count)),
            |(previous, mut out): (Option<NaiveDate>, Vec<EnrichedGameRecord>), game| {
                let (previous, record) = self.step(&home, previous, game);
                out.push(record);
                (previous, out)
            },
        );

        debug!(home = %self.home, games = enriched.len(), policy = %self.policy, "enriched games");
        enriched
    }

    /// Validate raw records, then enrich. The first invalid record aborts the
    /// whole batch.
    pub fn enrich_raw(
        &self,
        raw: &[RawGameRecord],
    ) -> Result<Vec<EnrichedGameRecord>, RecordError> {
        Ok(self.enrich(validate_all(raw)?))
    }

    /// One fold step: metrics for `game` given the previous game's date.
    /// Returns the accumulator for the next step.
    pub fn step(
        &self,
        home: &TeamLocation,
        previous: Option<NaiveDate>,
        game: GameRecord,
    ) -> (Option<NaiveDate>, EnrichedGameRecord) {
        let (distance_traveled_miles, time_zone_change_hours) = match game.location {
            GameLocation::Home => (0.0, 0.0),
            GameLocation::Away => {
                let away = self.table.lookup(&game.opponent);
                (
                    geodesy::geodesic_miles(home.coordinates, away.coordinates),
                    geodesy::zone_shift_hours(
                        home.time_zone,
                        away.time_zone,
                        game.game_date,
                        self.policy,
                    ),
                )
            }
        };

        let travel = TravelMetrics {
            distance_traveled_miles,
            time_zone_change_hours,
            rest_days: rest_days(previous, game.game_date),
        };
        let date = game.game_date;
        (Some(date), EnrichedGameRecord { game, travel })
    }
}

/// Days since the previous game; 0 without one. Never negative.
pub fn rest_days(previous: Option<NaiveDate>, current: NaiveDate) -> u32 {
    previous
        .map(|p| (current - p).num_days().max(0) as u32)
        .unwrap_or(0)
}
