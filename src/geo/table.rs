//! The geo reference table: franchise → arena city, coordinates and zone.
//!
//! Built once and handed to consumers by reference. Lookups never fail;
//! a miss degrades to [`TeamLocation::unknown`] and is logged, which keeps a
//! single unmapped opponent from aborting a multi-season run at the cost of
//! a meaningless distance for that game.

use super::franchise::Franchise;
use super::types::{Coordinates, TeamInfo, TeamLocation};
use chrono_tz::America;
use chrono_tz::Tz;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::warn;

// ─── Built-in dataset ───────────────────────────────────────────

struct BuiltinTeam {
    franchise: Franchise,
    city: &'static str,
    region: &'static str,
    lat: f64,
    lon: f64,
    tz: Tz,
}

const BUILTIN_TEAMS: &[BuiltinTeam] = &[
    BuiltinTeam {
        franchise: Franchise::AnaheimDucks,
        city: "Anaheim", region: "California",
        lat: 33.8353, lon: -117.9145, tz: America::Los_Angeles,
    },
    BuiltinTeam {
        franchise: Franchise::ArizonaCoyotes,
        city: "Tempe", region: "Arizona",
        lat: 33.4255, lon: -111.9400, tz: America::Phoenix,
    },
    BuiltinTeam {
        franchise: Franchise::BostonBruins,
        city: "Boston", region: "Massachusetts",
        lat: 42.3662, lon: -71.0209, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::BuffaloSabres,
        city: "Buffalo", region: "New York",
        lat: 42.8750, lon: -78.8767, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::CalgaryFlames,
        city: "Calgary", region: "Alberta",
        lat: 51.0374, lon: -114.0620, tz: America::Edmonton,
    },
    BuiltinTeam {
        franchise: Franchise::CarolinaHurricanes,
        city: "Raleigh", region: "North Carolina",
        lat: 35.8034, lon: -78.7222, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::ChicagoBlackhawks,
        city: "Chicago", region: "Illinois",
        lat: 41.8806, lon: -87.6742, tz: America::Chicago,
    },
    BuiltinTeam {
        franchise: Franchise::ColoradoAvalanche,
        city: "Denver", region: "Colorado",
        lat: 39.7487, lon: -105.0076, tz: America::Denver,
    },
    BuiltinTeam {
        franchise: Franchise::ColumbusBlueJackets,
        city: "Columbus", region: "Ohio",
        lat: 39.9690, lon: -83.0064, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::DallasStars,
        city: "Dallas", region: "Texas",
        lat: 32.7905, lon: -96.8103, tz: America::Chicago,
    },
    BuiltinTeam {
        franchise: Franchise::DetroitRedWings,
        city: "Detroit", region: "Michigan",
        lat: 42.3252, lon: -83.0514, tz: America::Detroit,
    },
    BuiltinTeam {
        franchise: Franchise::EdmontonOilers,
        city: "Edmonton", region: "Alberta",
        lat: 53.5461, lon: -113.4938, tz: America::Edmonton,
    },
    BuiltinTeam {
        franchise: Franchise::FloridaPanthers,
        city: "Sunrise", region: "Florida",
        lat: 26.1585, lon: -80.3256, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::LosAngelesKings,
        city: "Los Angeles", region: "California",
        lat: 34.0430, lon: -118.2673, tz: America::Los_Angeles,
    },
    BuiltinTeam {
        franchise: Franchise::MinnesotaWild,
        city: "Saint Paul", region: "Minnesota",
        lat: 44.9447, lon: -93.1011, tz: America::Chicago,
    },
    BuiltinTeam {
        // America/Montreal is a tzdb link to Toronto.
        franchise: Franchise::MontrealCanadiens,
        city: "Montreal", region: "Quebec",
        lat: 45.4960, lon: -73.5693, tz: America::Toronto,
    },
    BuiltinTeam {
        franchise: Franchise::NashvillePredators,
        city: "Nashville", region: "Tennessee",
        lat: 36.1590, lon: -86.7787, tz: America::Chicago,
    },
    BuiltinTeam {
        franchise: Franchise::NewJerseyDevils,
        city: "Newark", region: "New Jersey",
        lat: 40.7336, lon: -74.1711, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::NewYorkIslanders,
        city: "Elmont", region: "New York",
        lat: 40.7007, lon: -73.7080, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::NewYorkRangers,
        city: "New York", region: "New York",
        lat: 40.7505, lon: -73.9934, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::OttawaSenators,
        city: "Ottawa", region: "Ontario",
        lat: 45.2969, lon: -75.9273, tz: America::Toronto,
    },
    BuiltinTeam {
        franchise: Franchise::PhiladelphiaFlyers,
        city: "Philadelphia", region: "Pennsylvania",
        lat: 39.9012, lon: -75.1720, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::PittsburghPenguins,
        city: "Pittsburgh", region: "Pennsylvania",
        lat: 40.4394, lon: -79.9893, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::SanJoseSharks,
        city: "San Jose", region: "California",
        lat: 37.3329, lon: -121.9012, tz: America::Los_Angeles,
    },
    BuiltinTeam {
        franchise: Franchise::SeattleKraken,
        city: "Seattle", region: "Washington",
        lat: 47.6221, lon: -122.3541, tz: America::Los_Angeles,
    },
    BuiltinTeam {
        franchise: Franchise::StLouisBlues,
        city: "St. Louis", region: "Missouri",
        lat: 38.6266, lon: -90.2026, tz: America::Chicago,
    },
    BuiltinTeam {
        franchise: Franchise::TampaBayLightning,
        city: "Tampa", region: "Florida",
        lat: 27.9428, lon: -82.4519, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::TorontoMapleLeafs,
        city: "Toronto", region: "Ontario",
        lat: 43.6435, lon: -79.3791, tz: America::Toronto,
    },
    BuiltinTeam {
        franchise: Franchise::VancouverCanucks,
        city: "Vancouver", region: "British Columbia",
        lat: 49.2778, lon: -123.1088, tz: America::Vancouver,
    },
    BuiltinTeam {
        franchise: Franchise::VegasGoldenKnights,
        city: "Las Vegas", region: "Nevada",
        lat: 36.1029, lon: -115.1784, tz: America::Los_Angeles,
    },
    BuiltinTeam {
        franchise: Franchise::WashingtonCapitals,
        city: "Washington", region: "District of Columbia",
        lat: 38.8981, lon: -77.0209, tz: America::New_York,
    },
    BuiltinTeam {
        franchise: Franchise::WinnipegJets,
        city: "Winnipeg", region: "Manitoba",
        lat: 49.8951, lon: -97.1384, tz: America::Winnipeg,
    },
];

fn builtin_to_location(team: &BuiltinTeam) -> TeamLocation {
    TeamLocation {
        team_name: team.franchise.full_name().to_string(),
        city: team.city.to_string(),
        region: team.region.to_string(),
        coordinates: Coordinates::new(team.lat, team.lon),
        time_zone: team.tz,
    }
}

// ─── Table ──────────────────────────────────────────────────────

/// Read-only franchise → location table.
#[derive(Debug, Clone, Default)]
pub struct GeoTable {
    entries: HashMap<Franchise, TeamLocation>,
}

impl GeoTable {
    /// The league table shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_TEAMS
                .iter()
                .map(|t| (t.franchise, builtin_to_location(t))),
        )
    }

    /// Build a table from explicit entries (fixtures, overrides).
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Franchise, TeamLocation)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Typed access, no fallback.
    pub fn get(&self, franchise: Franchise) -> Option<&TeamLocation> {
        self.entries.get(&franchise)
    }

    /// Location of a franchise, or the neutral default if the table lacks it.
    pub fn location_of(&self, franchise: Franchise) -> Cow<'_, TeamLocation> {
        match self.entries.get(&franchise) {
            Some(loc) => Cow::Borrowed(loc),
            None => {
                warn!(team = %franchise, "franchise missing from geo table, using (0, 0) UTC");
                Cow::Owned(TeamLocation::unknown(franchise.full_name()))
            }
        }
    }

    /// Resolve a raw team name. Never fails: unknown names get the neutral
    /// default location and a warning.
    pub fn lookup(&self, team_name: &str) -> Cow<'_, TeamLocation> {
        match Franchise::from_name(team_name) {
            Some(franchise) => self.location_of(franchise),
            None => {
                warn!(team = team_name, "unrecognised team name, using (0, 0) UTC");
                Cow::Owned(TeamLocation::unknown(team_name))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in franchise order (for `--list-teams`).
    pub fn team_list(&self) -> Vec<TeamInfo> {
        let mut franchises: Vec<&Franchise> = self.entries.keys().collect();
        franchises.sort();
        franchises
            .into_iter()
            .filter_map(|f| self.entries.get(f))
            .map(TeamInfo::from)
            .collect()
    }
}
