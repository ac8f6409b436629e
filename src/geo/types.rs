//! Core types for the geo reference subsystem.

use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

/// A latitude/longitude pair in degrees. No datum conversion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const ORIGIN: Coordinates = Coordinates { lat: 0.0, lon: 0.0 };

    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        write!(f, "{:.4}°{}, {:.4}°{}", self.lat.abs(), ns, self.lon.abs(), ew)
    }
}

/// Where a team plays its home games.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamLocation {
    pub team_name: String,
    pub city: String,
    /// State or province.
    pub region: String,
    pub coordinates: Coordinates,
    pub time_zone: Tz,
}

impl TeamLocation {
    /// The neutral location handed out on a lookup miss: (0, 0) in UTC.
    ///
    /// Distances measured against it are finite but meaningless, so every
    /// use of it is logged by the table.
    pub fn unknown(team_name: &str) -> Self {
        Self {
            team_name: team_name.to_string(),
            city: "Unknown".into(),
            region: "Unknown".into(),
            coordinates: Coordinates::ORIGIN,
            time_zone: chrono_tz::UTC,
        }
    }
}

/// A table entry for the `--list-teams` output.
#[derive(Debug, Clone, Serialize)]
pub struct TeamInfo {
    pub team: String,
    pub city: String,
    pub region: String,
    pub lat: f64,
    pub lon: f64,
    pub tz: String,
}

impl From<&TeamLocation> for TeamInfo {
    fn from(loc: &TeamLocation) -> Self {
        Self {
            team: loc.team_name.clone(),
            city: loc.city.clone(),
            region: loc.region.clone(),
            lat: loc.coordinates.lat,
            lon: loc.coordinates.lon,
            tz: loc.time_zone.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_location_is_neutral() {
        let loc = TeamLocation::unknown("Atlanta Thrashers");
        assert_eq!(loc.team_name, "Atlanta Thrashers");
        assert_eq!(loc.coordinates, Coordinates::ORIGIN);
        assert_eq!(loc.time_zone, chrono_tz::UTC);
    }

    #[test]
    fn test_coordinates_display() {
        let c = Coordinates::new(49.2778, -123.1088);
        assert_eq!(c.to_string(), "49.2778°N, 123.1088°W");
    }
}
