//! Distance on the WGS-84 ellipsoid and UTC offsets for IANA zones.
//!
//! Distances use Vincenty's inverse formula (sub-millimetre on the
//! ellipsoid) and fall back to the haversine great-circle distance for the
//! near-antipodal pairs where the iteration fails to converge.

use crate::geo::Coordinates;
use chrono::{NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// IUGG mean radius, for the spherical fallback.
const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;
const METERS_PER_MILE: f64 = 1609.344;

const VINCENTY_MAX_ITERATIONS: usize = 200;
const VINCENTY_TOLERANCE: f64 = 1e-12;

/// Geodesic distance between two points in statute miles.
pub fn geodesic_miles(from: Coordinates, to: Coordinates) -> f64 {
    let meters = vincenty_meters(from, to).unwrap_or_else(|| haversine_meters(from, to));
    meters / METERS_PER_MILE
}

/// Vincenty inverse solution. `None` when the iteration does not converge.
fn vincenty_meters(p1: Coordinates, p2: Coordinates) -> Option<f64> {
    let l = (p2.lon - p1.lon) * DEG;
    let u1 = ((1.0 - WGS84_F) * (p1.lat * DEG).tan()).atan();
    let u2 = ((1.0 - WGS84_F) * (p2.lat * DEG).tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return Some(0.0); // coincident points
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Both points on the equator: cos²α = 0.
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };
        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));

        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < VINCENTY_TOLERANCE {
            let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - WGS84_B.powi(2)) / WGS84_B.powi(2);
            let big_a = 1.0
                + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));
            return Some(WGS84_B * big_a * (sigma - delta_sigma));
        }
    }
    None
}

/// Great-circle distance on a sphere of mean Earth radius.
fn haversine_meters(p1: Coordinates, p2: Coordinates) -> f64 {
    let phi1 = p1.lat * DEG;
    let phi2 = p2.lat * DEG;
    let d_phi = (p2.lat - p1.lat) * DEG;
    let d_lambda = (p2.lon - p1.lon) * DEG;

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

// ─── UTC offsets ────────────────────────────────────────────────

/// When a zone's UTC offset is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetPolicy {
    /// Offset in force at local noon on the game date (historical DST state).
    #[default]
    GameDate,
    /// Offset in force right now, whatever the game date. Kept to reproduce
    /// older datasets; DST state will not match the game for part of the year.
    Now,
}

impl std::fmt::Display for OffsetPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffsetPolicy::GameDate => write!(f, "game-date"),
            OffsetPolicy::Now => write!(f, "now"),
        }
    }
}

/// UTC offset of `tz` in hours at local noon on `date`.
pub fn utc_offset_hours_on(tz: Tz, date: NaiveDate) -> f64 {
    let Some(noon) = date.and_hms_opt(12, 0, 0) else {
        return 0.0;
    };
    match tz.from_local_datetime(&noon).earliest() {
        Some(dt) => dt.offset().fix().local_minus_utc() as f64 / 3600.0,
        None => 0.0,
    }
}

/// UTC offset of `tz` in hours at the current moment.
pub fn utc_offset_hours_now(tz: Tz) -> f64 {
    let now = Utc::now().naive_utc();
    tz.offset_from_utc_datetime(&now).fix().local_minus_utc() as f64 / 3600.0
}

/// Clock shift in hours when travelling from `home` to `away`
/// (away offset minus home offset).
pub fn zone_shift_hours(home: Tz, away: Tz, date: NaiveDate, policy: OffsetPolicy) -> f64 {
    match policy {
        OffsetPolicy::GameDate => utc_offset_hours_on(away, date) - utc_offset_hours_on(home, date),
        OffsetPolicy::Now => utc_offset_hours_now(away) - utc_offset_hours_now(home),
    }
}
