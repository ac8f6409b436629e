//! Season identifiers and fetch windows.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// A season spanning two calendar years, identified by its start year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Season {
    pub start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// A season whose whole fetch window is a representable date.
    pub fn checked(start_year: i32) -> Option<Self> {
        let season = Self::new(start_year);
        season.start_date()?;
        season.end_date()?;
        Some(season)
    }

    pub fn end_year(&self) -> i32 {
        self.start_year.saturating_add(1)
    }

    /// First day of the fetch window (Oct 1).
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year, 10, 1)
    }

    /// Last day of the fetch window (Apr 15 of the following year).
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year.checked_add(1)?, 4, 15)
    }

    /// Parse the stats API's compact id, e.g. `20232024`.
    pub fn from_api_id(id: i64) -> Option<Self> {
        let start = i32::try_from(id / 10_000).ok()?;
        let end = i32::try_from(id % 10_000).ok()?;
        if start.checked_add(1)? != end {
            return None;
        }
        Self::checked(start)
    }

    /// Inclusive range of seasons by start year. `None` when either bound is
    /// outside the supported calendar.
    pub fn range(from: i32, to: i32) -> Option<impl Iterator<Item = Season>> {
        Self::checked(from)?;
        Self::checked(to)?;
        Some((from..=to).map(Season::new))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.end_year())
    }
}

impl FromStr for Season {
    type Err = String;

    /// Accepts `2023-2024`, `20232024` or a bare start year `2023`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || format!("Invalid season '{}'. Use YYYY-YYYY (e.g. 2023-2024).", s);

        if let Some((a, b)) = s.split_once('-') {
            let start: i32 = a.trim().parse().map_err(|_| invalid())?;
            let end: i32 = b.trim().parse().map_err(|_| invalid())?;
            if start.checked_add(1) != Some(end) {
                return Err(invalid());
            }
            return Self::checked(start).ok_or_else(invalid);
        }

        match s.len() {
            8 => s.parse::<i64>().ok().and_then(Self::from_api_id).ok_or_else(invalid),
            4 => s.parse::<i32>().ok().and_then(Self::checked).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}
