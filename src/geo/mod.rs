//! Geo reference subsystem.
//!
//! Typed franchise resolution plus the static arena table used by the
//! travel enricher.

pub mod franchise;
pub mod table;
pub mod types;

pub use franchise::Franchise;
pub use table::GeoTable;
pub use types::{Coordinates, TeamInfo, TeamLocation};
