//! Travel enrichment: geodesy, zone offsets and the enricher fold.

pub mod enricher;
pub mod geodesy;

pub use enricher::{rest_days, TravelEnricher};
pub use geodesy::{geodesic_miles, zone_shift_hours, OffsetPolicy};
