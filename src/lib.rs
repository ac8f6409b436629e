//! NHL game history with travel context.
//!
//! Fetches a team's regular-season games from the NHL stats API and enriches
//! each one with the distance the team traveled to reach the venue, the
//! time-zone shift relative to home, and the rest days since the previous
//! game.

pub mod error;
pub mod export;
pub mod game;
pub mod geo;
pub mod logging;
pub mod nhl;
pub mod pipeline;
pub mod season;
pub mod travel;
