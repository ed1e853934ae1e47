//! Domain models
//!
//! Plain data for colony entities and the values that flow between
//! services. Models carry only the logic that keeps their own invariants.

pub mod constants;
pub mod errors;
pub mod events;
pub mod expendable;
pub mod history;
pub mod line;
pub mod mission;
pub mod mission_log;
pub mod position;
pub mod sector_map;
pub mod ship;
pub mod timestamp;
pub mod vitals;
