//! Core data models: backend snapshots and derived statistics.

mod match_record;
mod player;
mod rating;
mod stats;

pub use match_record::*;
pub use player::*;
pub use rating::*;
pub use stats::*;
