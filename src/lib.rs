//! # SSC Stats
//!
//! Statistics dashboard for the Stroven Super Cup.
//!
//! ## Architecture
//!
//! - **models**: Backend payloads and derived statistics
//! - **fetch**: Typed client for the tournament backend
//! - **calculate**: Records, streaks, form, rivalries, radar metrics
//! - **palette**: Session-scoped player colors
//! - **roster**: Bundled player profile metadata
//! - **dashboard**: View models composed from the above
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod models;
pub mod palette;
pub mod roster;

pub use models::*;
