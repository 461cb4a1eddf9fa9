//! Statistics calculation engine.
//!
//! Pure functions deriving per-player and per-pair statistics from a list of
//! matches:
//! - Win/loss/draw records and win rates
//! - Current, best and worst streaks
//! - Five-match form
//! - Head-to-head rivalries
//! - Normalized performance radar metrics
//! - Match frequency and rating trends
//!
//! A match whose score cannot be resolved is skipped by every calculation and
//! logged once per calculation at `warn` level.

mod elo_trend;
mod form;
mod frequency;
mod radar;
mod record;
mod rivalry;
mod streak;

pub use elo_trend::*;
pub use form::*;
pub use frequency::*;
pub use radar::*;
pub use record::*;
pub use rivalry::*;
pub use streak::*;

use tracing::warn;

use crate::models::{Match, PlayerResult, PlayerView, Score};

/// Resolve a match's score, logging and skipping it when unusable.
pub(crate) fn resolve_score(m: &Match) -> Option<Score> {
    match m.score() {
        Ok(score) => Some(score),
        Err(e) => {
            warn!(
                p1 = %m.p1,
                p2 = %m.p2,
                played_at = %m.played_at,
                "Skipping match: {}",
                e
            );
            None
        }
    }
}

/// Goals for and against from `handle`'s side, if they played and the score
/// resolves.
pub(crate) fn view_for(m: &Match, handle: &str) -> Option<PlayerView> {
    let side = m.side_of(handle)?;
    resolve_score(m).map(|score| score.view(side))
}

/// Matches ordered oldest to newest: the exact reverse of
/// [`most_recent_first`].
pub fn chronological(matches: &[Match]) -> Vec<&Match> {
    let mut sorted = most_recent_first(matches);
    sorted.reverse();
    sorted
}

/// Matches ordered newest to oldest, by `played_at` then `id`.
///
/// Remaining ties keep input order, so a feed that is already newest first
/// (as every backend feed is) decides which tied match is the latest.
pub fn most_recent_first(matches: &[Match]) -> Vec<&Match> {
    let mut sorted: Vec<&Match> = matches.iter().collect();
    sorted.sort_by(|a, b| b.played_at.cmp(&a.played_at).then(b.id.cmp(&a.id)));
    sorted
}

/// `handle`'s results, oldest first.
pub fn results_for(handle: &str, matches: &[Match]) -> Vec<PlayerResult> {
    chronological(matches)
        .into_iter()
        .filter_map(|m| view_for(m, handle))
        .map(|view| view.result())
        .collect()
}

/// Clamp to the 0-100 band.
pub(crate) fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
