use crate::models::{Match, Record};

use super::view_for;

/// Win/loss/draw record for `handle` across every match they played.
pub fn calculate_record(handle: &str, matches: &[Match]) -> Record {
    let mut record = Record::default();
    for view in matches.iter().filter_map(|m| view_for(m, handle)) {
        record.add(view.result());
    }
    record
}

/// Win rate as a percentage, 0 when there are no matches.
pub fn calculate_win_rate(wins: u32, losses: u32, draws: u32) -> f64 {
    Record {
        wins,
        losses,
        draws,
    }
    .win_rate()
}
