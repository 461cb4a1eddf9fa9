use crate::models::{Match, PlayerResult, StreakData, StreakType};

use super::results_for;

/// Streak statistics for `handle`.
///
/// Runs are tracked oldest to newest. A draw ends both the win run and the
/// loss run. The current streak is the run ending at the most recent match;
/// a most recent draw always counts as a current streak of 1, since draws
/// are not accumulated into runs. A player without matches gets a current
/// streak of 0 typed as a draw.
pub fn calculate_streak(handle: &str, matches: &[Match]) -> StreakData {
    let results = results_for(handle, matches);

    let mut win_run = 0u32;
    let mut loss_run = 0u32;
    let mut best_win_streak = 0u32;
    let mut worst_loss_streak = 0u32;

    for result in &results {
        match result {
            PlayerResult::Win => {
                win_run += 1;
                loss_run = 0;
                best_win_streak = best_win_streak.max(win_run);
            }
            PlayerResult::Loss => {
                loss_run += 1;
                win_run = 0;
                worst_loss_streak = worst_loss_streak.max(loss_run);
            }
            PlayerResult::Draw => {
                win_run = 0;
                loss_run = 0;
            }
        }
    }

    let (current_streak, streak_type) = match results.last() {
        None => (0, StreakType::Draw),
        Some(PlayerResult::Draw) => (1, StreakType::Draw),
        Some(last) => {
            let run = results.iter().rev().take_while(|r| *r == last).count() as u32;
            (run, StreakType::from(*last))
        }
    };

    StreakData {
        player: handle.to_string(),
        current_streak,
        streak_type,
        best_win_streak,
        worst_loss_streak,
    }
}

/// Streaks for several players, win streaks first, then longest current run.
pub fn streak_table(handles: &[String], matches: &[Match]) -> Vec<StreakData> {
    let mut table: Vec<StreakData> = handles
        .iter()
        .map(|handle| calculate_streak(handle, matches))
        .collect();

    table.sort_by(|a, b| {
        let a_win = a.streak_type == StreakType::Win;
        let b_win = b.streak_type == StreakType::Win;
        b_win
            .cmp(&a_win)
            .then(b.current_streak.cmp(&a.current_streak))
            .then(a.player.cmp(&b.player))
    });
    table
}
