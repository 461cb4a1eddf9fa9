use std::collections::BTreeMap;

use crate::models::{BiggestWin, Match, Rivalry};

use super::resolve_score;

/// Minimum meetings before a pair is shown as a rivalry.
pub const DEFAULT_MIN_RIVALRY_MATCHES: u32 = 3;

#[derive(Debug)]
struct RivalryAcc {
    rivalry: Rivalry,
    goal_difference_sum: i64,
}

impl RivalryAcc {
    fn new(player1: &str, player2: &str) -> Self {
        Self {
            rivalry: Rivalry {
                player1: player1.to_string(),
                player2: player2.to_string(),
                player1_wins: 0,
                player2_wins: 0,
                draws: 0,
                total_matches: 0,
                avg_goal_difference: 0.0,
                player1_biggest_win: None,
                player2_biggest_win: None,
            },
            goal_difference_sum: 0,
        }
    }

    /// Record one meeting, goals given from player1's side.
    fn add(&mut self, player1_goals: u32, player2_goals: u32) {
        let r = &mut self.rivalry;
        r.total_matches += 1;

        let diff = player1_goals as i64 - player2_goals as i64;
        self.goal_difference_sum += diff;

        if diff > 0 {
            r.player1_wins += 1;
            replace_if_bigger(&mut r.player1_biggest_win, player1_goals, player2_goals);
        } else if diff < 0 {
            r.player2_wins += 1;
            replace_if_bigger(&mut r.player2_biggest_win, player2_goals, player1_goals);
        } else {
            r.draws += 1;
        }
    }

    fn finish(mut self) -> Rivalry {
        if self.rivalry.total_matches > 0 {
            self.rivalry.avg_goal_difference =
                self.goal_difference_sum as f64 / self.rivalry.total_matches as f64;
        }
        self.rivalry
    }
}

/// Strictly larger margins replace; equal margins keep the first seen.
fn replace_if_bigger(slot: &mut Option<BiggestWin>, winner_goals: u32, loser_goals: u32) {
    let margin = winner_goals - loser_goals;
    if slot.as_ref().map_or(true, |best| margin > best.goal_difference) {
        *slot = Some(BiggestWin {
            score: format!("{}-{}", winner_goals, loser_goals),
            goal_difference: margin,
        });
    }
}

/// Head-to-head statistics for every pair that has met.
///
/// Pairs are normalized so `player1` sorts before `player2`. Matches are
/// scanned in input order, which decides ties between equally large wins.
/// The result is sorted by meetings (most first), then by pair.
pub fn calculate_rivalries(matches: &[Match]) -> Vec<Rivalry> {
    let mut pairs: BTreeMap<(String, String), RivalryAcc> = BTreeMap::new();

    for m in matches {
        if m.p1 == m.p2 {
            continue;
        }
        let Some(score) = resolve_score(m) else {
            continue;
        };

        let (player1, player2, player1_goals, player2_goals) = if m.p1 < m.p2 {
            (&m.p1, &m.p2, score.p1, score.p2)
        } else {
            (&m.p2, &m.p1, score.p2, score.p1)
        };

        pairs
            .entry((player1.clone(), player2.clone()))
            .or_insert_with(|| RivalryAcc::new(player1, player2))
            .add(player1_goals, player2_goals);
    }

    let mut rivalries: Vec<Rivalry> = pairs.into_values().map(RivalryAcc::finish).collect();
    // BTreeMap order already sorts by pair; stable sort keeps it for ties.
    rivalries.sort_by(|a, b| b.total_matches.cmp(&a.total_matches));
    rivalries
}

/// Drop pairs that have met fewer than `min_matches` times.
pub fn filter_rivalries(rivalries: Vec<Rivalry>, min_matches: u32) -> Vec<Rivalry> {
    rivalries
        .into_iter()
        .filter(|r| r.total_matches >= min_matches)
        .collect()
}

/// The rivalry between `first` and `second`, oriented so `player1 == first`.
///
/// Unlike [`calculate_rivalries`], the returned pair is not normalized: it is
/// reported from `first`'s side.
pub fn head_to_head(first: &str, second: &str, matches: &[Match]) -> Option<Rivalry> {
    let between: Vec<Match> = matches
        .iter()
        .filter(|m| m.involves(first) && m.involves(second))
        .cloned()
        .collect();

    let rivalry = calculate_rivalries(&between).into_iter().next()?;
    if rivalry.player1 == first {
        Some(rivalry)
    } else {
        Some(flip(rivalry))
    }
}

fn flip(r: Rivalry) -> Rivalry {
    Rivalry {
        player1: r.player2,
        player2: r.player1,
        player1_wins: r.player2_wins,
        player2_wins: r.player1_wins,
        draws: r.draws,
        total_matches: r.total_matches,
        avg_goal_difference: -r.avg_goal_difference,
        player1_biggest_win: r.player2_biggest_win,
        player2_biggest_win: r.player1_biggest_win,
    }
}
