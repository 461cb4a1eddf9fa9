use std::collections::BTreeMap;

use crate::models::{Match, PerformanceMetric, PlayerResult, RadarMetric};

use super::{clamp_percent, view_for};

/// Average goal difference that maps to 0% and 100%.
const GOAL_DIFFERENCE_SPAN: f64 = 3.0;

/// Goals per match that saturate the attack and defense axes.
const GOALS_SPAN: f64 = 5.0;

/// Goal-difference standard deviation at which consistency reaches 0%.
const VOLATILITY_SPAN: f64 = 3.0;

/// Raw per-player totals behind the radar axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerAggregate {
    pub matches: u32,
    pub wins: u32,
    /// Wins decided by exactly one goal
    pub clutch_wins: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_differences: Vec<i64>,
}

impl PlayerAggregate {
    pub fn collect(handle: &str, matches: &[Match]) -> Self {
        let mut agg = Self::default();
        for view in matches.iter().filter_map(|m| view_for(m, handle)) {
            agg.matches += 1;
            agg.goals_for += view.scored;
            agg.goals_against += view.conceded;
            agg.goal_differences.push(view.goal_difference());
            if view.result() == PlayerResult::Win {
                agg.wins += 1;
                if view.goal_difference() == 1 {
                    agg.clutch_wins += 1;
                }
            }
        }
        agg
    }

    /// Divisor for per-match averages; an empty history divides by one.
    fn divisor(&self) -> f64 {
        self.matches.max(1) as f64
    }

    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.divisor() * 100.0
    }

    pub fn avg_goal_difference(&self) -> f64 {
        self.goal_differences.iter().sum::<i64>() as f64 / self.divisor()
    }

    pub fn avg_goals_for(&self) -> f64 {
        self.goals_for as f64 / self.divisor()
    }

    pub fn avg_goals_against(&self) -> f64 {
        self.goals_against as f64 / self.divisor()
    }

    /// Share of wins decided by a single goal, 0 without wins.
    pub fn clutch_factor(&self) -> f64 {
        if self.wins == 0 {
            0.0
        } else {
            self.clutch_wins as f64 / self.wins as f64 * 100.0
        }
    }

    /// Population standard deviation of per-match goal difference.
    pub fn volatility(&self) -> f64 {
        let mean = self.avg_goal_difference();
        let variance = self
            .goal_differences
            .iter()
            .map(|gd| (*gd as f64 - mean).powi(2))
            .sum::<f64>()
            / self.divisor();
        variance.sqrt()
    }

    /// Normalized 0-100 score on one radar axis.
    pub fn score(&self, metric: RadarMetric) -> f64 {
        match metric {
            RadarMetric::WinRate => clamp_percent(self.win_rate()),
            RadarMetric::GoalDifference => normalize_goal_difference(self.avg_goal_difference()),
            RadarMetric::GoalsFor => normalize_goals_for(self.avg_goals_for()),
            RadarMetric::Defense => normalize_goals_against(self.avg_goals_against()),
            RadarMetric::Clutch => clamp_percent(self.clutch_factor()),
            RadarMetric::Consistency => normalize_volatility(self.volatility()),
        }
    }
}

/// +3 maps to 100, 0 to 50, -3 to 0.
pub fn normalize_goal_difference(avg: f64) -> f64 {
    clamp_percent(50.0 + avg / GOAL_DIFFERENCE_SPAN * 50.0)
}

/// 5 goals a match maps to 100.
pub fn normalize_goals_for(avg: f64) -> f64 {
    clamp_percent(avg / GOALS_SPAN * 100.0)
}

/// Inverted: nothing conceded maps to 100, 5 a match to 0.
pub fn normalize_goals_against(avg: f64) -> f64 {
    clamp_percent(100.0 - avg / GOALS_SPAN * 100.0)
}

/// Inverted: a standard deviation of 0 maps to 100, 3 to 0.
pub fn normalize_volatility(stddev: f64) -> f64 {
    clamp_percent(100.0 - stddev / VOLATILITY_SPAN * 100.0)
}

/// Radar axes for `handles`, each with a cross-player average.
pub fn calculate_radar(handles: &[String], matches: &[Match]) -> Vec<PerformanceMetric> {
    let aggregates: Vec<(String, PlayerAggregate)> = handles
        .iter()
        .map(|h| (h.clone(), PlayerAggregate::collect(h, matches)))
        .collect();

    RadarMetric::ALL
        .iter()
        .map(|&metric| {
            let scores: BTreeMap<String, u32> = aggregates
                .iter()
                .map(|(handle, agg)| (handle.clone(), agg.score(metric).round() as u32))
                .collect();

            let average = if scores.is_empty() {
                0
            } else {
                (scores.values().sum::<u32>() as f64 / scores.len() as f64).round() as u32
            };

            PerformanceMetric {
                metric,
                scores,
                average,
                full_mark: 100,
            }
        })
        .collect()
}
