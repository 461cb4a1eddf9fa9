use std::collections::{BTreeMap, BTreeSet};

use crate::models::{EloTrend, Player, RatingHistoryRow};

/// Starting rating assumed by the backend for every player.
pub const BASE_RATING: f64 = 1000.0;

/// The last `window` rows of rating history.
pub fn recent_elo_trend(history: &[RatingHistoryRow], window: usize) -> EloTrend {
    let start = history.len().saturating_sub(window);
    let points = history[start..].to_vec();

    let players: BTreeSet<&String> = points.iter().flat_map(|row| row.ratings.keys()).collect();

    EloTrend {
        players: players.into_iter().cloned().collect(),
        points,
    }
}

/// Two-point trend used when the backend has no rating history: everyone at
/// the base rating, then everyone at their current rating.
pub fn fallback_elo_trend(players: &[Player]) -> EloTrend {
    let start = players
        .iter()
        .map(|p| (p.handle.clone(), BASE_RATING))
        .collect();
    let now = players.iter().map(|p| (p.handle.clone(), p.elo)).collect();

    let mut handles: Vec<String> = players.iter().map(|p| p.handle.clone()).collect();
    handles.sort();
    handles.dedup();

    EloTrend {
        players: handles,
        points: vec![RatingHistoryRow::new(0, start), RatingHistoryRow::new(1, now)],
    }
}

/// Highest rating each player reached over the history.
pub fn peak_ratings(history: &[RatingHistoryRow]) -> BTreeMap<String, f64> {
    let mut peaks: BTreeMap<String, f64> = BTreeMap::new();
    for row in history {
        for (handle, rating) in &row.ratings {
            peaks
                .entry(handle.clone())
                .and_modify(|peak| *peak = peak.max(*rating))
                .or_insert(*rating);
        }
    }
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: u32, ratings: &[(&str, f64)]) -> RatingHistoryRow {
        RatingHistoryRow::new(
            n,
            ratings.iter().map(|(h, r)| (h.to_string(), *r)).collect(),
        )
    }

    #[test]
    fn test_recent_window() {
        let history: Vec<RatingHistoryRow> = (0..20)
            .map(|n| row(n, &[("niko", 1000.0 + n as f64)]))
            .collect();

        let trend = recent_elo_trend(&history, 15);
        assert_eq!(trend.points.len(), 15);
        assert_eq!(trend.points[0].match_number, 5);
        assert_eq!(trend.players, vec!["niko".to_string()]);
    }

    #[test]
    fn test_recent_window_longer_than_history() {
        let history = vec![row(0, &[("b", 1000.0)]), row(1, &[("a", 1010.0), ("b", 990.0)])];

        let trend = recent_elo_trend(&history, 30);
        assert_eq!(trend.points.len(), 2);
        assert_eq!(trend.players, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_fallback_trend() {
        let mut niko = Player::new("niko", "Niko");
        niko.elo = 1084.0;
        let trend = fallback_elo_trend(&[niko, Player::new("arul", "Arul")]);

        assert_eq!(trend.points.len(), 2);
        assert_eq!(trend.points[0].rating("niko"), Some(BASE_RATING));
        assert_eq!(trend.points[1].rating("niko"), Some(1084.0));
        assert_eq!(trend.players, vec!["arul".to_string(), "niko".to_string()]);
    }

    #[test]
    fn test_peak_ratings() {
        let history = vec![
            row(0, &[("a", 1000.0), ("b", 1000.0)]),
            row(1, &[("a", 1020.0), ("b", 980.0)]),
            row(2, &[("a", 1005.0), ("b", 995.0)]),
        ];

        let peaks = peak_ratings(&history);
        assert_eq!(peaks["a"], 1020.0);
        assert_eq!(peaks["b"], 1000.0);
    }
}
