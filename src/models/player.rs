//! Player snapshots returned by the backend.

use serde::{Deserialize, Serialize};

use super::Match;

/// A player as reported by the leaderboard and player endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique handle
    pub handle: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Backend-computed rating
    #[serde(alias = "current_elo", default)]
    pub elo: f64,

    /// Matches played (wins + losses + draws)
    #[serde(default)]
    pub played: u32,

    #[serde(default)]
    pub wins: u32,

    #[serde(default)]
    pub losses: u32,

    /// Win percentage (0 to 100). Only the leaderboard sends it.
    #[serde(default)]
    pub win_pct: f64,
}

impl Player {
    /// Create a player with no matches at the default rating.
    pub fn new(handle: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            name: name.into(),
            elo: 1000.0,
            played: 0,
            wins: 0,
            losses: 0,
            win_pct: 0.0,
        }
    }

    pub fn name_or_handle(&self) -> &str {
        if self.name.is_empty() {
            &self.handle
        } else {
            &self.name
        }
    }

    /// Draws are implied by the other counters and never sent.
    pub fn draws(&self) -> u32 {
        self.played.saturating_sub(self.wins + self.losses)
    }

    /// Win percentage, derived from the counters when the backend omitted it.
    pub fn win_percentage(&self) -> f64 {
        if self.win_pct > 0.0 || self.played == 0 {
            self.win_pct
        } else {
            self.wins as f64 / self.played as f64 * 100.0
        }
    }
}

/// Player plus the highest rating ever held (`/api/player-stats`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(flatten)]
    pub player: Player,

    #[serde(default)]
    pub all_time_high: f64,
}

/// Player plus recent matches, most recent first (`/api/player/{handle}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDetail {
    pub player: Player,

    #[serde(default)]
    pub recent: Vec<Match>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_draws_implied() {
        let player = Player {
            played: 10,
            wins: 5,
            losses: 3,
            ..Player::new("niko", "Niko")
        };
        assert_eq!(player.draws(), 2);
    }

    #[test]
    fn test_player_draws_saturate() {
        let player = Player {
            played: 2,
            wins: 2,
            losses: 1,
            ..Player::new("niko", "Niko")
        };
        assert_eq!(player.draws(), 0);
    }

    #[test]
    fn test_player_win_percentage_derived() {
        let player = Player {
            played: 4,
            wins: 3,
            losses: 1,
            ..Player::new("joel", "Joel")
        };
        assert!((player.win_percentage() - 75.0).abs() < f64::EPSILON);
        assert_eq!(Player::new("x", "X").win_percentage(), 0.0);
    }

    #[test]
    fn test_players_endpoint_shape() {
        // /api/players omits win_pct
        let json = r#"{"handle":"arul","name":"Arul","elo":1012.4,"played":7,"wins":4,"losses":3}"#;
        let player: Player = serde_json::from_str(json).unwrap();

        assert_eq!(player.handle, "arul");
        assert_eq!(player.win_pct, 0.0);
        assert_eq!(player.played, 7);
    }

    #[test]
    fn test_player_stats_current_elo_alias() {
        let json = r#"{"handle":"niko","name":"Niko","current_elo":1104.2,"all_time_high":1150.0,"played":12,"wins":9,"losses":3}"#;
        let stats: PlayerStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.player.handle, "niko");
        assert!((stats.player.elo - 1104.2).abs() < f64::EPSILON);
        assert!((stats.all_time_high - 1150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_player_detail_without_recent() {
        let json = r#"{"player":{"handle":"daniel","name":"Daniel","elo":990.0,"played":0,"wins":0,"losses":0}}"#;
        let detail: PlayerDetail = serde_json::from_str(json).unwrap();

        assert!(detail.recent.is_empty());
    }
}
