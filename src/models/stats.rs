//! Derived statistics models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PlayerResult, RatingHistoryRow};

/// Win/loss/draw counts for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Record {
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Win rate as a percentage (0 to 100), 0 with no matches.
    pub fn win_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.wins as f64 / total as f64 * 100.0
        }
    }

    pub fn add(&mut self, result: PlayerResult) {
        match result {
            PlayerResult::Win => self.wins += 1,
            PlayerResult::Loss => self.losses += 1,
            PlayerResult::Draw => self.draws += 1,
        }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}W-{}L-{}D", self.wins, self.losses, self.draws)
    }
}

/// Type of a player's current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakType {
    Win,
    Loss,
    Draw,
}

impl From<PlayerResult> for StreakType {
    fn from(result: PlayerResult) -> Self {
        match result {
            PlayerResult::Win => StreakType::Win,
            PlayerResult::Loss => StreakType::Loss,
            PlayerResult::Draw => StreakType::Draw,
        }
    }
}

impl std::fmt::Display for StreakType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreakType::Win => write!(f, "win"),
            StreakType::Loss => write!(f, "loss"),
            StreakType::Draw => write!(f, "draw"),
        }
    }
}

/// Current and historical runs for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    pub player: String,
    pub current_streak: u32,
    pub streak_type: StreakType,
    pub best_win_streak: u32,
    pub worst_loss_streak: u32,
}

impl StreakData {
    pub fn intensity(&self) -> StreakIntensity {
        StreakIntensity::classify(self.streak_type, self.current_streak)
    }
}

/// Recent form over the last five matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub player: String,

    /// Most recent first
    #[serde(rename = "last5Matches")]
    pub last5_matches: Vec<PlayerResult>,

    /// 20 per win, 10 per draw (0 to 100)
    pub form: u32,
}

impl FormData {
    pub fn rating(&self) -> FormRating {
        FormRating::from_form(self.form)
    }
}

/// One side's most lopsided win in a rivalry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiggestWin {
    /// Winner's goals first
    pub score: String,
    pub goal_difference: u32,
}

/// Head-to-head statistics for an unordered pair, `player1 < player2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rivalry {
    pub player1: String,
    pub player2: String,
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub draws: u32,
    pub total_matches: u32,

    /// Signed, from player1's point of view
    pub avg_goal_difference: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub player1_biggest_win: Option<BiggestWin>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub player2_biggest_win: Option<BiggestWin>,
}

impl Rivalry {
    pub fn intensity(&self) -> RivalryIntensity {
        RivalryIntensity::from_total_matches(self.total_matches)
    }

    /// Whether `handle` is one of the two players.
    pub fn involves(&self, handle: &str) -> bool {
        self.player1 == handle || self.player2 == handle
    }
}

/// Axes of the performance radar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RadarMetric {
    #[serde(rename = "Win Rate")]
    WinRate,
    #[serde(rename = "Avg Goal Diff")]
    GoalDifference,
    #[serde(rename = "Goals For")]
    GoalsFor,
    #[serde(rename = "Defense")]
    Defense,
    #[serde(rename = "Clutch")]
    Clutch,
    #[serde(rename = "Consistency")]
    Consistency,
}

impl RadarMetric {
    pub const ALL: [RadarMetric; 6] = [
        RadarMetric::WinRate,
        RadarMetric::GoalDifference,
        RadarMetric::GoalsFor,
        RadarMetric::Defense,
        RadarMetric::Clutch,
        RadarMetric::Consistency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RadarMetric::WinRate => "Win Rate",
            RadarMetric::GoalDifference => "Avg Goal Diff",
            RadarMetric::GoalsFor => "Goals For",
            RadarMetric::Defense => "Defense",
            RadarMetric::Clutch => "Clutch",
            RadarMetric::Consistency => "Consistency",
        }
    }
}

impl std::fmt::Display for RadarMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One radar axis: a 0-100 score per player plus the cross-player mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetric {
    pub metric: RadarMetric,
    pub scores: BTreeMap<String, u32>,
    pub average: u32,
    pub full_mark: u32,
}

impl PerformanceMetric {
    pub fn score(&self, handle: &str) -> Option<u32> {
        self.scores.get(handle).copied()
    }
}

/// Matches started in one hour of the day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: u32,
    pub label: String,
    pub matches: u32,
}

/// Matches played on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayBucket {
    pub day: String,
    pub matches: u32,
}

/// When matches get played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFrequency {
    pub by_hour: Vec<HourBucket>,
    pub by_weekday: Vec<WeekdayBucket>,
    pub total: u32,
}

/// Rating trajectory over the most recent match events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EloTrend {
    pub players: Vec<String>,
    pub points: Vec<RatingHistoryRow>,
}

/// Form classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FormRating {
    Excellent,
    Good,
    Average,
    Poor,
    Struggling,
}

impl FormRating {
    pub fn from_form(form: u32) -> Self {
        if form >= 80 {
            FormRating::Excellent
        } else if form >= 60 {
            FormRating::Good
        } else if form >= 40 {
            FormRating::Average
        } else if form >= 20 {
            FormRating::Poor
        } else {
            FormRating::Struggling
        }
    }
}

impl std::fmt::Display for FormRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormRating::Excellent => write!(f, "EXCELLENT"),
            FormRating::Good => write!(f, "GOOD"),
            FormRating::Average => write!(f, "AVERAGE"),
            FormRating::Poor => write!(f, "POOR"),
            FormRating::Struggling => write!(f, "STRUGGLING"),
        }
    }
}

/// Label for a current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreakIntensity {
    OnFire,
    HotStreak,
    ColdSpell,
    BuildingMomentum,
    GettingStarted,
}

impl StreakIntensity {
    pub fn classify(streak_type: StreakType, length: u32) -> Self {
        match streak_type {
            StreakType::Win if length >= 5 => StreakIntensity::OnFire,
            StreakType::Win if length >= 3 => StreakIntensity::HotStreak,
            StreakType::Loss if length >= 3 => StreakIntensity::ColdSpell,
            _ if length >= 2 => StreakIntensity::BuildingMomentum,
            _ => StreakIntensity::GettingStarted,
        }
    }
}

impl std::fmt::Display for StreakIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreakIntensity::OnFire => write!(f, "ON FIRE"),
            StreakIntensity::HotStreak => write!(f, "HOT STREAK"),
            StreakIntensity::ColdSpell => write!(f, "COLD SPELL"),
            StreakIntensity::BuildingMomentum => write!(f, "BUILDING MOMENTUM"),
            StreakIntensity::GettingStarted => write!(f, "GETTING STARTED"),
        }
    }
}

/// How established a rivalry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RivalryIntensity {
    Legendary,
    Intense,
    Heated,
    Developing,
}

impl RivalryIntensity {
    pub fn from_total_matches(total: u32) -> Self {
        if total >= 35 {
            RivalryIntensity::Legendary
        } else if total >= 20 {
            RivalryIntensity::Intense
        } else if total >= 10 {
            RivalryIntensity::Heated
        } else {
            RivalryIntensity::Developing
        }
    }
}

impl std::fmt::Display for RivalryIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RivalryIntensity::Legendary => write!(f, "LEGENDARY"),
            RivalryIntensity::Intense => write!(f, "INTENSE"),
            RivalryIntensity::Heated => write!(f, "HEATED"),
            RivalryIntensity::Developing => write!(f, "DEVELOPING"),
        }
    }
}

/// Rank title from rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EloRank {
    Legend,
    Master,
    Expert,
    Advanced,
    Intermediate,
    Rookie,
}

impl EloRank {
    pub fn from_elo(elo: f64) -> Self {
        if elo >= 1300.0 {
            EloRank::Legend
        } else if elo >= 1200.0 {
            EloRank::Master
        } else if elo >= 1100.0 {
            EloRank::Expert
        } else if elo >= 1000.0 {
            EloRank::Advanced
        } else if elo >= 900.0 {
            EloRank::Intermediate
        } else {
            EloRank::Rookie
        }
    }
}

impl std::fmt::Display for EloRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EloRank::Legend => write!(f, "LEGEND"),
            EloRank::Master => write!(f, "MASTER"),
            EloRank::Expert => write!(f, "EXPERT"),
            EloRank::Advanced => write!(f, "ADVANCED"),
            EloRank::Intermediate => write!(f, "INTERMEDIATE"),
            EloRank::Rookie => write!(f, "ROOKIE"),
        }
    }
}
