//! Match model and score resolution.
//!
//! The backend encodes a result twice: the `"a-b"` score string and, on some
//! endpoints, the two numeric fields. The string is canonical; the numeric
//! fields are checked against it when present.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors resolving a match result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Malformed score: {0:?}")]
    Malformed(String),

    #[error("Score {text:?} disagrees with numeric fields {p1}-{p2}")]
    Mismatch { text: String, p1: u32, p2: u32 },

    #[error("Match has no score")]
    Missing,
}

/// Which side of a match a player was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    P1,
    P2,
}

/// Result of a match from the neutral point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    P1Win,
    P2Win,
    Draw,
}

/// Result of a match from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "D")]
    Draw,
}

impl fmt::Display for PlayerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerResult::Win => write!(f, "W"),
            PlayerResult::Loss => write!(f, "L"),
            PlayerResult::Draw => write!(f, "D"),
        }
    }
}

/// A resolved final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub p1: u32,
    pub p2: u32,
}

impl Score {
    pub fn new(p1: u32, p2: u32) -> Self {
        Self { p1, p2 }
    }

    pub fn outcome(&self) -> Outcome {
        match self.p1.cmp(&self.p2) {
            std::cmp::Ordering::Greater => Outcome::P1Win,
            std::cmp::Ordering::Less => Outcome::P2Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// The score seen from one side: goals scored and conceded.
    pub fn view(&self, side: Side) -> PlayerView {
        match side {
            Side::P1 => PlayerView {
                scored: self.p1,
                conceded: self.p2,
            },
            Side::P2 => PlayerView {
                scored: self.p2,
                conceded: self.p1,
            },
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.p1, self.p2)
    }
}

impl FromStr for Score {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ScoreError::Malformed(s.to_string());
        let (a, b) = s.trim().split_once('-').ok_or_else(malformed)?;
        let p1 = a.trim().parse::<u32>().map_err(|_| malformed())?;
        let p2 = b.trim().parse::<u32>().map_err(|_| malformed())?;
        Ok(Self { p1, p2 })
    }
}

/// Goals for and against from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerView {
    pub scored: u32,
    pub conceded: u32,
}

impl PlayerView {
    pub fn result(&self) -> PlayerResult {
        match self.scored.cmp(&self.conceded) {
            std::cmp::Ordering::Greater => PlayerResult::Win,
            std::cmp::Ordering::Less => PlayerResult::Loss,
            std::cmp::Ordering::Equal => PlayerResult::Draw,
        }
    }

    /// Signed margin, positive when this player won.
    pub fn goal_difference(&self) -> i64 {
        self.scored as i64 - self.conceded as i64
    }
}

/// A recorded match between two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Backend row id (not sent by every endpoint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// When the match was played
    #[serde(with = "timestamp")]
    pub played_at: DateTime<Utc>,

    /// First player's handle
    pub p1: String,

    /// Second player's handle
    pub p2: String,

    /// Canonical `"p1-p2"` score
    #[serde(default)]
    pub score: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1_score: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2_score: Option<u32>,
}

impl Match {
    /// Create a match carrying both score encodings.
    pub fn new(
        played_at: DateTime<Utc>,
        p1: impl Into<String>,
        p2: impl Into<String>,
        p1_score: u32,
        p2_score: u32,
    ) -> Self {
        Self {
            id: None,
            played_at,
            p1: p1.into(),
            p2: p2.into(),
            score: format!("{}-{}", p1_score, p2_score),
            p1_score: Some(p1_score),
            p2_score: Some(p2_score),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Resolve the final score, validating the redundant encodings.
    pub fn score(&self) -> Result<Score, ScoreError> {
        let numeric = match (self.p1_score, self.p2_score) {
            (Some(p1), Some(p2)) => Some(Score::new(p1, p2)),
            _ => None,
        };

        if self.score.trim().is_empty() {
            return numeric.ok_or(ScoreError::Missing);
        }

        let parsed: Score = self.score.parse()?;
        match numeric {
            Some(n) if n != parsed => Err(ScoreError::Mismatch {
                text: self.score.clone(),
                p1: n.p1,
                p2: n.p2,
            }),
            _ => Ok(parsed),
        }
    }

    pub fn involves(&self, handle: &str) -> bool {
        self.p1 == handle || self.p2 == handle
    }

    pub fn side_of(&self, handle: &str) -> Option<Side> {
        if self.p1 == handle {
            Some(Side::P1)
        } else if self.p2 == handle {
            Some(Side::P2)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, handle: &str) -> Option<&str> {
        match self.side_of(handle)? {
            Side::P1 => Some(&self.p2),
            Side::P2 => Some(&self.p1),
        }
    }

    /// Key used to de-duplicate matches gathered from several player feeds.
    pub fn dedup_key(&self) -> (DateTime<Utc>, &str, &str, &str) {
        (self.played_at, &self.p1, &self.p2, &self.score)
    }
}

/// The backend writes `datetime.isoformat()`, which has no offset. Naive
/// timestamps are read as UTC.
mod timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}
