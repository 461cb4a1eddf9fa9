//! Bundled player profile metadata.
//!
//! Profiles (image, nationality, playing style, bio, championships) ship with
//! the binary and are looked up by handle, case-insensitively. Unknown
//! handles fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const BUNDLED_ROSTER: &str = include_str!("../../data/player_data.json");

pub const DEFAULT_DESCRIPTION: &str = "Stroven Super Cup competitor";
pub const DEFAULT_HEIGHT: &str = "N/A";
pub const DEFAULT_NATIONALITY: &str = "🌍";
pub const DEFAULT_PLAYING_STYLE: &str = "Adaptive";

/// Roster loading errors.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Failed to read roster file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse roster: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Descriptive profile for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub handle: String,

    #[serde(default)]
    pub image_path: String,

    #[serde(default)]
    pub description: String,

    /// Stroven Super Cup titles
    #[serde(default)]
    pub ssc_wins: u32,

    #[serde(default)]
    pub height: String,

    #[serde(default)]
    pub nationality: String,

    #[serde(default)]
    pub playing_style: String,
}

/// The full metadata set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    #[serde(default)]
    pub default_image: String,

    #[serde(default)]
    pub players: Vec<PlayerProfile>,
}

impl Roster {
    /// The roster compiled into the binary. A bad bundle yields an empty
    /// roster so lookups still fall back to defaults.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_ROSTER).unwrap_or_else(|e| {
            warn!("Bundled roster is invalid, using defaults: {}", e);
            Self::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, RosterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, handle: &str) -> Option<&PlayerProfile> {
        let found = self
            .players
            .iter()
            .find(|p| p.handle.eq_ignore_ascii_case(handle));
        if found.is_none() {
            debug!("No roster entry for {}", handle);
        }
        found
    }

    /// Image path, or the default image.
    pub fn image(&self, handle: &str) -> &str {
        match self.lookup(handle) {
            Some(p) if !p.image_path.is_empty() => &p.image_path,
            _ => &self.default_image,
        }
    }

    pub fn championships(&self, handle: &str) -> u32 {
        self.lookup(handle).map_or(0, |p| p.ssc_wins)
    }

    /// Profile with every empty field filled from the defaults.
    pub fn profile_or_default(&self, handle: &str) -> PlayerProfile {
        let found = self.lookup(handle).cloned();
        let or = |value: Option<&String>, default: &str| {
            value
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        PlayerProfile {
            handle: handle.to_string(),
            image_path: self.image(handle).to_string(),
            description: or(found.as_ref().map(|p| &p.description), DEFAULT_DESCRIPTION),
            ssc_wins: found.as_ref().map_or(0, |p| p.ssc_wins),
            height: or(found.as_ref().map(|p| &p.height), DEFAULT_HEIGHT),
            nationality: or(found.as_ref().map(|p| &p.nationality), DEFAULT_NATIONALITY),
            playing_style: or(found.as_ref().map(|p| &p.playing_style), DEFAULT_PLAYING_STYLE),
        }
    }

    /// Players with at least one title, most titles first.
    pub fn champions(&self) -> Vec<&PlayerProfile> {
        let mut champions: Vec<&PlayerProfile> =
            self.players.iter().filter(|p| p.ssc_wins > 0).collect();
        champions.sort_by(|a, b| b.ssc_wins.cmp(&a.ssc_wins).then(a.handle.cmp(&b.handle)));
        champions
    }
}
