//! Rating history snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every player's rating after one match event.
///
/// On the wire this is a flat object: a `match` (or `match_number`) column
/// plus one numeric column per player handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct RatingHistoryRow {
    pub match_number: u32,
    pub ratings: BTreeMap<String, f64>,
}

impl RatingHistoryRow {
    pub fn new(match_number: u32, ratings: BTreeMap<String, f64>) -> Self {
        Self {
            match_number,
            ratings,
        }
    }

    pub fn rating(&self, handle: &str) -> Option<f64> {
        self.ratings.get(handle).copied()
    }
}

impl TryFrom<Map<String, Value>> for RatingHistoryRow {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut match_number = None;
        let mut ratings = BTreeMap::new();

        for (key, value) in map {
            if key == "match" || key == "match_number" {
                let n = value
                    .as_u64()
                    .ok_or_else(|| format!("match number is not an integer: {value}"))?;
                let n = u32::try_from(n)
                    .map_err(|_| format!("match number out of range: {n}"))?;
                match_number = Some(n);
            } else if let Some(rating) = value.as_f64() {
                ratings.insert(key, rating);
            }
        }

        let match_number = match_number.ok_or_else(|| "missing match number".to_string())?;
        Ok(Self {
            match_number,
            ratings,
        })
    }
}

impl From<RatingHistoryRow> for Map<String, Value> {
    fn from(row: RatingHistoryRow) -> Self {
        let mut map = Map::new();
        map.insert("match_number".to_string(), Value::from(row.match_number));
        for (handle, rating) in row.ratings {
            map.insert(handle, Value::from(rating));
        }
        map
    }
}
