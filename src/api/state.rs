use std::sync::Arc;

use crate::config::{AppConfig, DisplayConfig};
use crate::dashboard::Dashboard;
use crate::fetch::StatsSource;
use crate::roster::Roster;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn StatsSource>,
    pub roster: Arc<Roster>,
    pub display: DisplayConfig,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(source: Arc<dyn StatsSource>, roster: Arc<Roster>, config: &AppConfig) -> Self {
        Self {
            source,
            roster,
            display: config.display.clone(),
            cors_origin: config.server.cors_origin.clone(),
        }
    }

    /// A fresh dashboard session for one request.
    pub fn dashboard(&self) -> Dashboard<'_, dyn StatsSource> {
        Dashboard::new(self.source.as_ref(), &self.roster, self.display.clone())
    }
}
