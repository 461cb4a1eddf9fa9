//! Dashboard views for one session.
//!
//! A [`Dashboard`] borrows a [`StatsSource`] and a [`Roster`] and owns the
//! session's [`PlayerPalette`]. Every view is infallible: fetch failures have
//! already collapsed to empty data, and thresholds from [`DisplayConfig`]
//! decide when a view has too little data to show.

use std::collections::BTreeMap;

use futures_util::future::join_all;
use serde::Serialize;
use tracing::debug;

use crate::calculate::{
    calculate_form, calculate_match_frequency, calculate_radar, calculate_record,
    calculate_rivalries, calculate_streak, calculate_win_rate, fallback_elo_trend, filter_rivalries, head_to_head, peak_ratings,
    recent_elo_trend, streak_table,
};
use crate::config::DisplayConfig;
use crate::fetch::StatsSource;
use crate::models::{
    EloRank, EloTrend, FormData, FormRating, Match, MatchFrequency, PerformanceMetric, Player,
    Record, Rivalry, RivalryIntensity, StreakData, StreakIntensity,
};
use crate::palette::PlayerPalette;
use crate::roster::{PlayerProfile, Roster};

/// One leaderboard line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub position: usize,
    pub player: Player,
    pub win_pct: f64,
    pub draws: u32,
    pub rank: EloRank,
    pub color: &'static str,
}

/// A player card on the competitors page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorCard {
    pub player: Player,
    pub profile: PlayerProfile,
    pub rank: EloRank,
    pub color: &'static str,
}

/// Everything shown on a player's page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfileView {
    pub player: Player,
    pub profile: PlayerProfile,
    pub rank: EloRank,
    pub color: &'static str,
    /// Career counters from the backend
    pub record: Record,
    /// Aggregated over `recent` only
    pub recent_record: Record,
    pub recent_win_rate: f64,
    pub all_time_high: Option<f64>,
    pub streak: StreakData,
    pub form: Option<FormData>,
    /// Head-to-head over the recent matches, most played first
    pub head_to_head: Vec<Rivalry>,
    /// Most recent first
    pub recent: Vec<Match>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRow {
    #[serde(flatten)]
    pub form: FormData,
    pub rating: FormRating,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRow {
    #[serde(flatten)]
    pub streak: StreakData,
    pub intensity: StreakIntensity,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RivalryRow {
    #[serde(flatten)]
    pub rivalry: Rivalry,
    pub intensity: RivalryIntensity,
    pub player1_color: &'static str,
    pub player2_color: &'static str,
}

/// Radar metrics plus the color of each plotted player.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RadarView {
    pub metrics: Vec<PerformanceMetric>,
    pub colors: BTreeMap<String, &'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EloTrendView {
    #[serde(flatten)]
    pub trend: EloTrend,
    pub colors: BTreeMap<String, &'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionRow {
    pub handle: String,
    pub championships: u32,
    pub image_path: String,
    pub color: &'static str,
}

/// View builder for one CLI run or one HTTP request.
pub struct Dashboard<'a, S: StatsSource + ?Sized> {
    source: &'a S,
    roster: &'a Roster,
    display: DisplayConfig,
    palette: PlayerPalette,
}

impl<'a, S: StatsSource + ?Sized> Dashboard<'a, S> {
    pub fn new(source: &'a S, roster: &'a Roster, display: DisplayConfig) -> Self {
        Self {
            source,
            roster,
            display,
            palette: PlayerPalette::new(),
        }
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn palette(&self) -> &PlayerPalette {
        &self.palette
    }

    fn colors_for(&mut self, handles: &[String]) -> BTreeMap<String, &'static str> {
        self.palette.colors(handles).into_iter().collect()
    }

    /// Players by rating as ranked by the backend.
    pub async fn leaderboard(&mut self) -> Vec<LeaderboardRow> {
        let players = self.source.leaderboard().await;

        players
            .into_iter()
            .enumerate()
            .map(|(i, player)| LeaderboardRow {
                position: i + 1,
                win_pct: player.win_percentage(),
                draws: player.draws(),
                rank: EloRank::from_elo(player.elo),
                color: self.palette.color(&player.handle),
                player,
            })
            .collect()
    }

    /// Every player with their roster profile.
    pub async fn competitors(&mut self) -> Vec<CompetitorCard> {
        let players = self.source.players().await;

        players
            .into_iter()
            .map(|player| CompetitorCard {
                profile: self.roster.profile_or_default(&player.handle),
                rank: EloRank::from_elo(player.elo),
                color: self.palette.color(&player.handle),
                player,
            })
            .collect()
    }

    /// A player's page, or `None` when the backend does not know them.
    pub async fn player_profile(&mut self, handle: &str) -> Option<PlayerProfileView> {
        let detail = self.source.player_detail(handle).await?;
        let handle = detail.player.handle.clone();

        let all_time_high = match self
            .source
            .player_stats()
            .await
            .into_iter()
            .find(|s| s.player.handle == handle)
        {
            Some(stats) => Some(stats.all_time_high),
            None => peak_ratings(&self.source.rating_history().await)
                .get(&handle)
                .copied(),
        };

        let player = detail.player;
        let recent = detail.recent;

        let mut opponents: Vec<&str> = recent
            .iter()
            .filter_map(|m| m.opponent_of(&handle))
            .filter(|o| *o != handle)
            .collect();
        opponents.sort_unstable();
        opponents.dedup();

        let mut rivals: Vec<Rivalry> = opponents
            .into_iter()
            .filter_map(|opponent| head_to_head(&handle, opponent, &recent))
            .collect();
        rivals.sort_by(|a, b| b.total_matches.cmp(&a.total_matches));

        let recent_record = calculate_record(&handle, &recent);

        Some(PlayerProfileView {
            profile: self.roster.profile_or_default(&handle),
            rank: EloRank::from_elo(player.elo),
            color: self.palette.color(&handle),
            record: Record {
                wins: player.wins,
                losses: player.losses,
                draws: player.draws(),
            },
            recent_win_rate: calculate_win_rate(
                recent_record.wins,
                recent_record.losses,
                recent_record.draws,
            ),
            recent_record,
            all_time_high,
            streak: calculate_streak(&handle, &recent),
            form: calculate_form(&handle, &recent),
            head_to_head: rivals,
            recent,
            player,
        })
    }

    /// Form of every player with enough matches, best first.
    ///
    /// Player details are fetched concurrently; a failed fetch drops that
    /// player from the table.
    pub async fn form_table(&mut self) -> Vec<FormData> {
        let min_played = self.display.min_form_matches;
        let players: Vec<Player> = self
            .source
            .players()
            .await
            .into_iter()
            .filter(|p| p.played >= min_played)
            .collect();

        let source = self.source;
        let details = join_all(players.iter().map(|p| source.player_detail(&p.handle))).await;

        let mut table: Vec<FormData> = details
            .into_iter()
            .flatten()
            .filter_map(|detail| calculate_form(&detail.player.handle, &detail.recent))
            .collect();

        table.sort_by(|a, b| b.form.cmp(&a.form).then(a.player.cmp(&b.player)));
        table
    }

    /// Form table with ratings and colors attached.
    pub async fn form_rows(&mut self) -> Vec<FormRow> {
        let table = self.form_table().await;
        table
            .into_iter()
            .map(|form| FormRow {
                rating: form.rating(),
                color: self.palette.color(&form.player),
                form,
            })
            .collect()
    }

    /// Current streaks, win streaks first.
    pub async fn streaks(&mut self) -> Vec<StreakRow> {
        let handles: Vec<String> = self
            .source
            .players()
            .await
            .into_iter()
            .map(|p| p.handle)
            .collect();
        let matches = self.source.all_matches().await;

        streak_table(&handles, &matches)
            .into_iter()
            .map(|streak| StreakRow {
                intensity: streak.intensity(),
                color: self.palette.color(&streak.player),
                streak,
            })
            .collect()
    }

    /// Rivalries with at least `min_matches` meetings, or the configured
    /// threshold.
    pub async fn rivalries(&mut self, min_matches: Option<u32>) -> Vec<RivalryRow> {
        let min_matches = min_matches.unwrap_or(self.display.min_rivalry_matches);
        let matches = self.source.all_matches().await;

        filter_rivalries(calculate_rivalries(&matches), min_matches)
            .into_iter()
            .map(|rivalry| RivalryRow {
                intensity: rivalry.intensity(),
                player1_color: self.palette.color(&rivalry.player1),
                player2_color: self.palette.color(&rivalry.player2),
                rivalry,
            })
            .collect()
    }

    /// Radar over every listed player. Empty with too few players.
    pub async fn radar(&mut self) -> RadarView {
        let handles: Vec<String> = self
            .source
            .players()
            .await
            .into_iter()
            .map(|p| p.handle)
            .collect();

        if handles.len() < self.display.min_radar_players {
            debug!(
                "Radar needs {} players, have {}",
                self.display.min_radar_players,
                handles.len()
            );
            return RadarView::default();
        }

        let matches = self.source.all_matches().await;
        RadarView {
            metrics: calculate_radar(&handles, &matches),
            colors: self.colors_for(&handles),
        }
    }

    /// Match counts by hour and weekday, `None` with too few matches.
    pub async fn match_frequency(&mut self) -> Option<MatchFrequency> {
        let matches = self.source.all_matches().await;
        if matches.len() < self.display.min_frequency_matches {
            debug!(
                "Frequency needs {} matches, have {}",
                self.display.min_frequency_matches,
                matches.len()
            );
            return None;
        }
        Some(calculate_match_frequency(&matches))
    }

    /// Recent rating trajectory over `window` rows, or the configured window.
    ///
    /// Without rating history a two-point trend is derived from the player
    /// list. `None` when fewer than two points remain.
    pub async fn elo_trend(&mut self, window: Option<usize>) -> Option<EloTrendView> {
        let window = window.unwrap_or(self.display.recent_elo_window);
        let history = self.source.rating_history().await;

        let trend = if history.is_empty() {
            let players = self.source.players().await;
            if players.is_empty() {
                return None;
            }
            fallback_elo_trend(&players)
        } else {
            recent_elo_trend(&history, window)
        };

        if trend.points.len() < 2 {
            return None;
        }

        let colors = self.colors_for(&trend.players);
        Some(EloTrendView { trend, colors })
    }

    /// Super Cup title holders from the roster, most titles first.
    pub fn champions(&mut self) -> Vec<ChampionRow> {
        let roster = self.roster;
        roster
            .champions()
            .into_iter()
            .map(|profile| ChampionRow {
                handle: profile.handle.clone(),
                championships: profile.ssc_wins,
                image_path: roster.image(&profile.handle).to_string(),
                color: self.palette.color(&profile.handle),
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::test_source::{player, MemorySource};
    use super::*;
    use crate::calculate::test_support::series;
    use crate::models::{PlayerStats, RatingHistoryRow, StreakType};
    use crate::palette::PLAYER_COLORS;
    use pretty_assertions::assert_eq;

    /// niko beats arul three times, arul and joel draw, joel beats niko twice.
    fn league() -> MemorySource {
        let matches = series(&[
            ("niko", "arul", 3, 1),
            ("arul", "niko", 0, 2),
            ("niko", "arul", 1, 0),
            ("arul", "joel", 2, 2),
            ("joel", "niko", 2, 1),
            ("niko", "joel", 0, 1),
        ]);
        let players = vec![
            player("arul", 976.0, 0, 3, 1),
            player("joel", 1031.0, 2, 0, 1),
            player("niko", 1012.0, 3, 2, 0),
        ];
        MemorySource::from_matches(players, matches)
    }

    #[tokio::test]
    async fn test_leaderboard_positions_and_colors() {
        let source = league();
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let rows = dashboard.leaderboard().await;
        let handles: Vec<&str> = rows.iter().map(|r| r.player.handle.as_str()).collect();

        assert_eq!(handles, vec!["joel", "niko", "arul"]);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].color, PLAYER_COLORS[0]);
        assert_eq!(rows[2].draws, 1);
        assert_eq!(rows[0].rank, EloRank::Advanced);
        assert_eq!(rows[2].rank, EloRank::Intermediate);
    }

    #[tokio::test]
    async fn test_backend_down_views_are_empty() {
        let source = MemorySource::default();
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        assert!(dashboard.leaderboard().await.is_empty());
        assert!(dashboard.competitors().await.is_empty());
        assert!(dashboard.form_table().await.is_empty());
        assert!(dashboard.streaks().await.is_empty());
        assert!(dashboard.rivalries(None).await.is_empty());
        assert!(dashboard.radar().await.metrics.is_empty());
        assert!(dashboard.match_frequency().await.is_none());
        assert!(dashboard.elo_trend(None).await.is_none());
        assert!(dashboard.player_profile("niko").await.is_none());
    }

    #[tokio::test]
    async fn test_competitors_fill_profiles() {
        let mut source = league();
        let players = source.players.as_mut().unwrap();
        players.push(player("stranger", 1000.0, 0, 0, 0));
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let cards = dashboard.competitors().await;
        let stranger = cards.iter().find(|c| c.player.handle == "stranger").unwrap();
        let niko = cards.iter().find(|c| c.player.handle == "niko").unwrap();

        assert_eq!(stranger.profile.playing_style, "Adaptive");
        assert_eq!(stranger.profile.image_path, roster.default_image);
        assert_eq!(niko.profile.ssc_wins, 4);
    }

    #[tokio::test]
    async fn test_player_profile() {
        let mut source = league();
        source.stats = Some(vec![PlayerStats {
            player: player("niko", 1012.0, 3, 2, 0),
            all_time_high: 1040.0,
        }]);
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let view = dashboard.player_profile("niko").await.unwrap();

        assert_eq!(view.record, Record { wins: 3, losses: 2, draws: 0 });
        assert_eq!(view.recent_record, Record { wins: 3, losses: 2, draws: 0 });
        assert_eq!(view.recent_win_rate, 60.0);
        assert_eq!(view.all_time_high, Some(1040.0));
        assert_eq!(view.streak.streak_type, StreakType::Loss);
        assert_eq!(view.streak.current_streak, 2);
        assert_eq!(view.streak.best_win_streak, 3);
        assert!(view.form.is_some());
        assert_eq!(view.head_to_head.len(), 2);
        assert_eq!(view.head_to_head[0].player1, "niko");
        assert_eq!(view.head_to_head[0].player2, "arul");
        assert_eq!(view.head_to_head[0].player1_wins, 3);
        assert_eq!(view.recent.len(), 5);
    }

    #[tokio::test]
    async fn test_player_profile_peak_from_history() {
        let mut source = league();
        source.history = Some(vec![
            RatingHistoryRow::new(0, [("arul".to_string(), 1000.0)].into_iter().collect()),
            RatingHistoryRow::new(1, [("arul".to_string(), 1008.0)].into_iter().collect()),
        ]);
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let view = dashboard.player_profile("arul").await.unwrap();
        assert_eq!(view.all_time_high, Some(1008.0));
    }

    #[tokio::test]
    async fn test_form_table_excludes_thin_records() {
        let source = league();
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        // Only niko has five matches
        let table = dashboard.form_table().await;
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].player, "niko");
        assert_eq!(table[0].form, 60);

        let rows = dashboard.form_rows().await;
        assert_eq!(rows[0].rating, FormRating::Good);
    }

    #[tokio::test]
    async fn test_form_table_drops_failed_details() {
        let mut source = league();
        source.details.remove("niko");
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        assert!(dashboard.form_table().await.is_empty());
    }

    #[tokio::test]
    async fn test_streaks_order() {
        let source = league();
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let rows = dashboard.streaks().await;
        let order: Vec<&str> = rows.iter().map(|r| r.streak.player.as_str()).collect();

        assert_eq!(order, vec!["joel", "niko", "arul"]);
        assert_eq!(rows[0].streak.current_streak, 2);
        assert_eq!(rows[0].intensity, StreakIntensity::BuildingMomentum);
        assert_eq!(rows[2].streak.streak_type, StreakType::Draw);
    }

    #[tokio::test]
    async fn test_rivalries_threshold() {
        let source = league();
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let rows = dashboard.rivalries(None).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rivalry.player1, "arul");
        assert_eq!(rows[0].rivalry.player2_wins, 3);
        assert_eq!(rows[0].intensity, RivalryIntensity::Developing);

        assert_eq!(dashboard.rivalries(Some(1)).await.len(), 3);
    }

    #[tokio::test]
    async fn test_rivalries_survive_missing_match_list() {
        let mut source = league();
        source.matches = None;
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let rows = dashboard.rivalries(Some(1)).await;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rivalry.total_matches, 3);
    }

    #[tokio::test]
    async fn test_radar_needs_two_players() {
        let source = MemorySource::from_matches(
            vec![player("niko", 1000.0, 1, 0, 0)],
            series(&[("niko", "ghost", 1, 0)]),
        );
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());
        assert!(dashboard.radar().await.metrics.is_empty());

        let source = league();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());
        let radar = dashboard.radar().await;
        assert_eq!(radar.metrics.len(), 6);
        assert_eq!(radar.colors.len(), 3);
        assert_eq!(radar.metrics[0].score("arul"), Some(0));
    }

    #[tokio::test]
    async fn test_radar_includes_players_without_matches() {
        let mut source = league();
        source
            .players
            .as_mut()
            .unwrap()
            .push(player("rookie", 1000.0, 0, 0, 0));
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let radar = dashboard.radar().await;
        assert_eq!(radar.colors.len(), 4);
        assert_eq!(radar.metrics[0].score("rookie"), Some(0));
        assert_eq!(radar.metrics[1].score("rookie"), Some(50));
    }

    #[tokio::test]
    async fn test_match_frequency_threshold() {
        let source = league();
        let roster = Roster::bundled();

        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());
        assert!(dashboard.match_frequency().await.is_none());

        let display = DisplayConfig {
            min_frequency_matches: 6,
            ..Default::default()
        };
        let mut dashboard = Dashboard::new(&source, &roster, display);
        let frequency = dashboard.match_frequency().await.unwrap();
        assert_eq!(frequency.total, 6);
    }

    #[test]
    fn test_elo_trend_fallback() {
        let source = league();
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let view = tokio_test::block_on(dashboard.elo_trend(None)).unwrap();
        assert_eq!(view.trend.points.len(), 2);
        assert_eq!(view.trend.points[1].rating("joel"), Some(1031.0));
        assert_eq!(view.colors.len(), 3);
    }

    #[test]
    fn test_elo_trend_window() {
        let mut source = league();
        source.history = Some(
            (0..20)
                .map(|n| {
                    RatingHistoryRow::new(
                        n,
                        [("niko".to_string(), 1000.0 + n as f64)].into_iter().collect(),
                    )
                })
                .collect(),
        );
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let view = tokio_test::block_on(dashboard.elo_trend(None)).unwrap();
        assert_eq!(view.trend.points.len(), 15);

        assert!(tokio_test::block_on(dashboard.elo_trend(Some(1))).is_none());
    }

    #[test]
    fn test_champions() {
        let source = MemorySource::default();
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let rows = dashboard.champions();
        assert_eq!(rows[0].handle, "niko");
        assert_eq!(rows[0].championships, 4);
        assert!(rows.iter().all(|r| r.championships > 0));
    }

    #[tokio::test]
    async fn test_colors_stable_within_session() {
        let source = league();
        let roster = Roster::bundled();
        let mut dashboard = Dashboard::new(&source, &roster, DisplayConfig::default());

        let leaderboard = dashboard.leaderboard().await;
        let streaks = dashboard.streaks().await;

        for row in &streaks {
            let on_board = leaderboard
                .iter()
                .find(|l| l.player.handle == row.streak.player)
                .unwrap();
            assert_eq!(on_board.color, row.color);
        }
    }
}
