use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::dashboard::{ChampionRow, CompetitorCard, LeaderboardRow, PlayerProfileView};

pub async fn leaderboard(State(state): State<AppState>) -> Json<Vec<LeaderboardRow>> {
    let mut dashboard = state.dashboard();
    Json(dashboard.leaderboard().await)
}

pub async fn competitors(State(state): State<AppState>) -> Json<Vec<CompetitorCard>> {
    let mut dashboard = state.dashboard();
    Json(dashboard.competitors().await)
}

pub async fn player(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<PlayerProfileView>, ApiError> {
    let mut dashboard = state.dashboard();
    dashboard
        .player_profile(&handle)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("player {}", handle)))
}

pub async fn champions(State(state): State<AppState>) -> Json<Vec<ChampionRow>> {
    let mut dashboard = state.dashboard();
    Json(dashboard.champions())
}
