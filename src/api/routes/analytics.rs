use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::dashboard::{EloTrendView, FormRow, RadarView, RivalryRow, StreakRow};
use crate::models::MatchFrequency;

#[derive(Debug, Deserialize)]
pub struct RivalryParams {
    pub min_matches: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct EloTrendParams {
    pub window: Option<usize>,
}

pub async fn form(State(state): State<AppState>) -> Json<Vec<FormRow>> {
    let mut dashboard = state.dashboard();
    Json(dashboard.form_rows().await)
}

pub async fn streaks(State(state): State<AppState>) -> Json<Vec<StreakRow>> {
    let mut dashboard = state.dashboard();
    Json(dashboard.streaks().await)
}

pub async fn rivalries(
    State(state): State<AppState>,
    Query(params): Query<RivalryParams>,
) -> Json<Vec<RivalryRow>> {
    let mut dashboard = state.dashboard();
    Json(dashboard.rivalries(params.min_matches).await)
}

pub async fn radar(State(state): State<AppState>) -> Json<RadarView> {
    let mut dashboard = state.dashboard();
    Json(dashboard.radar().await)
}

/// `null` until enough matches have been played.
pub async fn frequency(State(state): State<AppState>) -> Json<Option<MatchFrequency>> {
    let mut dashboard = state.dashboard();
    Json(dashboard.match_frequency().await)
}

/// `null` until at least two rating points exist.
pub async fn elo_trend(
    State(state): State<AppState>,
    Query(params): Query<EloTrendParams>,
) -> Result<Json<Option<EloTrendView>>, ApiError> {
    if params.window == Some(0) {
        return Err(ApiError::BadRequest(
            "window must be greater than 0".to_string(),
        ));
    }

    let mut dashboard = state.dashboard();
    Ok(Json(dashboard.elo_trend(params.window).await))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_form() {
        let (status, json) = get_json(league_app(), "/stats/form").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["player"], "niko");
        assert_eq!(rows[0]["last5Matches"][0], "W");
        assert_eq!(rows[0]["rating"], "GOOD");
    }

    #[tokio::test]
    async fn test_streaks() {
        let (status, json) = get_json(league_app(), "/stats/streaks").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["streakType"], "win");
        assert!(rows[0]["color"].as_str().unwrap().starts_with('#'));
    }

    #[tokio::test]
    async fn test_rivalries_threshold_param() {
        let (_, json) = get_json(league_app(), "/stats/rivalries").await;
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["player1"], "arul");
        assert_eq!(rows[0]["player2"], "niko");
        assert_eq!(rows[0]["totalMatches"], 4);
        assert_eq!(rows[0]["player2BiggestWin"]["score"], "3-1");

        let (_, json) = get_json(league_app(), "/stats/rivalries?min_matches=1").await;
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_radar() {
        let (status, json) = get_json(league_app(), "/stats/radar").await;

        assert_eq!(status, StatusCode::OK);
        let metrics = json["metrics"].as_array().unwrap();
        assert_eq!(metrics.len(), 6);
        assert_eq!(metrics[0]["metric"], "Win Rate");
        assert_eq!(metrics[0]["fullMark"], 100);
        assert_eq!(metrics[0]["scores"]["niko"], 60);
    }

    #[tokio::test]
    async fn test_frequency_needs_matches() {
        let (status, json) = get_json(league_app(), "/stats/frequency").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json.is_null());
    }

    #[tokio::test]
    async fn test_elo_trend() {
        let (status, json) = get_json(league_app(), "/stats/elo-trend?window=10").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["points"].as_array().unwrap().len(), 2);
        assert_eq!(json["points"][0]["match_number"], 0);
        assert_eq!(json["players"].as_array().unwrap().len(), 3);

        let (status, _) = get_json(league_app(), "/stats/elo-trend?window=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_views_empty_when_backend_down() {
        for uri in ["/stats/form", "/stats/streaks", "/stats/rivalries"] {
            let (status, json) = get_json(empty_app(), uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(json, serde_json::json!([]), "{}", uri);
        }

        let (_, json) = get_json(empty_app(), "/stats/radar").await;
        assert_eq!(json["metrics"], serde_json::json!([]));
    }
}
