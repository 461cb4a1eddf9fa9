pub mod analytics;
pub mod players;

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::calculate::test_support::series;
    use crate::config::AppConfig;
    use crate::dashboard::test_source::{player, MemorySource};
    use crate::roster::Roster;

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub fn state_for(source: MemorySource) -> AppState {
        AppState::new(
            Arc::new(source),
            Arc::new(Roster::bundled()),
            &AppConfig::default(),
        )
    }

    /// niko and arul meet four times, joel plays once.
    pub fn league_app() -> axum::Router {
        let matches = series(&[
            ("niko", "arul", 3, 1),
            ("arul", "niko", 2, 2),
            ("niko", "arul", 1, 0),
            ("arul", "niko", 1, 0),
            ("joel", "niko", 0, 4),
        ]);
        let players = vec![
            player("arul", 995.0, 1, 2, 1),
            player("joel", 984.0, 0, 1, 0),
            player("niko", 1021.0, 3, 1, 1),
        ];
        build_router(state_for(MemorySource::from_matches(players, matches)))
    }

    pub fn empty_app() -> axum::Router {
        build_router(state_for(MemorySource::default()))
    }
}
