//! Backend API client.
//!
//! Every endpoint is exposed twice on [`StatsSource`]: a `try_*` method that
//! returns `Result<_, FetchError>`, and a plain method that logs the failure
//! and collapses it to an empty value. Views only call the plain methods, so
//! a backend outage renders as "no data" instead of an error.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::models::{Match, Player, PlayerDetail, PlayerStats, RatingHistoryRow};

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Unexpected response from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::HttpStatus { status: 404, .. })
    }
}

/// Collapse a fetch result to a default value at the view boundary.
pub trait Degrade<T> {
    /// The value, or `T::default()` after logging the failure.
    fn or_empty(self, what: &str) -> T
    where
        T: Default;

    /// The value, or `None` after logging the failure.
    fn or_none(self, what: &str) -> Option<T>;
}

impl<T> Degrade<T> for Result<T, FetchError> {
    fn or_empty(self, what: &str) -> T
    where
        T: Default,
    {
        self.or_none(what).unwrap_or_default()
    }

    fn or_none(self, what: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to fetch {}: {}", what, e);
                None
            }
        }
    }
}

/// Source of backend data.
///
/// Implementors provide the `try_*` methods; the plain methods and
/// [`StatsSource::all_matches`] are derived from them.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn try_leaderboard(&self) -> Result<Vec<Player>, FetchError>;

    async fn try_players(&self) -> Result<Vec<Player>, FetchError>;

    async fn try_player_detail(&self, handle: &str) -> Result<PlayerDetail, FetchError>;

    async fn try_matches(&self) -> Result<Vec<Match>, FetchError>;

    async fn try_player_stats(&self) -> Result<Vec<PlayerStats>, FetchError>;

    async fn try_rating_history(&self) -> Result<Vec<RatingHistoryRow>, FetchError>;

    async fn leaderboard(&self) -> Vec<Player> {
        self.try_leaderboard().await.or_empty("leaderboard")
    }

    async fn players(&self) -> Vec<Player> {
        self.try_players().await.or_empty("players")
    }

    async fn player_detail(&self, handle: &str) -> Option<PlayerDetail> {
        self.try_player_detail(handle)
            .await
            .or_none(&format!("player {}", handle))
    }

    async fn matches(&self) -> Vec<Match> {
        self.try_matches().await.or_empty("matches")
    }

    async fn player_stats(&self) -> Vec<PlayerStats> {
        self.try_player_stats().await.or_empty("player stats")
    }

    async fn rating_history(&self) -> Vec<RatingHistoryRow> {
        self.try_rating_history().await.or_empty("rating history")
    }

    /// Every match, most recent first.
    ///
    /// Falls back to merging each player's recent matches when the match
    /// list is unavailable. Player feeds are fetched concurrently and a
    /// failed feed only loses that player's matches.
    async fn all_matches(&self) -> Vec<Match> {
        match self.try_matches().await {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Match list unavailable ({}), merging player feeds", e);
                let players = self.players().await;
                let details =
                    join_all(players.iter().map(|p| self.player_detail(&p.handle))).await;
                merge_match_feeds(details.into_iter().flatten().map(|d| d.recent))
            }
        }
    }
}

/// Union of several match feeds without duplicates, most recent first.
pub fn merge_match_feeds<I>(feeds: I) -> Vec<Match>
where
    I: IntoIterator<Item = Vec<Match>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for m in feeds.into_iter().flatten() {
        let (played_at, p1, p2, score) = m.dedup_key();
        let key = (played_at, p1.to_string(), p2.to_string(), score.to_string());
        if seen.insert(key) {
            merged.push(m);
        }
    }

    merged.sort_by(|a, b| b.played_at.cmp(&a.played_at));
    merged
}

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://localhost:8000`
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("ssc-stats/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Deserialize)]
struct PlayersEnvelope {
    players: Vec<Player>,
}

#[derive(Deserialize)]
struct PlayerStatsEnvelope {
    players: Vec<PlayerStats>,
}

#[derive(Deserialize)]
struct MatchesEnvelope {
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    history: Vec<RatingHistoryRow>,
}

/// HTTP client for the tournament backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(config.base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("ssc-stats")),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|source| FetchError::Http {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self { client, base_url })
    }

    /// Create a client for `base_url` with default settings.
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, FetchError> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);

        let http_error = |source| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(http_error)?;
        serde_json::from_str(&body).map_err(|source| FetchError::Json {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl StatsSource for ApiClient {
    async fn try_leaderboard(&self) -> Result<Vec<Player>, FetchError> {
        let envelope: PlayersEnvelope = self.get_json(&["api", "leaderboard"]).await?;
        Ok(envelope.players)
    }

    async fn try_players(&self) -> Result<Vec<Player>, FetchError> {
        let envelope: PlayersEnvelope = self.get_json(&["api", "players"]).await?;
        Ok(envelope.players)
    }

    async fn try_player_detail(&self, handle: &str) -> Result<PlayerDetail, FetchError> {
        self.get_json(&["api", "player", handle]).await
    }

    async fn try_matches(&self) -> Result<Vec<Match>, FetchError> {
        let envelope: MatchesEnvelope = self.get_json(&["api", "matches"]).await?;
        Ok(envelope.matches)
    }

    async fn try_player_stats(&self) -> Result<Vec<PlayerStats>, FetchError> {
        let envelope: PlayerStatsEnvelope = self.get_json(&["api", "player-stats"]).await?;
        Ok(envelope.players)
    }

    async fn try_rating_history(&self) -> Result<Vec<RatingHistoryRow>, FetchError> {
        let envelope: HistoryEnvelope = self.get_json(&["api", "rating-history"]).await?;
        Ok(envelope.history)
    }
}
