use crate::store::{DocumentKind, DocumentStore};
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_NBA_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/basketball/nba";

/// NBA client backed by ESPN's public site API.
#[derive(Debug, Clone)]
pub struct NbaApi {
    client: Client,
    timeout: Duration,
    base_url: String,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("courtside/0.1 (terminal scoreboard)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            base_url: ESPN_NBA_SITE_V2.to_owned(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl NbaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host serving the same paths.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Scoreboard document for one day, `date` as `YYYYMMDD`.
    pub async fn fetch_scoreboard(&self, date: &str) -> ApiResult<Value> {
        let date = date.trim();
        if date.is_empty() {
            return Err(ApiError::Other("scoreboard date is empty".into()));
        }
        let url = format!("{}/scoreboard?dates={date}", self.base_url);
        self.get(&url).await
    }

    /// Summary document for one game.
    pub async fn fetch_summary(&self, event_id: &str) -> ApiResult<Value> {
        let event_id = event_id.trim();
        if event_id.is_empty() {
            return Err(ApiError::Other("summary event id is empty".into()));
        }
        let url = format!("{}/summary?event={event_id}", self.base_url);
        self.get(&url).await
    }

    /// Fetch one document into its store slot. A failed fetch leaves the slot
    /// absent and hands the error back for reporting.
    pub async fn refresh(&self, store: &DocumentStore, kind: DocumentKind, key: &str) -> ApiResult<()> {
        let fetched = match kind {
            DocumentKind::Scoreboard => self.fetch_scoreboard(key).await,
            DocumentKind::Summary => self.fetch_summary(key).await,
        };

        let key = key.trim();
        match fetched {
            Ok(doc) => {
                debug!("stored {} document for {key}", kind.label());
                store.set_fetched(kind, key, Some(doc));
                Ok(())
            }
            Err(e) => {
                warn!("{} fetch for {key} failed, clearing slot: {e}", kind.label());
                store.set(kind, None);
                Err(e)
            }
        }
    }

    pub async fn refresh_scoreboard(&self, store: &DocumentStore, date: &str) -> ApiResult<()> {
        self.refresh(store, DocumentKind::Scoreboard, date).await
    }

    pub async fn refresh_summary(&self, store: &DocumentStore, event_id: &str) -> ApiResult<()> {
        self.refresh(store, DocumentKind::Summary, event_id).await
    }

    async fn get(&self, url: &str) -> ApiResult<Value> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}
