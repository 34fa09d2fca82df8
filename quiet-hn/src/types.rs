use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
pub use interfaces::defs::{HnApi, ItemRecord, PageData, PageRenderer, Story, StoryId};

pub const DEFAULT_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0/";

/// A story tagged with its position in the ranking it was resolved from.
#[derive(Debug, Clone)]
pub struct RankedStory {
    pub rank: usize,
    pub story: Story,
}

/// Outcome of resolving a single ranking id.
#[derive(Debug)]
pub enum Resolution {
    Story(Story),
    NotAStory,
    Failed(anyhow::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// Extra attempts for the ranking list. Items are never retried.
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: "Quiet-HN/1.0".to_string(),
            timeout_seconds: 10,
            max_retries: 2,
            retry_delay_ms: 250,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuietHnError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load top stories: {0}")]
    RankingFetch(#[source] anyhow::Error),

    #[error("Failed to load top stories: {0}")]
    CacheUnavailable(String),

    #[error("Top stories are still loading, waited {waited_ms}ms")]
    CacheWarmup { waited_ms: u64 },

    #[error("Failed to process the template: {0}")]
    Render(#[source] anyhow::Error),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuietHnError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuietHnError::CacheWarmup { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for QuietHnError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, QuietHnError>;
