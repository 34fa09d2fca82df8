use crate::types::{FetchConfig, QuietHnError, Result, DEFAULT_API_BASE_URL};
use clap::{Parser, ValueEnum};
use std::time::Duration;

/// How requests obtain their stories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Serve the snapshot kept fresh by a background refresher
    Cached,
    /// Fetch top stories on every request
    Live,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "quiet-hn", about = "A quieter Hacker News front page")]
pub struct Cli {
    /// The port to start the web server on
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// The number of top stories to display
    #[arg(long, default_value_t = 30)]
    pub num_stories: usize,

    #[arg(long, value_enum, default_value_t = Mode::Cached)]
    pub mode: Mode,

    /// Upper bound on concurrent item requests
    #[arg(long, default_value_t = 10)]
    pub max_concurrency: usize,

    /// Seconds between background refreshes (cached mode)
    #[arg(long, default_value_t = 10)]
    pub refresh_interval_secs: u64,

    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// HTTP timeout for API requests, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Retries for the top stories list
    #[arg(long, default_value_t = 2)]
    pub max_retries: u32,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(QuietHnError::InvalidConfig("port cannot be 0".into()));
        }
        if self.num_stories == 0 {
            return Err(QuietHnError::InvalidConfig(
                "num-stories must be at least 1".into(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(QuietHnError::InvalidConfig(
                "max-concurrency must be at least 1".into(),
            ));
        }
        if self.mode == Mode::Cached && self.refresh_interval_secs == 0 {
            return Err(QuietHnError::InvalidConfig(
                "refresh-interval-secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.api_base_url.clone(),
            timeout_seconds: self.timeout_secs,
            max_retries: self.max_retries,
            ..FetchConfig::default()
        }
    }
}
