use crate::config::cli::Args;
use crate::error::{GameError, Result};
use clap::Parser;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod cli;

pub use cli::Commands;

pub const DEFAULT_BASE_URL: &str = "https://gg.deals";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Immutable settings every scrape session is built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub task_timeout_secs: u64,
    pub max_concurrent_games: usize,
    pub max_concurrent_offers: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
            task_timeout_secs: 60,
            max_concurrent_games: 8,
            max_concurrent_offers: 4,
        }
    }
}

impl ScraperConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config: ScraperConfig = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .map_err(|e| GameError::Config(format!("invalid base url {}: {e}", self.base_url)))?;
        if self.max_concurrent_games == 0 {
            return Err(GameError::Config(
                "max_concurrent_games must be at least 1".to_string(),
            ));
        }
        if self.max_concurrent_offers == 0 {
            return Err(GameError::Config(
                "max_concurrent_offers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL without the trailing slash, ready for `format!` joins.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }
}

pub struct Config {
    pub args: Args,
    pub scraper_config: ScraperConfig,
}

impl Config {
    pub fn new() -> Result<Self> {
        let args = Args::parse();
        let scraper_config = Self::scraper_config_from(&args)?;

        Ok(Self {
            args,
            scraper_config,
        })
    }

    fn scraper_config_from(args: &Args) -> Result<ScraperConfig> {
        let mut scraper_config = match &args.config_file {
            Some(path) => {
                info!("Loading scraper config from {:?}", path);
                ScraperConfig::from_file(path)?
            }
            None => ScraperConfig::default(),
        };

        if let Some(base_url) = &args.base_url {
            scraper_config.base_url = base_url.clone();
        }
        if let Some(games) = args.max_concurrent_games {
            scraper_config.max_concurrent_games = games;
        }
        if let Some(offers) = args.max_concurrent_offers {
            scraper_config.max_concurrent_offers = offers;
        }
        if let Some(secs) = args.task_timeout_secs {
            scraper_config.task_timeout_secs = secs;
        }

        scraper_config.validate()?;
        Ok(scraper_config)
    }
}
