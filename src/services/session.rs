use crate::config::ScraperConfig;
use crate::domain::Region;
use crate::error::{GameError, Result};
use crate::infrastructure::HttpFetcher;
use reqwest::Url;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// The fetches made on behalf of one inbound call.
///
/// Every session owns a fresh cookie jar, so the region picked here never
/// leaks into another caller's session. Clones share the jar and the
/// region-selected flag.
#[derive(Debug, Clone)]
pub struct ScrapeSession {
    config: Arc<ScraperConfig>,
    fetcher: HttpFetcher,
    region: Option<Region>,
    region_selected: Arc<OnceCell<()>>,
}

impl ScrapeSession {
    /// A session without a region, for pages that do not depend on one.
    pub fn unscoped(config: Arc<ScraperConfig>) -> Result<Self> {
        Self::build(config, None)
    }

    pub fn for_region(config: Arc<ScraperConfig>, region: Region) -> Result<Self> {
        Self::build(config, Some(region))
    }

    fn build(config: Arc<ScraperConfig>, region: Option<Region>) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self {
            config,
            fetcher,
            region,
            region_selected: Arc::new(OnceCell::new()),
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &HttpFetcher {
        &self.fetcher
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// Switches the site to the session's region. Runs at most once per
    /// session; a failed switch is returned and may be attempted again.
    pub async fn select_region(&self) -> Result<()> {
        let Some(region) = &self.region else {
            debug!("Session has no region, skipping region switch");
            return Ok(());
        };

        self.region_selected
            .get_or_try_init(|| async {
                info!("Selecting region {}", region);
                self.fetcher.fetch(&self.region_switch_url(region)).await?;
                Ok::<(), GameError>(())
            })
            .await?;
        Ok(())
    }

    pub fn home_url(&self) -> String {
        format!("{}/", self.config.base())
    }

    pub fn region_switch_url(&self, region: &Region) -> String {
        format!("{}/{}/region/switch/?return=%2F", self.config.base(), region)
    }

    /// Search URL for `title`; `page` is 1-based and omitted for the first probe.
    pub fn games_url(&self, title: &str, page: Option<usize>) -> Result<String> {
        let mut url = Url::parse(&format!("{}/games/", self.config.base()))
            .map_err(|e| GameError::Config(e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("title", title);
            query.append_pair("view", "list");
            if let Some(page) = page {
                query.append_pair("page", &page.to_string());
            }
        }
        Ok(url.to_string())
    }

    pub fn game_url(&self, game_type: &str, id: &str) -> String {
        format!("{}/{}/{}/", self.config.base(), game_type, id)
    }
}
