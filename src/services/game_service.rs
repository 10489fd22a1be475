use crate::config::ScraperConfig;
use crate::domain::{
    GameDetail, GameListResult, GameSummary, ListQuery, Region, DEFAULT_GAME_TYPE,
};
use crate::error::Result;
use crate::services::collector::collect_games;
use crate::services::detail::fetch_game_detail;
use crate::services::regions::list_regions;
use crate::services::session::ScrapeSession;
use std::sync::Arc;
use tracing::info;

/// Entry point for callers. Each call runs on its own `ScrapeSession`, so
/// concurrent calls for different regions never share site state.
#[derive(Debug, Clone)]
pub struct GameService {
    config: Arc<ScraperConfig>,
}

impl GameService {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        config.validate()?;
        info!("Created game service for {}", config.base());
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        let session = ScrapeSession::unscoped(Arc::clone(&self.config))?;
        list_regions(&session).await
    }

    /// Games matching `title`, restricted to the `[offset, offset + limit)`
    /// window of the site's ranking.
    pub async fn scrape_games(
        &self,
        title: &str,
        region: &str,
        limit: usize,
        offset: usize,
    ) -> Result<GameListResult> {
        let region = Region::new(region)?;
        let query = ListQuery::new(title, region.clone(), limit, offset);
        let session = ScrapeSession::for_region(Arc::clone(&self.config), region)?;
        collect_games(&session, &query).await
    }

    /// A single game. `game_type` defaults to `game`.
    pub async fn scrape_game(
        &self,
        id: &str,
        region: &str,
        game_type: Option<&str>,
    ) -> Result<GameDetail> {
        info!("Scraping game {}", id);
        let region = Region::new(region)?;
        let summary = GameSummary::new(id, game_type.unwrap_or(DEFAULT_GAME_TYPE));
        let session = ScrapeSession::for_region(Arc::clone(&self.config), region)?;
        fetch_game_detail(&session, &summary).await
    }
}
