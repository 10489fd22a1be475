use crate::domain::{GameDetail, GameSummary};
use crate::error::{GameError, Result};
use crate::infrastructure::{extract_product, Page, ProductData};
use crate::services::offers::resolve_offers;
use crate::services::session::ScrapeSession;
use std::future::Future;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

/// A scraped game and the number of its store links left unresolved when
/// the deadline passed.
#[derive(Debug, Clone)]
pub struct GameScrape {
    pub detail: GameDetail,
    pub abandoned_offers: usize,
}

/// Fetches one game page and resolves its store links.
///
/// A page without structured data yields a detail carrying only the id and
/// type. A non-2xx response is returned as `GameError::Fetch` with its status.
pub async fn fetch_game_detail(
    session: &ScrapeSession,
    summary: &GameSummary,
) -> Result<GameDetail> {
    Ok(scrape_game_detail(session, summary, None).await?.detail)
}

/// Like [`fetch_game_detail`], bounded by `deadline`. Missing the deadline
/// before the page is read is a `GameError::Timeout`; missing it while store
/// links resolve keeps the page's fields and leaves those links empty.
pub async fn scrape_game_detail(
    session: &ScrapeSession,
    summary: &GameSummary,
    deadline: Option<Instant>,
) -> Result<GameScrape> {
    let url = session.game_url(&summary.game_type, &summary.id);
    let page = before(deadline, &url, async {
        session.select_region().await?;
        session.fetcher().fetch(&url).await
    })
    .await?;
    let detail = GameDetail::from_summary(summary);

    let Some(product) = read_product(&page)? else {
        warn!("No structured data on {}", page.url);
        return Ok(GameScrape {
            detail,
            abandoned_offers: 0,
        });
    };

    let name = product.name.clone().unwrap_or_else(|| summary.id.clone());
    info!("Started processing game: {}", name);

    let detail = detail.with_product(&product);
    let offers = resolve_offers(
        session.fetcher(),
        product.offers,
        session.config().max_concurrent_offers,
        deadline,
    )
    .await;

    info!("Done processing game: {} ({} stores)", name, offers.stores.len());

    Ok(GameScrape {
        detail: detail.with_stores(offers.stores),
        abandoned_offers: offers.abandoned,
    })
}

async fn before<T>(
    deadline: Option<Instant>,
    url: &str,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    let Some(deadline) = deadline else {
        return work.await;
    };
    timeout_at(deadline, work)
        .await
        .unwrap_or_else(|_| Err(GameError::Timeout { url: url.to_string() }))
}

fn read_product(page: &Page) -> Result<Option<ProductData>> {
    extract_product(&page.document())
}
