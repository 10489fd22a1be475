//! Turns a title search into an ordered list of fully scraped games.
//!
//! Rows are scanned page by page; each accepted row is handed to its own task
//! together with its slot index, and the results are written back by slot so
//! the output follows the search ranking, not the order tasks finish in.

use crate::domain::{GameDetail, GameListResult, GameSummary, ListQuery, SlotFailure};
use crate::error::{GameError, Result};
use crate::infrastructure::{extract_listing, ListingPage, ListingRow, Page};
use crate::services::detail::{scrape_game_detail, GameScrape};
use crate::services::pagination::PagePlan;
use crate::services::session::ScrapeSession;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, warn};

type SlotOutcome = (usize, Result<GameScrape>);

pub async fn collect_games(session: &ScrapeSession, query: &ListQuery) -> Result<GameListResult> {
    info!("Scraping games matching {:?} in {}", query.title, query.region);
    session.select_region().await?;

    let probe_url = session.games_url(&query.title, None)?;
    let probe = read_listing(&session.fetcher().fetch(&probe_url).await?)?;
    let page_size = probe.rows.len();

    info!("Games per page {}", page_size);
    info!("Amount found {}", probe.total_amount);

    let plan = PagePlan::new(probe.total_amount, page_size, query.limit, query.offset);
    if plan.is_empty() {
        if probe.total_amount > 0 && page_size == 0 {
            warn!("Site reports {} games but no rows were found", probe.total_amount);
        }
        return Ok(GameListResult::empty(probe.total_amount));
    }

    let mut collector = GameCollector::new(session.clone());
    let mut probe_rows = Some(probe.rows);

    for page in plan.pages() {
        let rows = match probe_rows.take().filter(|_| page == 1) {
            Some(rows) => rows,
            None => {
                info!("Visiting page {}, games dispatched {}", page, collector.dispatched());
                let url = session.games_url(&query.title, Some(page))?;
                // Dropping the collector on error aborts the in-flight game tasks.
                read_listing(&session.fetcher().fetch(&url).await?)?.rows
            }
        };

        for row in rows {
            if plan.is_done(collector.dispatched()) {
                break;
            }
            if !plan.accepts(page, row.position, collector.dispatched()) {
                continue;
            }
            match summary_of(&row) {
                Ok(summary) => collector.dispatch(summary),
                Err(e) => warn!("Could not collect row {} of page {}: {}", row.position, page, e),
            }
        }

        if plan.is_done(collector.dispatched()) {
            break;
        }
    }

    info!("Games dispatched: {}", collector.dispatched());
    let (games, failures) = collector.finish().await;
    Ok(GameListResult::new(games, probe.total_amount, failures))
}

fn read_listing(page: &Page) -> Result<ListingPage> {
    extract_listing(&page.document())
}

fn summary_of(row: &ListingRow) -> Result<GameSummary> {
    let href = row
        .href
        .as_deref()
        .ok_or_else(|| GameError::Validation("row has no game link".to_string()))?;
    GameSummary::from_href(href)
}

/// Runs one detail scrape per dispatched game, at most
/// `max_concurrent_games` at a time, and gathers them back by slot.
pub struct GameCollector {
    session: ScrapeSession,
    semaphore: Arc<Semaphore>,
    tasks: JoinSet<SlotOutcome>,
    summaries: Vec<GameSummary>,
}

impl GameCollector {
    pub fn new(session: ScrapeSession) -> Self {
        let permits = session.config().max_concurrent_games.max(1);
        Self {
            session,
            semaphore: Arc::new(Semaphore::new(permits)),
            tasks: JoinSet::new(),
            summaries: Vec::new(),
        }
    }

    pub fn dispatched(&self) -> usize {
        self.summaries.len()
    }

    /// Starts the scrape of `summary` in the next free slot.
    pub fn dispatch(&mut self, summary: GameSummary) {
        let index = self.summaries.len();
        info!("Dispatching {}/{} to slot {}", summary.game_type, summary.id, index);

        let session = self.session.clone();
        let semaphore = Arc::clone(&self.semaphore);
        let task_timeout = session.config().task_timeout();
        let task_summary = summary.clone();

        self.tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let deadline = Instant::now() + task_timeout;
            let outcome = scrape_game_detail(&session, &task_summary, Some(deadline)).await;
            (index, outcome)
        });

        self.summaries.push(summary);
    }

    /// Waits for every dispatched task and returns the games in slot order.
    /// Failed slots hold whatever was read before the failure, at least the
    /// bare `{id, type}` detail, and are listed in the returned failures.
    pub async fn finish(mut self) -> (Vec<GameDetail>, Vec<SlotFailure>) {
        let mut slots: Vec<Option<GameDetail>> = vec![None; self.summaries.len()];
        let mut failures = Vec::new();

        while let Some(joined) = self.tasks.join_next().await {
            let (index, outcome) = match joined {
                Ok(slot) => slot,
                Err(e) => {
                    warn!("Game task failed: {}", e);
                    continue;
                }
            };

            let summary = &self.summaries[index];
            let (detail, error) = match outcome {
                Ok(scrape) if scrape.abandoned_offers == 0 => (scrape.detail, None),
                Ok(scrape) => {
                    let url = self.session.game_url(&summary.game_type, &summary.id);
                    (scrape.detail, Some(GameError::Timeout { url }))
                }
                Err(e) => (GameDetail::from_summary(summary), Some(e)),
            };

            if let Some(e) = error {
                warn!("Game {} degraded: {}", summary.id, e);
                failures.push(SlotFailure {
                    index,
                    id: summary.id.clone(),
                    status: e.status_code(),
                    message: e.to_string(),
                });
            }
            slots[index] = Some(detail);
        }

        let games = slots
            .into_iter()
            .zip(&self.summaries)
            .enumerate()
            .map(|(index, (slot, summary))| {
                slot.unwrap_or_else(|| {
                    failures.push(SlotFailure {
                        index,
                        id: summary.id.clone(),
                        status: None,
                        message: "game task did not complete".to_string(),
                    });
                    GameDetail::from_summary(summary)
                })
            })
            .collect();

        failures.sort_by_key(|failure| failure.index);
        (games, failures)
    }
}
