use crate::domain::StoreOffer;
use crate::error::Result;
use crate::infrastructure::{HttpFetcher, RawOffer, RedirectTarget};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};
use tracing::warn;

/// Follows one redirect hop of a store link and returns the vendor URL as
/// `scheme://host[:port]/path`. Query and fragment are dropped.
pub async fn resolve_redirect_url(fetcher: &HttpFetcher, url: &str) -> Result<Option<String>> {
    let target = fetcher.fetch_no_redirect(url).await?;
    Ok(vendor_location(&target))
}

fn vendor_location(target: &RedirectTarget) -> Option<String> {
    if !target.status.is_redirection() {
        return None;
    }

    let location = target.url.join(target.location.as_deref()?).ok()?;
    let host = location.host_str()?;
    let port = location
        .port()
        .map(|port| format!(":{port}"))
        .unwrap_or_default();

    Some(format!(
        "{}://{}{}{}",
        location.scheme(),
        host,
        port,
        location.path()
    ))
}

/// Store offers of one game. `abandoned` counts the links that were still
/// unresolved when the deadline passed.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOffers {
    pub stores: Vec<StoreOffer>,
    pub abandoned: usize,
}

/// Resolves every offer's store link concurrently. The output keeps the
/// order of `raw_offers`; an offer whose link cannot be resolved, or is not
/// resolved before `deadline`, gets an empty URL.
pub async fn resolve_offers(
    fetcher: &HttpFetcher,
    raw_offers: Vec<RawOffer>,
    max_concurrent: usize,
    deadline: Option<Instant>,
) -> ResolvedOffers {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut join_set = JoinSet::new();

    let mut slots: Vec<StoreOffer> = raw_offers
        .iter()
        .map(|raw| StoreOffer {
            seller: raw.seller.clone(),
            price: raw.price,
            url: String::new(),
        })
        .collect();

    for (index, raw) in raw_offers.into_iter().enumerate() {
        let Some(url) = raw.url else {
            warn!("Offer from {} has no store link", raw.seller);
            continue;
        };

        let fetcher = fetcher.clone();
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let resolved = match resolve_redirect_url(&fetcher, &url).await {
                Ok(Some(resolved)) => Some(resolved),
                Ok(None) => {
                    warn!("Store link {} did not redirect to a vendor", url);
                    None
                }
                Err(e) => {
                    warn!("Could not resolve store link {}: {}", url, e);
                    None
                }
            };
            (index, resolved)
        });
    }

    let mut abandoned = 0;
    loop {
        let next = match deadline {
            Some(deadline) => match timeout_at(deadline, join_set.join_next()).await {
                Ok(next) => next,
                Err(_) => {
                    abandoned = join_set.len();
                    warn!("Abandoning {} unresolved store links", abandoned);
                    join_set.abort_all();
                    break;
                }
            },
            None => join_set.join_next().await,
        };

        match next {
            Some(Ok((index, Some(url)))) => slots[index].url = url,
            Some(Ok((_, None))) => {}
            Some(Err(e)) => warn!("Store link task failed: {}", e),
            None => break,
        }
    }

    ResolvedOffers {
        stores: slots,
        abandoned,
    }
}
