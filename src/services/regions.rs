use crate::domain::Region;
use crate::error::Result;
use crate::infrastructure::{extract_region_codes, Page};
use crate::services::session::ScrapeSession;
use tracing::{info, warn};

/// Regions offered by the site's settings menu. Changed markup gives an
/// empty list rather than an error.
pub async fn list_regions(session: &ScrapeSession) -> Result<Vec<Region>> {
    info!("Scraping regions");
    let page = session.fetcher().fetch(&session.home_url()).await?;

    let regions: Vec<Region> = read_region_codes(&page)?
        .into_iter()
        .filter_map(|code| match Region::new(&code) {
            Ok(region) => Some(region),
            Err(e) => {
                warn!("Ignoring region {:?}: {}", code, e);
                None
            }
        })
        .collect();

    info!("Found {} regions", regions.len());
    Ok(regions)
}

fn read_region_codes(page: &Page) -> Result<Vec<String>> {
    extract_region_codes(&page.document())
}
