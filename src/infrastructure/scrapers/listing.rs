use super::{element_text, selector};
use crate::error::Result;
use scraper::{Html, Selector};

/// One `game-list-item` row, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub position: usize,
    pub href: Option<String>,
}

/// A search result page: the site's total hit count and the rows on this page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub total_amount: usize,
    pub rows: Vec<ListingRow>,
}

pub struct ListingSelectors {
    pub counter: Selector,
    pub row: Selector,
    pub link: Selector,
}

impl ListingSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            counter: selector("span.search-results-counter span.value")?,
            row: selector("div.list-items div.game-list-item")?,
            link: selector("a.full-link")?,
        })
    }
}

pub fn extract_listing(document: &Html) -> Result<ListingPage> {
    let selectors = ListingSelectors::new()?;

    let total_amount = document
        .select(&selectors.counter)
        .next()
        .map(|el| parse_counter(&element_text(&el)))
        .unwrap_or(0);

    let rows = document
        .select(&selectors.row)
        .enumerate()
        .map(|(position, row)| ListingRow {
            position,
            href: row
                .select(&selectors.link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_owned),
        })
        .collect();

    Ok(ListingPage { total_amount, rows })
}

/// "1,234 results" -> 1234. Anything unreadable counts as no results.
fn parse_counter(text: &str) -> usize {
    text.split_whitespace()
        .next()
        .map(|token| token.replace([',', '.', '\u{a0}'], ""))
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}
