use crate::error::{GameError, Result};
use scraper::{ElementRef, Selector};

pub(crate) mod listing;
pub(crate) mod product;
pub(crate) mod regions;

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| GameError::Selector(e.to_string()))
}

pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
