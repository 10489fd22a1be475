use super::selector;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

static REGION_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/([a-z0-9-]+)/region/").unwrap());

/// Region codes offered by the settings menu, in menu order without repeats.
pub fn extract_region_codes(document: &Html) -> Result<Vec<String>> {
    // The menu has shipped both as onclick spans and as plain links.
    let options = selector(
        "div#settings-menu-region span.settings-menu-select-option-link, a.settings-menu-select-option-link",
    )?;

    let mut codes: Vec<String> = Vec::new();
    for option in document.select(&options) {
        let target = option
            .value()
            .attr("onclick")
            .or_else(|| option.value().attr("href"));

        let Some(code) = target.and_then(region_code) else {
            continue;
        };
        if !codes.contains(&code) {
            codes.push(code);
        }
    }

    Ok(codes)
}

fn region_code(target: &str) -> Option<String> {
    REGION_PATH
        .captures(target)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}
