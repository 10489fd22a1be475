//! HTML fixtures and service builders shared by the integration tests.
#![allow(dead_code)]

use gameprices::config::ScraperConfig;
use gameprices::GameService;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn service_for(server: &MockServer) -> GameService {
    service_with(server, |config| config)
}

pub fn service_with(
    server: &MockServer,
    tweak: impl FnOnce(ScraperConfig) -> ScraperConfig,
) -> GameService {
    let config = ScraperConfig {
        request_timeout_secs: 5,
        task_timeout_secs: 10,
        ..ScraperConfig::default()
    }
    .with_base_url(server.uri());
    GameService::new(tweak(config)).expect("failed to build test GameService")
}

/// A search result page. `None` stands for a row without a link.
pub fn listing_html(total: usize, hrefs: &[Option<&str>]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|href| match href {
            Some(href) => format!(
                r#"<div class="game-list-item"><a class="full-link" href="{href}">x</a></div>"#
            ),
            None => r#"<div class="game-list-item"><span>no link</span></div>"#.to_string(),
        })
        .collect();
    format!(
        r#"<html><body>
        <span class="search-results-counter"><span class="value">{total} results</span></span>
        <div class="list-items">{rows}</div>
        </body></html>"#
    )
}

pub fn game_links(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| format!("/game/{id}/")).collect()
}

pub fn listing_for(total: usize, links: &[String]) -> String {
    let hrefs: Vec<Option<&str>> = links.iter().map(|l| Some(l.as_str())).collect();
    listing_html(total, &hrefs)
}

/// A game page whose structured data lists `offers` as `(seller, price, link)`.
pub fn game_html(name: &str, offers: &[(&str, f64, &str)]) -> String {
    let offers: Vec<serde_json::Value> = offers
        .iter()
        .map(|(seller, price, url)| {
            serde_json::json!({
                "@type": "Offer",
                "price": price,
                "seller": {"@type": "Organization", "name": seller},
                "url": url,
            })
        })
        .collect();
    let lowest = offers
        .iter()
        .filter_map(|o| o["price"].as_f64())
        .fold(None, |low: Option<f64>, p| Some(low.map_or(p, |l| l.min(p))));

    let block = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": name,
        "productionDate": "2020-01-01",
        "brand": {"@type": "Brand", "name": "Studio"},
        "offers": {
            "@type": "AggregateOffer",
            "priceCurrency": "USD",
            "price": lowest,
            "availability": "https://schema.org/InStock",
            "offers": offers,
        }
    });
    format!(
        r#"<html><head><script type="application/ld+json">{block}</script></head>
        <body><h1>{name}</h1></body></html>"#
    )
}

pub fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

pub async fn mount_region_switch(server: &MockServer, region: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{region}/region/switch/")))
        .respond_with(html("<html></html>".to_string()))
        .expect(1)
        .mount(server)
        .await;
}
