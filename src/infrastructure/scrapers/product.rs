//! The structured-data block embedded in a game page.
//!
//! The block is third-party JSON of no guaranteed shape, so every field is
//! read on its own and anything of an unexpected type reads as absent.

use super::selector;
use crate::error::Result;
use scraper::Html;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductData {
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub developer: Option<String>,
    pub currency: Option<String>,
    pub current_lowest_price: Option<f64>,
    pub availability: Option<String>,
    pub offers: Vec<RawOffer>,
}

/// A store offer as listed on the page, before its redirect link is resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOffer {
    pub seller: String,
    pub price: Option<f64>,
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductLd {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, rename = "productionDate", deserialize_with = "lenient")]
    production_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    brand: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    offers: Option<AggregateOfferLd>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregateOfferLd {
    #[serde(default, deserialize_with = "lenient")]
    price_currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_price")]
    low_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    availability: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    offers: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct OfferLd {
    #[serde(default, deserialize_with = "lenient_price")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    seller: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    url: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `{"name": "..."}` or a bare string.
fn name_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

impl From<ProductLd> for ProductData {
    fn from(ld: ProductLd) -> Self {
        let offers = ld.offers.unwrap_or_default();

        let raw_offers = offers
            .offers
            .unwrap_or_default()
            .into_iter()
            .filter(Value::is_object)
            .map(|offer| {
                let offer: OfferLd = serde_json::from_value(offer).unwrap_or_default();
                RawOffer {
                    seller: offer.seller.as_ref().and_then(name_of).unwrap_or_default(),
                    price: offer.price,
                    url: offer.url,
                }
            })
            .collect();

        Self {
            name: ld.name,
            release_date: ld.production_date,
            developer: ld.brand.as_ref().and_then(name_of),
            currency: offers.price_currency,
            current_lowest_price: offers.price.or(offers.low_price),
            availability: offers.availability,
            offers: raw_offers,
        }
    }
}

/// Reads the `application/ld+json` object typed `Product`, falling back to the
/// first JSON object found when none is. Pages without one yield `None`.
pub fn extract_product(document: &Html) -> Result<Option<ProductData>> {
    let scripts = selector(r#"script[type="application/ld+json"]"#)?;
    let mut fallback = None;

    for script in document.select(&scripts) {
        let text = script.text().collect::<String>();
        let value: Value = match serde_json::from_str(text.trim()) {
            Ok(value) => value,
            Err(e) => {
                warn!("Skipping unreadable ld+json block: {}", e);
                continue;
            }
        };

        let objects = match value {
            Value::Object(_) => vec![value],
            Value::Array(items) => items.into_iter().filter(Value::is_object).collect(),
            _ => continue,
        };

        for object in objects {
            if is_product(&object) {
                return Ok(Some(read_ld(object)));
            }
            fallback.get_or_insert(object);
        }
    }

    Ok(fallback.map(read_ld))
}

fn is_product(object: &Value) -> bool {
    match object.get("@type") {
        Some(Value::String(kind)) => kind == "Product",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind == "Product"),
        _ => false,
    }
}

fn read_ld(object: Value) -> ProductData {
    let ld: ProductLd = serde_json::from_value(object).unwrap_or_default();
    ld.into()
}
