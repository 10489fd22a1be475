use crate::error::{GameError, Result};
use crate::infrastructure::ProductData;
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GAME_TYPE: &str = "game";

/// A list row reduced to what is needed to fetch the game's own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub game_type: String,
    pub id: String,
}

impl GameSummary {
    pub fn new(id: impl Into<String>, game_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            game_type: game_type.into(),
        }
    }

    /// Derives the summary from a row link such as `/game/elden-ring/` or
    /// `https://gg.deals/dlc/some-dlc/`.
    pub fn from_href(href: &str) -> Result<Self> {
        let path = if href.contains("://") {
            Url::parse(href)
                .map_err(|e| GameError::Validation(format!("bad game link {href:?}: {e}")))?
                .path()
                .to_string()
        } else {
            href.split(['?', '#']).next().unwrap_or_default().to_string()
        };

        let mut segments = path.trim_start_matches('/').split('/');
        let game_type = segments.next().filter(|s| !s.is_empty());
        let id = segments.next().filter(|s| !s.is_empty());

        match (game_type, id) {
            (Some(game_type), Some(id)) => Ok(Self::new(id, game_type)),
            _ => Err(GameError::Validation(format!(
                "game link {href:?} has no type or id segment"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreOffer {
    pub seller: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Vendor URL behind the site's redirect link, empty when it could not be resolved.
    pub url: String,
}

impl StoreOffer {
    pub fn is_resolved(&self) -> bool {
        !self.url.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    pub id: String,
    #[serde(rename = "type")]
    pub game_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_lowest_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default)]
    pub stores: Vec<StoreOffer>,
}

impl GameDetail {
    pub fn new(id: impl Into<String>, game_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            game_type: game_type.into(),
            name: None,
            release_date: None,
            developer: None,
            currency: None,
            current_lowest_price: None,
            availability: None,
            stores: Vec::new(),
        }
    }

    pub fn from_summary(summary: &GameSummary) -> Self {
        Self::new(summary.id.clone(), summary.game_type.clone())
    }

    pub fn with_product(mut self, product: &ProductData) -> Self {
        self.name = product.name.clone();
        self.release_date = product.release_date.clone();
        self.developer = product.developer.clone();
        self.currency = product.currency.clone();
        self.current_lowest_price = product.current_lowest_price;
        self.availability = product.availability.clone();
        self
    }

    pub fn with_stores(mut self, stores: Vec<StoreOffer>) -> Self {
        self.stores = stores;
        self
    }
}

/// A slot of a list scrape whose game could not be fetched completely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotFailure {
    pub index: usize,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListResult {
    pub games: Vec<GameDetail>,
    pub amount: usize,
    pub total_amount: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SlotFailure>,
}

impl GameListResult {
    pub fn empty(total_amount: usize) -> Self {
        Self {
            total_amount,
            ..Self::default()
        }
    }

    pub fn new(games: Vec<GameDetail>, total_amount: usize, failures: Vec<SlotFailure>) -> Self {
        Self {
            amount: games.len(),
            games,
            total_amount,
            failures,
        }
    }
}
