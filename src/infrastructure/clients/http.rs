use crate::config::ScraperConfig;
use crate::error::{GameError, Result};
use reqwest::cookie::Jar;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode, Url};
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info};

/// A fetched page. The body is kept as text and parsed on demand so that no
/// DOM lives across an await point.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub body: String,
}

impl Page {
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Outcome of a single, unfollowed request.
#[derive(Debug, Clone)]
pub struct RedirectTarget {
    pub url: Url,
    pub status: StatusCode,
    pub location: Option<String>,
}

/// HTTP access for one scrape session. Both clients share a cookie jar so the
/// region picked on the site sticks to every request of the session.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    no_redirect: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        let no_redirect = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .cookie_provider(jar)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            no_redirect,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<Page> {
        info!("Visiting {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(GameError::Fetch {
                status: Some(status.as_u16()),
                url: url.to_string(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await?;

        Ok(Page { url: final_url, body })
    }

    pub async fn fetch_no_redirect(&self, url: &str) -> Result<RedirectTarget> {
        debug!("Resolving {}", url);
        let response = self.no_redirect.get(url).send().await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Ok(RedirectTarget {
            url: response.url().clone(),
            status: response.status(),
            location,
        })
    }
}
