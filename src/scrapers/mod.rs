//! Fetchers for the news feed, article pages and research papers.
//!
//! | Module | Source | Method |
//! |--------|--------|--------|
//! | [`google_news`] | Google News RSS search | XML feed, one query per topic |
//! | [`article`] | Any article page linked from the feed | HTML main-content extraction |
//! | [`papers`] | Hugging Face daily papers, Google News search fallback | HTML scraping |
//!
//! Every fetcher shares one [`reqwest::Client`] built by [`build_client`], so
//! the timeout and user agent from the configuration apply everywhere. HTML is
//! parsed by synchronous functions that never hold a parsed document across an
//! await point.

pub mod article;
pub mod google_news;
pub mod papers;

use crate::config::Config;
use crate::error::{NewsError, Result};
use itertools::Itertools;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// A downloaded page and the URL it was finally served from.
#[derive(Debug)]
pub struct FetchedPage {
    pub url: Url,
    pub body: String,
}

pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| NewsError::Config(format!("failed to build HTTP client: {}", e)))
}

/// GET `url`, treating transport errors and non-success statuses as network failures.
#[instrument(level = "debug", skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| NewsError::network(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(NewsError::network(url, format!("HTTP {}", status)));
    }

    let final_url = response.url().clone();
    let body = response
        .text()
        .await
        .map_err(|e| NewsError::network(url, e))?;
    debug!(%final_url, bytes = body.len(), "Fetched page");
    Ok(FetchedPage {
        url: final_url,
        body,
    })
}

/// Parse a selector known at compile time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

/// Text of an element with runs of whitespace collapsed to single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).join(" ")
}

/// Collapsed text of the first element matching `selector`, if non-empty.
pub(crate) fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}
