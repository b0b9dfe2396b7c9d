//! Google News RSS search feed.
//!
//! One query per topic, restricted to the last day:
//!
//! ```text
//! https://news.google.com/rss/search?q=Artificial+Intelligence+when:1d&hl=en-US&gl=US&ceid=US:en
//! ```
//!
//! Every `<item>` must carry `title`, `link`, `pubDate` and `source`; items
//! missing any of them are dropped without affecting their siblings.

use super::{FetchedPage, fetch_page};
use crate::error::{NewsError, Result};
use crate::models::FeedItem;
use itertools::Itertools;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Source of feed items for a topic.
pub trait FeedSource {
    async fn fetch_category_news(&self, topic: &str) -> Result<Vec<FeedItem>>;
}

#[derive(Debug, Clone)]
pub struct GoogleNewsFeed {
    client: Client,
    url_template: String,
}

impl GoogleNewsFeed {
    pub fn new(client: Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }

    pub fn feed_url(&self, topic: &str) -> String {
        self.url_template.replace("{topic}", &encode_topic(topic))
    }
}

impl FeedSource for GoogleNewsFeed {
    #[instrument(level = "info", skip(self))]
    async fn fetch_category_news(&self, topic: &str) -> Result<Vec<FeedItem>> {
        let url = self.feed_url(topic);
        let FetchedPage { body, .. } = fetch_page(&self.client, &url).await?;
        let items = parse_feed(&body)?;
        info!(topic, count = items.len(), "Fetched category news");
        Ok(items)
    }
}

/// Percent-encode each word of the topic and join the words with `+`.
pub fn encode_topic(topic: &str) -> String {
    topic
        .split_whitespace()
        .map(|word| urlencoding::encode(word))
        .join("+")
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(rename = "$text")]
    name: Option<String>,
}

impl RawItem {
    fn into_feed_item(self) -> std::result::Result<FeedItem, &'static str> {
        fn required(value: Option<String>, field: &'static str) -> std::result::Result<String, &'static str> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(field)
        }

        Ok(FeedItem {
            title: required(self.title, "title")?,
            link: required(self.link, "link")?,
            publish_date: required(self.pub_date, "pubDate")?,
            source: required(self.source.and_then(|s| s.name), "source")?,
        })
    }
}

/// Parse an RSS document into feed items, dropping incomplete items.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedItem>> {
    let rss: Rss = quick_xml::de::from_str(xml)
        .map_err(|e| NewsError::Parse(format!("malformed feed: {}", e)))?;

    let total = rss.channel.items.len();
    let items: Vec<FeedItem> = rss
        .channel
        .items
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match raw.into_feed_item() {
            Ok(item) => Some(item),
            Err(field) => {
                warn!(index, field, "Feed item missing required field; skipping");
                None
            }
        })
        .collect();

    debug!(total, kept = items.len(), "Parsed feed items");
    Ok(items)
}
