//! Research papers from the Hugging Face daily papers listing.
//!
//! The listing page links one detail page per paper; the detail page carries
//! title, cover image, abstract, authors and date. When the listing is
//! unreachable or has no paper cards, a Google News search for AI research
//! papers stands in. Fetching papers never fails: the worst case is an empty
//! list.

use super::{element_text, fetch_page, first_text, selector};
use crate::error::{NewsError, Result};
use crate::models::PaperRecord;
use futures::StreamExt;
use futures::future::ready;
use futures::stream;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static LISTING_ARTICLE: Lazy<Selector> = Lazy::new(|| selector("article"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

static DETAIL_TITLE: Lazy<Selector> = Lazy::new(|| selector("h1.mb-2.text-2xl.font-semibold"));
static DETAIL_IMAGE: Lazy<Selector> =
    Lazy::new(|| selector("img.h-full.w-full.object-cover.object-top"));
static DETAIL_ABSTRACT: Lazy<Selector> = Lazy::new(|| selector("div.pb-8.pr-4 p"));
static DETAIL_AUTHORS: Lazy<Selector> = Lazy::new(|| selector("div.order-first.ml-3"));
static DETAIL_DATE: Lazy<Selector> = Lazy::new(|| selector("time[datetime]"));

static FALLBACK_ENTRY: Lazy<Selector> = Lazy::new(|| selector("div.BVG0Nb"));
static FALLBACK_LINK: Lazy<Selector> = Lazy::new(|| selector("a"));
static FALLBACK_ABSTRACT: Lazy<Selector> = Lazy::new(|| selector("div.Y3v8qd"));
static FALLBACK_DATE: Lazy<Selector> = Lazy::new(|| selector("span.WG9SHc time[datetime]"));

/// Source of research papers. Implementations swallow their own failures.
pub trait PaperSource {
    async fn fetch_research_papers(&self) -> Vec<PaperRecord>;
}

#[derive(Debug, Clone)]
pub struct HuggingFacePapers {
    client: Client,
    listing_url: String,
    base_url: Url,
    fallback_url: String,
}

impl HuggingFacePapers {
    pub fn new(
        client: Client,
        listing_url: impl Into<String>,
        base_url: &str,
        fallback_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            listing_url: listing_url.into(),
            base_url: Url::parse(base_url)?,
            fallback_url: fallback_url.into(),
        })
    }

    async fn fetch_listing(&self) -> Result<Vec<PaperRecord>> {
        let page = fetch_page(&self.client, &self.listing_url).await?;
        let links = parse_listing(&page.body, &self.base_url)?;
        info!(count = links.len(), "Found papers on listing");

        let papers = stream::iter(links)
            .then(|url| async move {
                match self.fetch_detail(&url).await {
                    Ok(paper) => Some(paper),
                    Err(e) => {
                        warn!(%url, error = %e, "Failed to fetch paper; skipping");
                        None
                    }
                }
            })
            .filter_map(ready)
            .collect::<Vec<_>>()
            .await;
        Ok(papers)
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch_detail(&self, url: &Url) -> Result<PaperRecord> {
        let page = fetch_page(&self.client, url.as_str()).await?;
        Ok(parse_paper_detail(&page.body, url))
    }

    async fn fetch_fallback(&self) -> Result<Vec<PaperRecord>> {
        let page = fetch_page(&self.client, &self.fallback_url).await?;
        Ok(parse_fallback(&page.body, &page.url))
    }
}

impl PaperSource for HuggingFacePapers {
    #[instrument(level = "info", skip(self))]
    async fn fetch_research_papers(&self) -> Vec<PaperRecord> {
        match self.fetch_listing().await {
            Ok(papers) => return papers,
            Err(e) => warn!(error = %e, "Paper listing unavailable; using fallback search"),
        }

        match self.fetch_fallback().await {
            Ok(papers) => {
                info!(count = papers.len(), "Fetched papers from fallback search");
                papers
            }
            Err(e) => {
                warn!(error = %e, "Fallback paper search failed");
                Vec::new()
            }
        }
    }
}

/// Detail page URLs from the listing, one per `<article>` card with a link.
///
/// A listing without any paper cards is a parse error so the caller can fall
/// back.
pub fn parse_listing(html: &str, base_url: &Url) -> Result<Vec<Url>> {
    let document = Html::parse_document(html);
    let articles: Vec<_> = document.select(&LISTING_ARTICLE).collect();
    if articles.is_empty() {
        return Err(NewsError::Parse("paper listing has no paper cards".to_string()));
    }

    let links = articles
        .into_iter()
        .filter_map(|article| article.select(&ANCHOR).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| match base_url.join(href.trim()) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!(href, error = %e, "Unresolvable paper link");
                None
            }
        })
        .collect();
    Ok(links)
}

/// Best-effort paper fields from a detail page.
pub fn parse_paper_detail(html: &str, url: &Url) -> PaperRecord {
    let document = Html::parse_document(html);
    let field = |name: &'static str, value: Option<String>| {
        if value.is_none() {
            let missing = NewsError::MissingField {
                field: name,
                url: url.to_string(),
            };
            debug!(error = %missing, "Paper field not found");
        }
        value
    };

    let image_url = document
        .select(&DETAIL_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| url.join(src).ok())
        .map(String::from);
    let published_date = document
        .select(&DETAIL_DATE)
        .next()
        .and_then(|time| time.value().attr("datetime"))
        .map(str::to_string);

    PaperRecord {
        url: url.to_string(),
        title: field("title", first_text(&document, &DETAIL_TITLE)),
        image_url: field("image", image_url),
        abstract_text: field("abstract", first_text(&document, &DETAIL_ABSTRACT)),
        authors: field("authors", first_text(&document, &DETAIL_AUTHORS)),
        published_date: field("published date", published_date),
    }
}

/// Papers from the fallback search results page. Entries without a link are skipped.
pub fn parse_fallback(html: &str, page_url: &Url) -> Vec<PaperRecord> {
    let document = Html::parse_document(html);
    document
        .select(&FALLBACK_ENTRY)
        .filter_map(|entry| {
            let anchor = entry.select(&FALLBACK_LINK).next()?;
            let url = anchor
                .value()
                .attr("href")
                .and_then(|href| page_url.join(href).ok())?;
            let title = Some(element_text(anchor)).filter(|t| !t.is_empty());
            let abstract_text = entry
                .select(&FALLBACK_ABSTRACT)
                .next()
                .map(element_text)
                .filter(|t| !t.is_empty());
            let published_date = entry
                .select(&FALLBACK_DATE)
                .next()
                .and_then(|time| time.value().attr("datetime"))
                .map(str::to_string);

            Some(PaperRecord {
                url: url.to_string(),
                title,
                abstract_text,
                published_date,
                ..Default::default()
            })
        })
        .collect()
}
