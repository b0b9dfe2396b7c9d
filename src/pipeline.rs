//! One fetch → extract → summarize pass for a topic.
//!
//! News topics walk the feed in order and extract one article at a time until
//! `quantity` articles succeeded, so a failing article costs a slot in the
//! feed but never a card. The research papers topic skips the feed entirely.

use crate::cache::TopicCache;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    Card, ExtractedArticle, FeedItem, NewsCard, PaperCard, PassReport, RESEARCH_PAPERS_TOPIC,
};
use crate::scrapers::article::{ArticleExtractor, NewsArticleExtractor};
use crate::scrapers::build_client;
use crate::scrapers::google_news::{FeedSource, GoogleNewsFeed};
use crate::scrapers::papers::{HuggingFacePapers, PaperSource};
use crate::summarize::{LexRankSummarizer, Summarizer};
use tracing::{debug, error, info, instrument, warn};

pub struct Pipeline<F, E, S, P> {
    pub feed: F,
    pub extractor: E,
    pub summarizer: S,
    pub papers: P,
    /// Sentences in each card's "important points".
    pub summary_sentences: usize,
}

/// The pipeline wired to the live sources.
pub type NewsPipeline =
    Pipeline<GoogleNewsFeed, NewsArticleExtractor, LexRankSummarizer, HuggingFacePapers>;

pub fn build_pipeline(config: &Config) -> Result<NewsPipeline> {
    let client = build_client(config)?;
    Ok(Pipeline {
        feed: GoogleNewsFeed::new(client.clone(), config.feed_url_template.as_str()),
        extractor: NewsArticleExtractor::new(client.clone(), config.article_summary_sentences),
        summarizer: LexRankSummarizer::default(),
        papers: HuggingFacePapers::new(
            client,
            config.papers_listing_url.as_str(),
            &config.papers_base_url,
            config.papers_fallback_url.as_str(),
        )?,
        summary_sentences: config.summary_sentences,
    })
}

impl<F, E, S, P> Pipeline<F, E, S, P>
where
    F: FeedSource,
    E: ArticleExtractor,
    S: Summarizer + Clone + Send + 'static,
    P: PaperSource,
{
    /// Run one pass for `topic`, producing at most `quantity` cards.
    ///
    /// `quantity` is clamped to the dashboard's slider range. Only a failure
    /// to fetch the topic's feed is an error; per-article failures skip the
    /// article. An empty feed leaves the topic's cache entry untouched and is
    /// never reported as new.
    #[instrument(level = "info", skip(self, cache))]
    pub async fn run_pass(
        &self,
        topic: &str,
        quantity: usize,
        cache: &mut TopicCache,
    ) -> Result<PassReport> {
        let quantity = Config::clamp_quantity(quantity);
        if topic == RESEARCH_PAPERS_TOPIC {
            return Ok(self.papers_pass(topic, quantity).await);
        }

        let items = match self.feed.fetch_category_news(topic).await {
            Ok(items) => items,
            Err(e) => {
                error!(topic, error = %e, "Failed to fetch category news");
                return Err(e);
            }
        };
        let new_items = !items.is_empty() && cache.compare_and_update(topic, &items);
        if new_items {
            info!(topic, count = items.len(), "Feed item count changed");
        }

        let mut cards = Vec::with_capacity(quantity.min(items.len()));
        let mut skipped = 0;
        for item in &items {
            if cards.len() == quantity {
                break;
            }
            match self.news_card(cards.len() + 1, item).await {
                Some(card) => {
                    let card = Card::News(card);
                    debug!(index = cards.len() + 1, title = card.title(), "Built card");
                    cards.push(card);
                }
                None => skipped += 1,
            }
        }

        info!(topic, cards = cards.len(), skipped, "Pass complete");
        Ok(PassReport {
            topic: topic.to_string(),
            cards,
            new_items,
            candidates: items.len(),
            skipped,
        })
    }

    async fn news_card(&self, index: usize, item: &FeedItem) -> Option<NewsCard> {
        let article = match self.extractor.extract(item).await {
            Ok(article) => article,
            Err(e) => {
                warn!(link = %item.link, error = %e, "Failed to extract article; skipping");
                return None;
            }
        };

        let ExtractedArticle {
            source_item,
            full_text,
            top_image_url,
            library_summary,
            keywords,
        } = article;

        // Ranking is CPU-bound and quadratic in the sentence count.
        let summarizer = self.summarizer.clone();
        let sentence_count = self.summary_sentences;
        let ranked =
            tokio::task::spawn_blocking(move || summarizer.summarize(&full_text, sentence_count))
                .await;
        let important_points = match ranked {
            Ok(Ok(summary)) => Some(summary.joined_text),
            Ok(Err(e)) => {
                warn!(link = %source_item.link, error = %e, "Could not summarize article");
                None
            }
            Err(e) => {
                error!(link = %source_item.link, error = %e, "Summarizer task failed");
                None
            }
        };

        Some(NewsCard {
            index,
            title: source_item.title,
            link: source_item.link,
            source: source_item.source,
            published: source_item.publish_date,
            image_url: top_image_url.map(String::from),
            summary: library_summary,
            important_points,
            keywords,
        })
    }

    async fn papers_pass(&self, topic: &str, quantity: usize) -> PassReport {
        let papers = self.papers.fetch_research_papers().await;
        let candidates = papers.len();
        let cards: Vec<Card> = papers
            .into_iter()
            .take(quantity)
            .enumerate()
            .map(|(i, record)| Card::Paper(PaperCard::from_record(i + 1, record)))
            .collect();
        info!(topic, cards = cards.len(), candidates, "Papers pass complete");
        PassReport {
            topic: topic.to_string(),
            cards,
            new_items: false,
            candidates,
            skipped: 0,
        }
    }
}
