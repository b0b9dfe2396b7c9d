//! Data models for feed items, extracted articles and render-ready cards.
//!
//! - [`FeedItem`]: one entry of the queried news feed
//! - [`ExtractedArticle`]: the scraped article behind a feed item
//! - [`ExtractiveSummary`]: sentences selected by the ranking summarizer
//! - [`PaperRecord`]: a best-effort scraped research paper
//! - [`Card`] / [`PassReport`]: what one pass hands to the display layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Topic key that routes a pass to the research paper fetcher.
pub const RESEARCH_PAPERS_TOPIC: &str = "Research Papers";

/// Categories offered by the dashboard's selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Technology,
    Science,
    #[serde(rename = "Artificial Intelligence")]
    ArtificialIntelligence,
    #[serde(rename = "Research Papers")]
    ResearchPapers,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Technology,
        Category::Science,
        Category::ArtificialIntelligence,
        Category::ResearchPapers,
    ];

    /// The label shown in the selector, which is also the feed query topic.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Science => "Science",
            Category::ArtificialIntelligence => "Artificial Intelligence",
            Category::ResearchPapers => RESEARCH_PAPERS_TOPIC,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown category: {}", wanted))
    }
}

/// One entry from the news feed. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub publish_date: String,
    pub source: String,
}

/// The main content scraped from a feed item's link.
#[derive(Debug, Clone)]
pub struct ExtractedArticle {
    pub source_item: FeedItem,
    pub full_text: String,
    pub top_image_url: Option<Url>,
    /// Summary produced by the extractor's own keyword pass.
    pub library_summary: String,
    pub keywords: Vec<String>,
}

/// Sentences picked by the ranking summarizer, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractiveSummary {
    pub sentences: Vec<String>,
    pub joined_text: String,
}

impl ExtractiveSummary {
    pub fn from_sentences(sentences: Vec<String>) -> Self {
        let joined_text = sentences.join(" ");
        Self {
            sentences,
            joined_text,
        }
    }
}

/// A research paper scraped from the listing or the fallback search page.
///
/// Every field but `url` is optional: a missing marker on the page leaves the
/// field absent and the paper is still displayable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub url: String,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub published_date: Option<String>,
}

impl PaperRecord {
    /// arXiv abstract page derived from the last path segment of `url`.
    pub fn arxiv_url(&self) -> String {
        let id = self
            .url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        format!("https://arxiv.org/abs/{}", id)
    }
}

/// Render-ready record for a news article.
#[derive(Debug, Clone, Serialize)]
pub struct NewsCard {
    pub index: usize,
    pub title: String,
    pub link: String,
    pub source: String,
    pub published: String,
    pub image_url: Option<String>,
    pub summary: String,
    /// `None` when the ranking summarizer could not handle the article text.
    pub important_points: Option<String>,
    pub keywords: Vec<String>,
}

/// Render-ready record for a research paper.
#[derive(Debug, Clone, Serialize)]
pub struct PaperCard {
    pub index: usize,
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub abstract_text: String,
    pub authors: String,
    pub published: String,
    pub arxiv_url: String,
}

impl PaperCard {
    pub fn from_record(index: usize, record: PaperRecord) -> Self {
        let arxiv_url = record.arxiv_url();
        Self {
            index,
            title: record.title.unwrap_or_else(|| "Untitled paper".to_string()),
            url: record.url,
            image_url: record.image_url,
            abstract_text: record
                .abstract_text
                .unwrap_or_else(|| "No abstract available.".to_string()),
            authors: record.authors.unwrap_or_else(|| "N/A".to_string()),
            published: record.published_date.unwrap_or_else(|| "N/A".to_string()),
            arxiv_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Card {
    News(NewsCard),
    Paper(PaperCard),
}

impl Card {
    pub fn title(&self) -> &str {
        match self {
            Card::News(c) => &c.title,
            Card::Paper(c) => &c.title,
        }
    }
}

/// The outcome of one fetch → extract → summarize pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub topic: String,
    pub cards: Vec<Card>,
    /// Set when the topic's item count changed since the previous pass.
    pub new_items: bool,
    /// Number of feed items or papers the pass started from.
    pub candidates: usize,
    /// Items skipped because extraction failed.
    pub skipped: usize,
}
