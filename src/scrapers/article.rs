//! Main-content extraction for arbitrary article pages.
//!
//! The page text is the run of paragraphs inside the `<article>` element when
//! one carries enough text, otherwise the paragraphs of whichever element
//! holds the most paragraph text. The top image comes from the page's
//! social-card metadata, falling back to the first image in the content.
//! A keyword pass over the text then produces the article's own summary.

use super::{element_text, fetch_page, first_text, selector};
use crate::error::{NewsError, Result};
use crate::models::{ExtractedArticle, FeedItem};
use crate::summarize::keywords::{article_summary, keywords};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use url::Url;

/// Paragraphs shorter than this are navigation, captions or bylines.
const MIN_PARAGRAPH_CHARS: usize = 25;
/// An `<article>` element with less text than this is treated as a teaser.
const MIN_ARTICLE_CHARS: usize = 200;
const KEYWORD_COUNT: usize = 10;

static ARTICLE: Lazy<Selector> = Lazy::new(|| selector("article"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));
static IMAGE: Lazy<Selector> = Lazy::new(|| selector("img[src]"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static HEADING: Lazy<Selector> = Lazy::new(|| selector("h1"));
static OG_TITLE: Lazy<Selector> = Lazy::new(|| selector("meta[property='og:title']"));
static IMAGE_META: Lazy<[(Selector, &'static str); 4]> = Lazy::new(|| {
    [
        (selector("meta[property='og:image']"), "content"),
        (selector("meta[name='twitter:image']"), "content"),
        (selector("meta[property='twitter:image']"), "content"),
        (selector("link[rel='image_src']"), "href"),
    ]
});

/// Turns a feed item's link into an [`ExtractedArticle`].
pub trait ArticleExtractor {
    async fn extract(&self, item: &FeedItem) -> Result<ExtractedArticle>;
}

/// The parts of an article page the extractor cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArticle {
    pub title: Option<String>,
    pub text: String,
    pub top_image: Option<Url>,
}

#[derive(Debug, Clone)]
pub struct NewsArticleExtractor {
    client: Client,
    summary_sentences: usize,
}

impl NewsArticleExtractor {
    pub fn new(client: Client, summary_sentences: usize) -> Self {
        Self {
            client,
            summary_sentences,
        }
    }
}

impl ArticleExtractor for NewsArticleExtractor {
    #[instrument(level = "info", skip_all, fields(link = %item.link))]
    async fn extract(&self, item: &FeedItem) -> Result<ExtractedArticle> {
        let page = fetch_page(&self.client, &item.link).await?;
        let parsed = parse_article(&page.body, &page.url)?;

        let title = parsed.title.as_deref().unwrap_or(&item.title);
        let library_summary = article_summary(title, &parsed.text, self.summary_sentences);
        let keywords = keywords(&parsed.text, KEYWORD_COUNT);
        info!(
            bytes = parsed.text.len(),
            has_image = parsed.top_image.is_some(),
            "Extracted article"
        );
        debug!(preview = %truncate_for_log(&parsed.text, 200), ?keywords, "Article text");

        Ok(ExtractedArticle {
            source_item: item.clone(),
            full_text: parsed.text,
            top_image_url: parsed.top_image,
            library_summary,
            keywords,
        })
    }
}

/// Extract title, main text and top image from an article page.
pub fn parse_article(html: &str, page_url: &Url) -> Result<ParsedArticle> {
    let document = Html::parse_document(html);

    let content = main_content(&document);
    let text = content.map(paragraphs).unwrap_or_default().join("\n\n");
    if text.is_empty() {
        return Err(NewsError::Extraction {
            url: page_url.to_string(),
            reason: "no main content found".to_string(),
        });
    }

    let title = document
        .select(&OG_TITLE)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| first_text(&document, &TITLE))
        .or_else(|| first_text(&document, &HEADING));

    Ok(ParsedArticle {
        title,
        text,
        top_image: top_image(&document, content, page_url),
    })
}

fn main_content(document: &Html) -> Option<ElementRef<'_>> {
    let article = document
        .select(&ARTICLE)
        .max_by_key(|article| paragraph_chars(*article))
        .filter(|article| paragraph_chars(*article) >= MIN_ARTICLE_CHARS);
    if article.is_some() {
        return article;
    }

    // Containers in order of first appearance; ties go to the earliest.
    let mut position = HashMap::new();
    let mut scores = Vec::new();
    for paragraph in document.select(&PARAGRAPH) {
        let len = element_text(paragraph).chars().count();
        if len < MIN_PARAGRAPH_CHARS {
            continue;
        }
        if let Some(parent) = paragraph.parent().and_then(ElementRef::wrap) {
            let slot = *position.entry(parent.id()).or_insert_with(|| {
                scores.push((parent.id(), 0usize));
                scores.len() - 1
            });
            scores[slot].1 += len;
        }
    }

    scores
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .and_then(|(id, _)| document.tree.get(id))
        .and_then(ElementRef::wrap)
}

fn paragraphs(container: ElementRef<'_>) -> Vec<String> {
    container
        .select(&PARAGRAPH)
        .map(element_text)
        .filter(|text| text.chars().count() >= MIN_PARAGRAPH_CHARS)
        .collect()
}

fn paragraph_chars(container: ElementRef<'_>) -> usize {
    paragraphs(container).iter().map(|p| p.chars().count()).sum()
}

fn top_image(document: &Html, content: Option<ElementRef<'_>>, page_url: &Url) -> Option<Url> {
    let from_meta = IMAGE_META.iter().find_map(|(sel, attr)| {
        document
            .select(sel)
            .filter_map(|el| el.value().attr(attr))
            .find_map(|src| resolve_image(page_url, src))
    });
    if from_meta.is_some() {
        return from_meta;
    }

    let first_image = |root: ElementRef<'_>| {
        root.select(&IMAGE)
            .filter_map(|img| img.value().attr("src"))
            .find_map(|src| resolve_image(page_url, src))
    };
    content
        .and_then(first_image)
        .or_else(|| first_image(document.root_element()))
}

fn resolve_image(page_url: &Url, src: &str) -> Option<Url> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }
    page_url
        .join(src)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://news.example.com/2026/10/19/story.html").unwrap()
    }

    const ARTICLE_PAGE: &str = r#"<html>
<head>
  <title>Fallback title</title>
  <meta property="og:title" content="Rust ships a new release">
  <meta property="og:image" content="/images/lead.jpg">
</head>
<body>
  <nav><p>Home | World | Technology | Science</p></nav>
  <article>
    <h1>Rust ships a new release</h1>
    <p>The Rust team announced a new stable release on Thursday, with faster builds.</p>
    <p>Short caption</p>
    <p>Developers said the improvements to compile times were the most welcome change.</p>
    <p>The release also stabilizes several long-awaited language features for async code.</p>
  </article>
  <footer><p>Copyright 2026 Example News. All rights reserved worldwide.</p></footer>
</body>
</html>"#;

    #[test]
    fn test_parse_article_prefers_article_paragraphs() {
        let parsed = parse_article(ARTICLE_PAGE, &page_url()).unwrap();
        let paragraphs: Vec<&str> = parsed.text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[0].starts_with("The Rust team announced"));
        assert!(!parsed.text.contains("Short caption"));
        assert!(!parsed.text.contains("Copyright"));
        assert_eq!(parsed.title.as_deref(), Some("Rust ships a new release"));
    }

    #[test]
    fn test_og_image_is_resolved_against_page() {
        let parsed = parse_article(ARTICLE_PAGE, &page_url()).unwrap();
        assert_eq!(
            parsed.top_image.unwrap().as_str(),
            "https://news.example.com/images/lead.jpg"
        );
    }

    #[test]
    fn test_densest_container_without_article_element() {
        let html = r#"<html><body>
            <div class="sidebar"><p>Subscribe to our newsletter for more daily updates.</p></div>
            <div class="story">
              <p>Scientists have mapped the genome of a deep sea octopus for the first time.</p>
              <p>The study found genes linked to its unusual ability to survive the cold.</p>
              <img src="https://cdn.example.com/octopus.png">
            </div>
        </body></html>"#;
        let parsed = parse_article(html, &page_url()).unwrap();
        assert!(parsed.text.starts_with("Scientists have mapped"));
        assert!(!parsed.text.contains("newsletter"));
        assert_eq!(
            parsed.top_image.unwrap().as_str(),
            "https://cdn.example.com/octopus.png"
        );
        assert!(parsed.title.is_none());
    }

    #[test]
    fn test_equal_containers_pick_the_first_in_document_order() {
        let html = r#"<html><body>
            <div class="first"><p>First container paragraph text with equal length.</p></div>
            <div class="other"><p>Other container paragraph text with equal length.</p></div>
        </body></html>"#;
        for _ in 0..8 {
            let parsed = parse_article(html, &page_url()).unwrap();
            assert_eq!(
                parsed.text,
                "First container paragraph text with equal length."
            );
        }
    }

    #[test]
    fn test_page_without_content_is_extraction_error() {
        let html = "<html><body><div>Nothing to read</div><img src=\"data:image/png;base64,AAAA\"></body></html>";
        let result = parse_article(html, &page_url());
        assert!(matches!(result, Err(NewsError::Extraction { .. })));
    }

    #[test]
    fn test_data_uri_images_are_ignored() {
        assert!(resolve_image(&page_url(), "data:image/gif;base64,R0lGOD").is_none());
        assert!(resolve_image(&page_url(), "  ").is_none());
        assert_eq!(
            resolve_image(&page_url(), "thumb.jpg").unwrap().as_str(),
            "https://news.example.com/2026/10/19/thumb.jpg"
        );
    }
}
