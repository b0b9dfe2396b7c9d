//! The dashboard page.
//!
//! A single self-contained HTML document: a form with the category selector
//! and quantity slider, status banners, then one card per article or paper.
//! The page reloads itself through `<meta http-equiv="refresh">`, carrying
//! `refresh=1` so the reloaded page can say the news was updated.

use crate::config::{MAX_QUANTITY, MIN_QUANTITY};
use crate::models::{Card, Category, NewsCard, PaperCard, PassReport, RESEARCH_PAPERS_TOPIC};
use crate::utils::escape_html;
use std::fmt;

pub const PLACEHOLDER_IMAGE_PATH: &str = "/static/no_image.svg";

pub const PLACEHOLDER_IMAGE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="320" height="180" viewBox="0 0 320 180"><rect width="320" height="180" fill="#e5e7eb"/><text x="160" y="95" font-family="sans-serif" font-size="16" fill="#6b7280" text-anchor="middle">No image available</text></svg>"##;

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:0 auto;padding:1rem;background:#f9fafb;color:#111827}\
form{display:flex;gap:1rem;align-items:center;flex-wrap:wrap;margin-bottom:1rem}\
.banner{padding:.75rem 1rem;border-radius:6px;margin:.5rem 0}\
.info{background:#dbeafe}.success{background:#dcfce7}.error{background:#fee2e2}\
.card{background:#fff;border:1px solid #e5e7eb;border-radius:8px;padding:1rem;margin:1rem 0;display:flex;gap:1rem}\
.card img{width:240px;height:135px;object-fit:cover;border-radius:4px;flex-shrink:0}\
.meta{color:#6b7280;font-size:.9rem}";

/// What the page shows below the controls.
#[derive(Debug)]
pub enum PageBody<'a> {
    Report(&'a PassReport),
    CategoryError { topic: &'a str },
    Unexpected,
}

#[derive(Debug)]
pub struct DashboardPage<'a> {
    pub category: Category,
    pub quantity: usize,
    pub refresh_interval_secs: u64,
    /// Set when this render came from the page's own refresh timer.
    pub refreshed: bool,
    pub body: PageBody<'a>,
}

impl DashboardPage<'_> {
    fn refresh_url(&self) -> String {
        format!(
            "/?category={}&quantity={}&refresh=1",
            urlencoding::encode(self.category.label()),
            self.quantity
        )
    }
}

impl fmt::Display for DashboardPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(
            f,
            "<meta http-equiv=\"refresh\" content=\"{}; url={}\">",
            self.refresh_interval_secs,
            escape_html(&self.refresh_url())
        )?;
        writeln!(f, "<title>News Summarizer</title>\n<style>{}</style>", STYLE)?;
        writeln!(f, "</head>\n<body>\n<h1>News Summarizer</h1>")?;

        write_controls(f, self.category, self.quantity)?;

        if self.refreshed {
            banner(f, "success", "News has been updated!")?;
        }

        match &self.body {
            PageBody::Report(report) => write_report(f, report)?,
            PageBody::CategoryError { topic } => {
                banner(f, "error", &format!("Failed to fetch news for {}.", topic))?
            }
            PageBody::Unexpected => banner(f, "error", "An unexpected error occurred.")?,
        }

        writeln!(f, "</body>\n</html>")
    }
}

/// Minimal page for failures that happen outside a pass.
pub fn unexpected_error_page() -> String {
    DashboardPage {
        category: Category::default(),
        quantity: MIN_QUANTITY,
        refresh_interval_secs: 60,
        refreshed: false,
        body: PageBody::Unexpected,
    }
    .to_string()
}

fn banner(f: &mut fmt::Formatter<'_>, kind: &str, message: &str) -> fmt::Result {
    writeln!(
        f,
        "<div class=\"banner {}\">{}</div>",
        kind,
        escape_html(message)
    )
}

fn write_controls(f: &mut fmt::Formatter<'_>, selected: Category, quantity: usize) -> fmt::Result {
    writeln!(f, "<form method=\"get\" action=\"/\">")?;
    writeln!(f, "<label>Category <select name=\"category\" onchange=\"this.form.submit()\">")?;
    for category in Category::ALL {
        writeln!(
            f,
            "<option value=\"{label}\"{selected}>{label}</option>",
            label = escape_html(category.label()),
            selected = if category == selected { " selected" } else { "" }
        )?;
    }
    writeln!(f, "</select></label>")?;
    writeln!(
        f,
        "<label>Articles <input type=\"range\" name=\"quantity\" min=\"{MIN_QUANTITY}\" max=\"{MAX_QUANTITY}\" value=\"{quantity}\" \
         oninput=\"this.nextElementSibling.textContent=this.value\" onchange=\"this.form.submit()\"><span>{quantity}</span></label>"
    )?;
    writeln!(f, "<noscript><button type=\"submit\">Show</button></noscript>\n</form>")
}

fn write_report(f: &mut fmt::Formatter<'_>, report: &PassReport) -> fmt::Result {
    if report.new_items {
        banner(f, "info", "New news updates are available!")?;
    }

    if report.cards.is_empty() {
        let message = if report.topic == RESEARCH_PAPERS_TOPIC {
            "No research papers found.".to_string()
        } else {
            format!("No news found for {}", report.topic)
        };
        return banner(f, "info", &message);
    }

    for card in &report.cards {
        match card {
            Card::News(card) => write_news_card(f, card)?,
            Card::Paper(card) => write_paper_card(f, card)?,
        }
    }
    Ok(())
}

fn write_image(f: &mut fmt::Formatter<'_>, src: Option<&str>, alt: &str) -> fmt::Result {
    writeln!(
        f,
        "<img src=\"{}\" alt=\"{}\" onerror=\"this.onerror=null;this.src='{}'\">",
        escape_html(src.unwrap_or(PLACEHOLDER_IMAGE_PATH)),
        escape_html(alt),
        PLACEHOLDER_IMAGE_PATH
    )
}

fn write_news_card(f: &mut fmt::Formatter<'_>, card: &NewsCard) -> fmt::Result {
    writeln!(f, "<div class=\"card\">")?;
    write_image(f, card.image_url.as_deref(), &card.title)?;
    writeln!(f, "<div>")?;
    writeln!(
        f,
        "<h2>{}. <a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></h2>",
        card.index,
        escape_html(&card.link),
        escape_html(&card.title)
    )?;
    writeln!(
        f,
        "<p class=\"meta\">{} | {}</p>",
        escape_html(&card.source),
        escape_html(&card.published)
    )?;
    writeln!(f, "<h3>Summary</h3>\n<p>{}</p>", escape_html(&card.summary))?;
    match &card.important_points {
        Some(points) => writeln!(f, "<h3>Important points</h3>\n<p>{}</p>", escape_html(points))?,
        None => writeln!(
            f,
            "<p class=\"meta\">Summarization not possible for this article.</p>"
        )?,
    }
    if !card.keywords.is_empty() {
        writeln!(
            f,
            "<p class=\"meta\">Keywords: {}</p>",
            escape_html(&card.keywords.join(", "))
        )?;
    }
    writeln!(
        f,
        "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Read more at {}</a></p>",
        escape_html(&card.link),
        escape_html(&card.source)
    )?;
    writeln!(f, "</div>\n</div>")
}

fn write_paper_card(f: &mut fmt::Formatter<'_>, card: &PaperCard) -> fmt::Result {
    writeln!(f, "<div class=\"card\">")?;
    write_image(f, card.image_url.as_deref(), &card.title)?;
    writeln!(f, "<div>")?;
    writeln!(
        f,
        "<h2>{}. <a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></h2>",
        card.index,
        escape_html(&card.url),
        escape_html(&card.title)
    )?;
    writeln!(
        f,
        "<p class=\"meta\">Authors: {} | Published: {}</p>",
        escape_html(&card.authors),
        escape_html(&card.published)
    )?;
    writeln!(f, "<p>{}</p>", escape_html(&card.abstract_text))?;
    writeln!(
        f,
        "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Read full paper</a> | \
         <a href=\"{}\" target=\"_blank\" rel=\"noopener\">arXiv</a></p>",
        escape_html(&card.url),
        escape_html(&card.arxiv_url)
    )?;
    writeln!(f, "</div>\n</div>")
}
