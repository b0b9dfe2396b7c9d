//! Markdown rendering of a pass, printed by the `pass` subcommand.

use crate::models::{Card, NewsCard, PaperCard, PassReport, RESEARCH_PAPERS_TOPIC};
use std::fmt;

/// Markdown view of a [`PassReport`].
///
/// ```text
/// # Technology
///
/// _New news updates are available!_
///
/// ## 1. Chipmaker unveils new processor
/// **Source:** Reuters | **Published:** Mon, 19 Oct 2026 08:00:00 GMT
/// ...
/// ```
pub struct MarkdownReport<'a>(pub &'a PassReport);

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "# {}\n", report.topic)?;

        if report.new_items {
            writeln!(f, "_New news updates are available!_\n")?;
        }

        if report.cards.is_empty() {
            if report.topic == RESEARCH_PAPERS_TOPIC {
                writeln!(f, "No research papers found.")?;
            } else {
                writeln!(f, "No news found for {}", report.topic)?;
            }
            return Ok(());
        }

        for card in &report.cards {
            match card {
                Card::News(card) => write_news(f, card)?,
                Card::Paper(card) => write_paper(f, card)?,
            }
        }

        if report.skipped > 0 {
            writeln!(
                f,
                "_{} of {} items could not be extracted._",
                report.skipped, report.candidates
            )?;
        }
        Ok(())
    }
}

fn write_news(f: &mut fmt::Formatter<'_>, card: &NewsCard) -> fmt::Result {
    writeln!(f, "## {}. {}", card.index, card.title)?;
    writeln!(
        f,
        "**Source:** {} | **Published:** {}\n",
        card.source, card.published
    )?;
    if let Some(image) = &card.image_url {
        writeln!(f, "![{}]({})\n", card.title, image)?;
    }
    writeln!(f, "### Summary\n\n{}\n", card.summary)?;
    match &card.important_points {
        Some(points) => writeln!(f, "### Important points\n\n{}\n", points)?,
        None => writeln!(f, "_Summarization not possible for this article._\n")?,
    }
    if !card.keywords.is_empty() {
        writeln!(f, "**Keywords:** {}\n", card.keywords.join(", "))?;
    }
    writeln!(f, "[Read more at {}]({})\n", card.source, card.link)
}

fn write_paper(f: &mut fmt::Formatter<'_>, card: &PaperCard) -> fmt::Result {
    writeln!(f, "## {}. {}", card.index, card.title)?;
    writeln!(
        f,
        "**Authors:** {} | **Published:** {}\n",
        card.authors, card.published
    )?;
    if let Some(image) = &card.image_url {
        writeln!(f, "![{}]({})\n", card.title, image)?;
    }
    writeln!(f, "{}\n", card.abstract_text)?;
    writeln!(f, "[Read full paper]({}) | [arXiv]({})\n", card.url, card.arxiv_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperRecord;

    fn news_report() -> PassReport {
        PassReport {
            topic: "Technology".to_string(),
            cards: vec![Card::News(NewsCard {
                index: 1,
                title: "Chipmaker unveils new processor".to_string(),
                link: "https://example.com/chips".to_string(),
                source: "Reuters".to_string(),
                published: "Mon, 19 Oct 2026 08:00:00 GMT".to_string(),
                image_url: None,
                summary: "A new processor was unveiled.".to_string(),
                important_points: None,
                keywords: vec!["processor".to_string(), "chips".to_string()],
            })],
            new_items: true,
            candidates: 3,
            skipped: 2,
        }
    }

    #[test]
    fn test_news_markdown() {
        let md = MarkdownReport(&news_report()).to_string();
        assert!(md.starts_with("# Technology\n"));
        assert!(md.contains("_New news updates are available!_"));
        assert!(md.contains("## 1. Chipmaker unveils new processor"));
        assert!(md.contains("**Source:** Reuters"));
        assert!(md.contains("_Summarization not possible for this article._"));
        assert!(md.contains("**Keywords:** processor, chips"));
        assert!(md.contains("[Read more at Reuters](https://example.com/chips)"));
        assert!(md.contains("_2 of 3 items could not be extracted._"));
    }

    #[test]
    fn test_paper_markdown_links_arxiv() {
        let report = PassReport {
            topic: RESEARCH_PAPERS_TOPIC.to_string(),
            cards: vec![Card::Paper(PaperCard::from_record(
                1,
                PaperRecord {
                    url: "https://huggingface.co/papers/2410.00001".to_string(),
                    ..Default::default()
                },
            ))],
            new_items: false,
            candidates: 1,
            skipped: 0,
        };
        let md = MarkdownReport(&report).to_string();
        assert!(md.contains("## 1. Untitled paper"));
        assert!(md.contains("**Authors:** N/A"));
        assert!(md.contains(
            "[Read full paper](https://huggingface.co/papers/2410.00001) | [arXiv](https://arxiv.org/abs/2410.00001)"
        ));
    }

    #[test]
    fn test_empty_reports() {
        let mut report = news_report();
        report.cards.clear();
        report.new_items = false;
        assert!(MarkdownReport(&report)
            .to_string()
            .contains("No news found for Technology"));

        report.topic = RESEARCH_PAPERS_TOPIC.to_string();
        assert!(MarkdownReport(&report)
            .to_string()
            .contains("No research papers found."));
    }
}
