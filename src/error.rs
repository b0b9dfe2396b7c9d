//! Error taxonomy for the fetch → extract → summarize pipeline.
//!
//! Whole-feed failures ([`NewsError::Network`], [`NewsError::Parse`]) are
//! surfaced once per pass as a category-level error. Per-item failures
//! ([`NewsError::Extraction`], [`NewsError::MissingField`],
//! [`NewsError::Summarization`]) are logged and only ever skip or degrade the
//! single item they belong to.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    /// Unreachable host, timeout or a non-success HTTP status.
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// Feed XML or listing HTML missing the expected structure.
    #[error("parse error: {0}")]
    Parse(String),

    /// The article page has no extractable main content.
    #[error("could not extract article content from {url}: {reason}")]
    Extraction { url: String, reason: String },

    /// Degenerate input to the sentence-ranking summarizer.
    #[error("summarization not possible: {0}")]
    Summarization(String),

    /// An optional structural marker is absent in scraped HTML.
    #[error("missing field `{field}` at {url}")]
    MissingField { field: &'static str, url: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl NewsError {
    pub fn network(url: &str, err: impl std::fmt::Display) -> Self {
        NewsError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    /// True for failures that should be reported once for the whole category.
    pub fn is_category_level(&self) -> bool {
        matches!(self, NewsError::Network { .. } | NewsError::Parse(_))
    }
}

pub type Result<T> = std::result::Result<T, NewsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_level_classification() {
        assert!(NewsError::network("https://example.com", "timed out").is_category_level());
        assert!(NewsError::Parse("bad xml".into()).is_category_level());
        assert!(
            !NewsError::Extraction {
                url: "https://example.com".into(),
                reason: "empty".into()
            }
            .is_category_level()
        );
        assert!(!NewsError::Summarization("no sentences".into()).is_category_level());
    }

    #[test]
    fn test_network_error_message() {
        let err = NewsError::network("https://example.com/rss", "connection refused");
        assert_eq!(
            err.to_string(),
            "network error fetching https://example.com/rss: connection refused"
        );
    }
}
