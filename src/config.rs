//! Runtime configuration loaded from an optional YAML file.
//!
//! Every field has a default so the dashboard runs without any file at all.
//! A partial file only overrides the keys it names:
//!
//! ```yaml
//! bind: 0.0.0.0:8501
//! request_timeout_secs: 15
//! refresh_interval_secs: 600
//! ```

use crate::error::{NewsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// Smallest and largest quantity the dashboard's slider allows.
pub const MIN_QUANTITY: usize = 5;
pub const MAX_QUANTITY: usize = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the dashboard listens on.
    pub bind: String,
    /// Feed query URL; `{topic}` is replaced by the encoded topic.
    pub feed_url_template: String,
    pub papers_listing_url: String,
    /// Base used to resolve relative paper links from the listing.
    pub papers_base_url: String,
    pub papers_fallback_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub refresh_interval_secs: u64,
    /// Sentences in the "important points" block.
    pub summary_sentences: usize,
    /// Sentences in the extractor's own article summary.
    pub article_summary_sentences: usize,
    pub default_quantity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
            feed_url_template:
                "https://news.google.com/rss/search?q={topic}+when:1d&hl=en-US&gl=US&ceid=US:en"
                    .to_string(),
            papers_listing_url: "https://huggingface.co/papers".to_string(),
            papers_base_url: "https://huggingface.co".to_string(),
            papers_fallback_url: "https://www.google.com/search?q=AI+research+papers&tbm=nws"
                .to_string(),
            request_timeout_secs: 30,
            user_agent: concat!("news_summarizer/", env!("CARGO_PKG_VERSION")).to_string(),
            refresh_interval_secs: 1200,
            summary_sentences: 5,
            article_summary_sentences: 5,
            default_quantity: MIN_QUANTITY,
        }
    }
}

impl Config {
    /// Load the YAML file at `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let config = Self::from_yaml(&raw)?;
                info!(path = %path.display(), "Loaded configuration file");
                config
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| NewsError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if !self.feed_url_template.contains("{topic}") {
            return Err(NewsError::Config(
                "feed_url_template must contain a {topic} placeholder".to_string(),
            ));
        }
        if self.summary_sentences == 0 || self.article_summary_sentences == 0 {
            return Err(NewsError::Config(
                "summary sentence counts must be at least 1".to_string(),
            ));
        }
        if self.refresh_interval_secs == 0 {
            return Err(NewsError::Config(
                "refresh_interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Clamp a requested quantity into the slider's range.
    pub fn clamp_quantity(quantity: usize) -> usize {
        quantity.clamp(MIN_QUANTITY, MAX_QUANTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_interval_secs, 1200);
        assert_eq!(config.summary_sentences, 5);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("bind: 0.0.0.0:9000\nrequest_timeout_secs: 5\n").unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.papers_listing_url, "https://huggingface.co/papers");
    }

    #[test]
    fn test_template_without_placeholder_is_rejected() {
        let config = Config::from_yaml("feed_url_template: https://example.com/rss\n").unwrap();
        assert!(matches!(config.validate(), Err(NewsError::Config(_))));
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        assert!(matches!(
            Config::from_yaml("bind: [unterminated"),
            Err(NewsError::Config(_))
        ));
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(Config::clamp_quantity(1), MIN_QUANTITY);
        assert_eq!(Config::clamp_quantity(12), 12);
        assert_eq!(Config::clamp_quantity(100), MAX_QUANTITY);
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
