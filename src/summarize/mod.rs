//! Extractive summarization.
//!
//! - [`lexrank`]: graph-based sentence ranking used for "important points"
//! - [`keywords`]: keyword pass used by the article extractor for its own summary
//! - [`tokenize`]: English sentence and word tokenization shared by both

pub mod keywords;
pub mod lexrank;
pub mod tokenize;

use crate::error::Result;
use crate::models::ExtractiveSummary;

pub use lexrank::LexRankSummarizer;

/// Produces an extractive summary of at most `sentence_count` sentences.
///
/// Text with fewer sentences than requested yields all of its sentences.
/// Text with no sentences at all is a [`crate::error::NewsError::Summarization`].
pub trait Summarizer {
    fn summarize(&self, text: &str, sentence_count: usize) -> Result<ExtractiveSummary>;
}
