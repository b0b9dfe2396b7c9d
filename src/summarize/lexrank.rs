//! LexRank extractive summarization.
//!
//! Sentences become nodes of a graph whose edges connect distinct pairs with
//! a TF-IDF cosine similarity above a threshold. Each row of the adjacency
//! matrix is normalized by its degree and the stationary distribution of a
//! damped random walk over it is found by power iteration. Sentences without
//! any edge spread their mass uniformly. The highest-scoring sentences are
//! returned in their original document order.

use super::Summarizer;
use super::tokenize::{content_words, split_sentences};
use crate::error::{NewsError, Result};
use crate::models::ExtractiveSummary;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

const MAX_ITERATIONS: usize = 1000;

#[derive(Debug, Clone)]
pub struct LexRankSummarizer {
    threshold: f64,
    damping: f64,
    epsilon: f64,
}

impl Default for LexRankSummarizer {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            damping: 0.85,
            epsilon: 1e-4,
        }
    }
}

impl LexRankSummarizer {
    /// Score every sentence; higher means more central to the document.
    pub fn rate_sentences(&self, sentences: &[Vec<String>]) -> Vec<f64> {
        let n = sentences.len();
        if n == 0 {
            return Vec::new();
        }

        let tf: Vec<HashMap<&str, f64>> = sentences.iter().map(|s| term_frequencies(s)).collect();
        let idf = inverse_document_frequencies(sentences);

        let mut matrix = vec![vec![0.0_f64; n]; n];
        let mut dangling = vec![false; n];
        for i in 0..n {
            let mut degree = 0.0;
            for j in (0..n).filter(|&j| j != i) {
                if cosine_similarity(&tf[i], &tf[j], &idf) > self.threshold {
                    matrix[i][j] = 1.0;
                    degree += 1.0;
                }
            }
            if degree == 0.0 {
                dangling[i] = true;
                continue;
            }
            for cell in matrix[i].iter_mut() {
                *cell /= degree;
            }
        }

        self.power_method(&matrix, &dangling)
    }

    fn power_method(&self, matrix: &[Vec<f64>], dangling: &[bool]) -> Vec<f64> {
        let n = matrix.len();
        let uniform = 1.0 / n as f64;
        let mut p = vec![uniform; n];
        for iteration in 0..MAX_ITERATIONS {
            let dangling_mass: f64 = (0..n).filter(|&i| dangling[i]).map(|i| p[i]).sum();
            let next: Vec<f64> = (0..n)
                .map(|j| {
                    let inflow: f64 = (0..n).map(|i| matrix[i][j] * p[i]).sum();
                    (1.0 - self.damping) * uniform
                        + self.damping * (inflow + dangling_mass * uniform)
                })
                .collect();
            let delta = next
                .iter()
                .zip(&p)
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt();
            p = next;
            if delta < self.epsilon {
                debug!(iteration, "Power method converged");
                break;
            }
        }
        p
    }
}

impl Summarizer for LexRankSummarizer {
    #[instrument(level = "debug", skip_all, fields(bytes = text.len(), sentence_count = sentence_count))]
    fn summarize(&self, text: &str, sentence_count: usize) -> Result<ExtractiveSummary> {
        if sentence_count == 0 {
            return Err(NewsError::Summarization(
                "sentence count must be at least 1".to_string(),
            ));
        }
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Err(NewsError::Summarization(
                "text contains no sentences".to_string(),
            ));
        }
        if sentences.len() <= sentence_count {
            return Ok(ExtractiveSummary::from_sentences(sentences));
        }

        let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| content_words(s)).collect();
        let ratings = self.rate_sentences(&tokenized);

        let chosen: Vec<String> = (0..sentences.len())
            .sorted_by(|&a, &b| ratings[b].partial_cmp(&ratings[a]).unwrap_or(Ordering::Equal))
            .take(sentence_count)
            .sorted()
            .map(|i| sentences[i].clone())
            .collect();
        Ok(ExtractiveSummary::from_sentences(chosen))
    }
}

/// Term counts normalized by the most frequent term of the sentence.
fn term_frequencies(words: &[String]) -> HashMap<&str, f64> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    for word in words {
        *counts.entry(word.as_str()).or_insert(0.0) += 1.0;
    }
    let max = counts.values().copied().fold(0.0, f64::max);
    if max > 0.0 {
        for value in counts.values_mut() {
            *value /= max;
        }
    }
    counts
}

fn inverse_document_frequencies(sentences: &[Vec<String>]) -> HashMap<&str, f64> {
    let n = sentences.len() as f64;
    let mut containing: HashMap<&str, f64> = HashMap::new();
    for sentence in sentences {
        let unique: HashSet<&str> = sentence.iter().map(String::as_str).collect();
        for word in unique {
            *containing.entry(word).or_insert(0.0) += 1.0;
        }
    }
    containing
        .into_iter()
        .map(|(word, count)| (word, (n / (1.0 + count)).ln()))
        .collect()
}

fn cosine_similarity(
    a: &HashMap<&str, f64>,
    b: &HashMap<&str, f64>,
    idf: &HashMap<&str, f64>,
) -> f64 {
    let weight = |word: &str| idf.get(word).copied().unwrap_or(0.0);

    let numerator: f64 = a
        .iter()
        .filter_map(|(word, tf_a)| b.get(word).map(|tf_b| tf_a * tf_b * weight(word).powi(2)))
        .sum();
    let norm = |tf: &HashMap<&str, f64>| {
        tf.iter()
            .map(|(word, value)| (value * weight(word)).powi(2))
            .sum::<f64>()
            .sqrt()
    };
    let (norm_a, norm_b) = (norm(a), norm(b));
    if norm_a > 0.0 && norm_b > 0.0 {
        numerator / (norm_a * norm_b)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "Solar panels convert sunlight into electricity. \
        Engineers improved solar panels to convert more sunlight. \
        The local bakery sells fresh bread every morning. \
        New solar panels convert sunlight into electricity at record efficiency. \
        A cat slept on the windowsill all afternoon. \
        Electricity from solar panels now powers many homes.";

    #[test]
    fn test_picks_central_sentences_in_document_order() {
        let summary = LexRankSummarizer::default().summarize(ARTICLE, 2).unwrap();
        assert_eq!(summary.sentences.len(), 2);
        for sentence in &summary.sentences {
            assert!(sentence.contains("solar") || sentence.contains("Solar"));
        }
        let first = ARTICLE.find(&summary.sentences[0]).unwrap();
        let second = ARTICLE.find(&summary.sentences[1]).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_fewer_sentences_than_requested_returns_all() {
        let summary = LexRankSummarizer::default()
            .summarize("Only one sentence here. And a second one.", 5)
            .unwrap();
        assert_eq!(
            summary.sentences,
            vec!["Only one sentence here.", "And a second one."]
        );
        assert_eq!(summary.joined_text, "Only one sentence here. And a second one.");
    }

    #[test]
    fn test_empty_text_is_summarization_error() {
        let result = LexRankSummarizer::default().summarize("   ", 5);
        assert!(matches!(result, Err(NewsError::Summarization(_))));
    }

    #[test]
    fn test_zero_sentence_count_is_summarization_error() {
        let result = LexRankSummarizer::default().summarize(ARTICLE, 0);
        assert!(matches!(result, Err(NewsError::Summarization(_))));
    }

    #[test]
    fn test_ratings_form_a_distribution() {
        let sentences: Vec<Vec<String>> = split_sentences(ARTICLE)
            .iter()
            .map(|s| content_words(s))
            .collect();
        let ratings = LexRankSummarizer::default().rate_sentences(&sentences);
        assert_eq!(ratings.len(), 6);
        let total: f64 = ratings.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
        // the unrelated sentences rank below the solar ones
        assert!(ratings[2] < ratings[0]);
        assert!(ratings[4] < ratings[3]);
    }

    #[test]
    fn test_sentences_without_words_do_not_panic() {
        let text = "!!! ??? ... Real words appear here. More real words appear there.";
        let summary = LexRankSummarizer::default().summarize(text, 1).unwrap();
        assert_eq!(summary.sentences.len(), 1);
    }
}
