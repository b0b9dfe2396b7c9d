//! Keyword extraction and the article extractor's own summary.
//!
//! Runs as the extractor's secondary content-analysis pass. Each sentence is
//! scored on four features: overlap with the title, density of the article's
//! top keywords, closeness to an ideal length, and position in the text.

use super::tokenize::{content_words, split_sentences};
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

const IDEAL_SENTENCE_WORDS: f64 = 20.0;
const KEYWORD_LIMIT: usize = 10;

/// The `limit` most frequent non-stop words, ties broken by first appearance.
pub fn keywords(text: &str, limit: usize) -> Vec<String> {
    keyword_weights(text, limit)
        .into_iter()
        .map(|(word, _)| word)
        .collect()
}

/// Pick up to `max_sentences` sentences that best represent `text`.
pub fn article_summary(title: &str, text: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() || max_sentences == 0 {
        return String::new();
    }

    let title_words: HashSet<String> = content_words(title).into_iter().collect();
    let weights: HashMap<String, f64> = keyword_weights(text, KEYWORD_LIMIT).into_iter().collect();
    let total = sentences.len();

    let scores: Vec<f64> = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let words = content_words(sentence);
            let title_feature = title_score(&words, &title_words);
            let frequency = keyword_density(&words, &weights) * 10.0;
            let length = length_score(words.len());
            let position = position_score(i, total);
            (title_feature * 1.5 + frequency * 2.0 + length + position) / 4.0
        })
        .collect();

    (0..total)
        .sorted_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal))
        .take(max_sentences)
        .sorted()
        .map(|i| sentences[i].as_str())
        .join(" ")
}

fn keyword_weights(text: &str, limit: usize) -> Vec<(String, f64)> {
    let words = content_words(text);
    let total = words.len() as f64;
    if total == 0.0 {
        return Vec::new();
    }

    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (i, word) in words.iter().enumerate().filter(|(_, w)| w.chars().count() > 2) {
        first_seen.entry(word.as_str()).or_insert(i);
        *counts.entry(word.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .sorted_by(|(a, ca), (b, cb)| cb.cmp(ca).then(first_seen[a].cmp(&first_seen[b])))
        .take(limit)
        .map(|(word, count)| (word.to_string(), count as f64 / total))
        .collect()
}

fn title_score(words: &[String], title_words: &HashSet<String>) -> f64 {
    if title_words.is_empty() {
        return 0.0;
    }
    let hits = words.iter().filter(|w| title_words.contains(*w)).count();
    hits as f64 / title_words.len() as f64
}

fn keyword_density(words: &[String], weights: &HashMap<String, f64>) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let score: f64 = words.iter().filter_map(|w| weights.get(w)).sum();
    score / words.len() as f64
}

fn length_score(words: usize) -> f64 {
    (1.0 - (IDEAL_SENTENCE_WORDS - words as f64).abs() / IDEAL_SENTENCE_WORDS).max(0.0)
}

/// Opening and closing sentences of an article carry the most weight.
fn position_score(index: usize, total: usize) -> f64 {
    let normalized = (index + 1) as f64 / total as f64;
    match normalized {
        n if n <= 0.1 => 0.17,
        n if n <= 0.2 => 0.23,
        n if n <= 0.3 => 0.14,
        n if n <= 0.4 => 0.08,
        n if n <= 0.5 => 0.05,
        n if n <= 0.6 => 0.04,
        n if n <= 0.7 => 0.06,
        n if n <= 0.8 => 0.04,
        n if n <= 0.9 => 0.04,
        _ => 0.15,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Quantum computers promise faster drug discovery. \
        Researchers built a quantum processor with fifty qubits. \
        The weather was mild on Tuesday. \
        Quantum error correction remains the main obstacle for quantum computers.";

    #[test]
    fn test_keywords_ranked_by_frequency() {
        let kws = keywords(TEXT, 3);
        assert_eq!(kws[0], "quantum");
        assert_eq!(kws[1], "computers");
        assert_eq!(kws.len(), 3);
    }

    #[test]
    fn test_keywords_of_empty_text() {
        assert!(keywords("", 10).is_empty());
    }

    #[test]
    fn test_article_summary_prefers_on_topic_sentences() {
        let summary = article_summary("Quantum computers near a breakthrough", TEXT, 2);
        assert!(!summary.contains("weather"));
        assert!(summary.starts_with("Quantum computers promise"));
    }

    #[test]
    fn test_article_summary_keeps_all_short_text() {
        let summary = article_summary("Title", "One line only.", 5);
        assert_eq!(summary, "One line only.");
    }

    #[test]
    fn test_article_summary_of_empty_text() {
        assert_eq!(article_summary("Title", "", 5), "");
    }

    #[test]
    fn test_length_score_peaks_at_ideal() {
        assert_eq!(length_score(20), 1.0);
        assert!(length_score(10) < 1.0);
        assert_eq!(length_score(60), 0.0);
    }
}
