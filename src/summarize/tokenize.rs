//! English sentence and word tokenization.
//!
//! The sentence splitter is rule based: a `.`, `!` or `?` (plus any closing
//! quotes or brackets) ends a sentence when it is followed by whitespace and a
//! capital letter, digit or opening quote, or by the end of the paragraph. A
//! period after a known abbreviation or a single capital initial never ends a
//! sentence. Newlines always end a sentence.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)?").expect("valid word regex"));

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co",
        "corp", "dept", "univ", "gen", "gov", "sen", "rep", "lt", "col", "capt", "sgt", "mt",
        "fig", "approx", "est", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
        "sept", "oct", "nov", "dec", "e.g", "i.e", "a.m", "p.m",
    ]
    .into_iter()
    .collect()
});

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
        "during", "each", "few", "for", "from", "further", "had", "has", "have", "having", "he",
        "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in",
        "into", "is", "it", "it's", "its", "itself", "just", "me", "more", "most", "my",
        "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
        "our", "ours", "ourselves", "out", "over", "own", "said", "same", "says", "she",
        "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
        "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
        "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
        "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
        "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 7] = ['"', '\'', '”', '’', ')', ']', '»'];
const OPENERS: [char; 6] = ['"', '\'', '“', '‘', '(', '['];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Split text into trimmed, non-empty sentences in document order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for paragraph in text.lines().map(str::trim).filter(|p| !p.is_empty()) {
        let chars: Vec<char> = paragraph.chars().collect();
        let mut start = 0;
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if !TERMINATORS.contains(&c) {
                i += 1;
                continue;
            }
            let mut end = i + 1;
            while end < chars.len()
                && (TERMINATORS.contains(&chars[end]) || CLOSERS.contains(&chars[end]))
            {
                end += 1;
            }
            let boundary = end >= chars.len()
                || (chars[end].is_whitespace() && starts_sentence(&chars[end..]));
            if boundary && !(c == '.' && ends_with_abbreviation(&chars[start..i])) {
                push_sentence(&mut sentences, &chars[start..end]);
                start = end;
            }
            i = end;
        }
        if start < chars.len() {
            push_sentence(&mut sentences, &chars[start..]);
        }
    }
    sentences
}

/// Lowercased word tokens of a sentence.
pub fn words(sentence: &str) -> Vec<String> {
    WORD_RE
        .find_iter(sentence)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Lowercased word tokens with stop words removed.
pub fn content_words(sentence: &str) -> Vec<String> {
    words(sentence)
        .into_iter()
        .filter(|w| !is_stop_word(w))
        .collect()
}

fn push_sentence(sentences: &mut Vec<String>, chars: &[char]) {
    let sentence: String = chars.iter().collect();
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

fn starts_sentence(rest: &[char]) -> bool {
    match rest.iter().find(|c| !c.is_whitespace()) {
        Some(next) => next.is_uppercase() || next.is_ascii_digit() || OPENERS.contains(next),
        None => true,
    }
}

fn ends_with_abbreviation(prefix: &[char]) -> bool {
    let word: String = prefix
        .iter()
        .rev()
        .take_while(|c| !c.is_whitespace())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let word = word.trim_start_matches(|c: char| OPENERS.contains(&c));
    if word.is_empty() {
        return false;
    }
    let lowered = word.to_lowercase();
    if ABBREVIATIONS.contains(lowered.as_str()) {
        return true;
    }
    let mut letters = word.chars();
    // single capital initial, e.g. "J. K. Rowling"
    if let (Some(first), None) = (letters.next(), letters.next()) {
        if first.is_uppercase() {
            return true;
        }
    }
    // dotted acronyms such as "U.S"
    word.contains('.') && word.chars().all(|c| c == '.' || c.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_sentences() {
        let sentences = split_sentences("The sky is blue. Grass is green! Is water wet? Yes.");
        assert_eq!(
            sentences,
            vec!["The sky is blue.", "Grass is green!", "Is water wet?", "Yes."]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let sentences =
            split_sentences("Dr. Smith met Mr. Jones in the U.S. capital. They talked for hours.");
        assert_eq!(
            sentences,
            vec![
                "Dr. Smith met Mr. Jones in the U.S. capital.",
                "They talked for hours."
            ]
        );
    }

    #[test]
    fn test_initials_and_decimals() {
        let sentences = split_sentences("J. K. Rowling sold 3.5 million copies. Fans cheered.");
        assert_eq!(
            sentences,
            vec!["J. K. Rowling sold 3.5 million copies.", "Fans cheered."]
        );
    }

    #[test]
    fn test_quotes_close_sentence() {
        let sentences = split_sentences(r#"She said "it works." Then she left."#);
        assert_eq!(sentences, vec![r#"She said "it works.""#, "Then she left."]);
    }

    #[test]
    fn test_lowercase_continuation_is_not_a_boundary() {
        let sentences = split_sentences("Version 2. of the tool shipped today.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_newlines_end_sentences() {
        let sentences = split_sentences("Headline without period\n\nBody text here.");
        assert_eq!(sentences, vec!["Headline without period", "Body text here."]);
    }

    #[test]
    fn test_empty_text_has_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\n  ").is_empty());
    }

    #[test]
    fn test_words_lowercase_and_keep_contractions() {
        assert_eq!(
            words("Don't PANIC, it's 42!"),
            vec!["don't", "panic", "it's", "42"]
        );
    }

    #[test]
    fn test_content_words_drop_stop_words() {
        assert_eq!(
            content_words("The model is trained on the data"),
            vec!["model", "trained", "data"]
        );
    }
}
