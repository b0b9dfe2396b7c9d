//! Per-topic record of the last fetched feed, used to flag new items.

use crate::models::FeedItem;
use std::collections::HashMap;

/// Last-seen feed items per topic.
///
/// Change detection compares item counts only: a feed that swaps one story
/// for another without changing its length is reported as unchanged.
#[derive(Debug, Default, Clone)]
pub struct TopicCache {
    seen: HashMap<String, Vec<FeedItem>>,
}

impl TopicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `topic` has never been seen or its item count
    /// differs from the cached one, replacing the cached items in that case.
    pub fn compare_and_update(&mut self, topic: &str, items: &[FeedItem]) -> bool {
        let changed = self
            .seen
            .get(topic)
            .is_none_or(|cached| cached.len() != items.len());
        if changed {
            self.seen.insert(topic.to_string(), items.to_vec());
        }
        changed
    }

    #[cfg(test)]
    pub fn get(&self, topic: &str) -> Option<&[FeedItem]> {
        self.seen.get(topic).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: usize) -> FeedItem {
        FeedItem {
            title: format!("Story {}", n),
            link: format!("https://example.com/{}", n),
            publish_date: "Mon, 19 Oct 2026 08:00:00 GMT".to_string(),
            source: "Example".to_string(),
        }
    }

    #[test]
    fn test_first_sighting_is_a_change() {
        let mut cache = TopicCache::new();
        assert!(cache.is_empty());
        assert!(cache.compare_and_update("Science", &[item(1), item(2)]));
        assert_eq!(cache.get("Science").unwrap().len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_same_count_is_unchanged_and_keeps_old_items() {
        let mut cache = TopicCache::new();
        cache.compare_and_update("Science", &[item(1), item(2)]);
        assert!(!cache.compare_and_update("Science", &[item(3), item(4)]));
        assert_eq!(cache.get("Science").unwrap()[0], item(1));
    }

    #[test]
    fn test_count_change_replaces_items() {
        let mut cache = TopicCache::new();
        cache.compare_and_update("Science", &[item(1)]);
        assert!(cache.compare_and_update("Science", &[item(1), item(2)]));
        assert_eq!(cache.get("Science").unwrap().len(), 2);
    }

    #[test]
    fn test_topics_are_independent() {
        let mut cache = TopicCache::new();
        cache.compare_and_update("Science", &[item(1)]);
        assert!(cache.compare_and_update("Technology", &[item(1)]));
        assert!(cache.get("Artificial Intelligence").is_none());
    }

    #[test]
    fn test_shrinking_feed_is_a_change() {
        let mut cache = TopicCache::new();
        cache.compare_and_update("Science", &[item(1), item(2), item(3)]);
        assert!(cache.compare_and_update("Science", &[item(1)]));
        assert_eq!(cache.get("Science").unwrap().len(), 1);
    }
}
