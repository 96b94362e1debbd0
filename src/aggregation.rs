//! Per-value document counts returned by terms aggregations.

use serde::{Deserialize, Serialize};

/// Order in which aggregation buckets are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BucketOrder {
    /// The order the cluster returned them in (highest count first).
    #[default]
    Engine,
    /// Lexicographic by bucket key.
    Key,
}

/// A single distinct value and the number of articles carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub key: String,
    pub count: u64,
}

/// Ordered mapping from a field's distinct values to article counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCounts {
    buckets: Vec<TermCount>,
}

impl TermCounts {
    /// Builds the mapping from buckets in cluster order, then applies `order`.
    pub fn from_buckets(buckets: impl IntoIterator<Item = (String, u64)>, order: BucketOrder) -> Self {
        let mut buckets: Vec<TermCount> = buckets
            .into_iter()
            .map(|(key, count)| TermCount { key, count })
            .collect();

        if order == BucketOrder::Key {
            buckets.sort_by(|a, b| a.key.cmp(&b.key));
        }

        Self { buckets }
    }

    /// Returns the count for `key`, if present.
    pub fn get(&self, key: &str) -> Option<u64> {
        self.buckets
            .iter()
            .find(|bucket| bucket.key == key)
            .map(|bucket| bucket.count)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterates over the buckets in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &TermCount> {
        self.buckets.iter()
    }

    /// Returns the keys in presentation order.
    pub fn keys(&self) -> Vec<&str> {
        self.buckets.iter().map(|bucket| bucket.key.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a TermCounts {
    type Item = &'a TermCount;
    type IntoIter = std::slice::Iter<'a, TermCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets() -> Vec<(String, u64)> {
        vec![
            ("Author 3".to_string(), 2),
            ("Author 1".to_string(), 2),
            ("Author 2".to_string(), 1),
        ]
    }

    #[test]
    fn test_engine_order_preserved() {
        let counts = TermCounts::from_buckets(buckets(), BucketOrder::Engine);
        assert_eq!(counts.keys(), vec!["Author 3", "Author 1", "Author 2"]);
    }

    #[test]
    fn test_key_order_sorted() {
        let counts = TermCounts::from_buckets(buckets(), BucketOrder::Key);
        assert_eq!(counts.keys(), vec!["Author 1", "Author 2", "Author 3"]);
    }

    #[test]
    fn test_get() {
        let counts = TermCounts::from_buckets(buckets(), BucketOrder::Key);
        assert_eq!(counts.get("Author 1"), Some(2));
        assert_eq!(counts.get("Author 2"), Some(1));
        assert_eq!(counts.get("nobody"), None);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_empty() {
        let counts = TermCounts::from_buckets(Vec::new(), BucketOrder::Engine);
        assert!(counts.is_empty());
        assert_eq!(counts.iter().count(), 0);
    }

    #[test]
    fn test_default_order_is_engine() {
        assert_eq!(BucketOrder::default(), BucketOrder::Engine);
    }
}
