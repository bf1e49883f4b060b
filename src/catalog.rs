//! Grapheme segmentation and the deduplicated cluster catalog.
//!
//! Every distinct grapheme cluster seen across the input phrases gets an
//! ordinal in first-seen order. Phrases are then just lists of ordinals.

use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Ordinals of one phrase's clusters, in reading order.
pub type PhraseIndexList = Vec<usize>;

/// Split `text` into extended grapheme clusters.
///
/// Combining marks stay with their base, so a Lao consonant with stacked
/// vowel and tone marks is one cluster.
pub fn segment(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Ordered, duplicate-free list of grapheme clusters.
///
/// Ordinals are assigned on first insertion and never change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    clusters: Vec<String>,
    ordinals: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordinal of `cluster`, inserting it at the end if it is new.
    pub fn intern(&mut self, cluster: &str) -> usize {
        if let Some(&ordinal) = self.ordinals.get(cluster) {
            return ordinal;
        }
        let ordinal = self.clusters.len();
        self.clusters.push(cluster.to_string());
        self.ordinals.insert(cluster.to_string(), ordinal);
        ordinal
    }

    /// Segment `phrase`, intern every cluster and return the phrase's ordinals.
    pub fn add_phrase(&mut self, phrase: &str) -> PhraseIndexList {
        segment(phrase)
            .into_iter()
            .map(|cluster| self.intern(cluster))
            .collect()
    }

    /// Cluster text for an ordinal
    pub fn get(&self, ordinal: usize) -> Option<&str> {
        self.clusters.get(ordinal).map(String::as_str)
    }

    /// Ordinal of a cluster already in the catalog
    pub fn ordinal_of(&self, cluster: &str) -> Option<usize> {
        self.ordinals.get(cluster).copied()
    }

    /// Number of distinct clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// True when no cluster has been added
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Clusters in ordinal order
    pub fn clusters(&self) -> &[String] {
        &self.clusters
    }

    /// Iterate `(ordinal, cluster)` pairs in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.clusters.iter().map(String::as_str).enumerate()
    }
}

/// Build the catalog and per-phrase ordinal lists for a set of phrases.
///
/// Phrases are processed in order, so the result is fully determined by the
/// input. An empty phrase yields an empty index list.
pub fn build_catalog<S: AsRef<str>>(phrases: &[S]) -> (Catalog, Vec<PhraseIndexList>) {
    let mut catalog = Catalog::new();
    let index_lists = phrases
        .iter()
        .map(|phrase| catalog.add_phrase(phrase.as_ref()))
        .collect();
    (catalog, index_lists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_keeps_marks_with_base() {
        // KO + MAI KANG + MAI EK is a single cluster
        assert_eq!(segment("\u{0E81}\u{0EB1}\u{0EC8}"), vec!["\u{0E81}\u{0EB1}\u{0EC8}"]);
        // e + combining acute
        assert_eq!(segment("e\u{0301}x"), vec!["e\u{0301}", "x"]);
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_intern_is_stable() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.intern("a"), 0);
        assert_eq!(catalog.intern("b"), 1);
        assert_eq!(catalog.intern("a"), 0);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1), Some("b"));
        assert_eq!(catalog.ordinal_of("b"), Some(1));
        assert_eq!(catalog.ordinal_of("c"), None);
    }

    #[test]
    fn test_build_catalog_first_seen_order() {
        let (catalog, lists) = build_catalog(&["ab", "ba"]);
        assert_eq!(catalog.clusters(), &["a".to_string(), "b".to_string()]);
        assert_eq!(lists, vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn test_build_catalog_empty_phrase() {
        let (catalog, lists) = build_catalog(&["", "x", ""]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(lists, vec![vec![], vec![0], vec![]]);
    }
}
