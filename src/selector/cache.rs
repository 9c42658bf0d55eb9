use crate::config::SynthesisOptions;
use crate::dom::Document;
use crate::error::Result;
use crate::selector::synth::Synthesizer;
use indexmap::IndexMap;
use std::hash::Hash;

/// Memoized selector strings keyed by `(root, target)`
///
/// Synthesis is a pure function of the tree and the node pair, so results stay valid until
/// the tree mutates. The cache remembers the [`Document::generation`] its entries were
/// computed at and drops everything when it sees a different one.
/// Uses IndexMap to preserve insertion order
#[derive(Debug, Clone)]
pub struct SelectorCache<N> {
    /// Map from (root, target) to rendered selector
    map: IndexMap<(N, N), String>,

    /// Tree generation the entries belong to
    generation: Option<u64>,

    options: SynthesisOptions,
}

impl<N: Copy + Eq + Hash> Default for SelectorCache<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy + Eq + Hash> SelectorCache<N> {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::with_options(SynthesisOptions::default())
    }

    /// Create a cache that synthesizes with the given options
    pub fn with_options(options: SynthesisOptions) -> Self {
        Self {
            map: IndexMap::new(),
            generation: None,
            options,
        }
    }

    /// Cached selector string, synthesizing and storing it on a miss
    pub fn get_or_synthesize<D>(&mut self, doc: &D, root: N, target: N) -> Result<String>
    where
        D: Document<Node = N>,
    {
        self.sync_generation(doc.generation());

        if let Some(selector) = self.map.get(&(root, target)) {
            return Ok(selector.clone());
        }

        let selector = Synthesizer::with_options(doc, self.options)
            .synthesize(root, target)?
            .to_string();
        self.map.insert((root, target), selector.clone());
        Ok(selector)
    }

    /// Cached selector string if it is still valid for `doc`
    pub fn get<D>(&self, doc: &D, root: N, target: N) -> Option<&str>
    where
        D: Document<Node = N>,
    {
        if self.generation != Some(doc.generation()) {
            return None;
        }
        self.map.get(&(root, target)).map(String::as_str)
    }

    /// Drop all entries
    pub fn invalidate(&mut self) {
        self.map.clear();
        self.generation = None;
    }

    /// Get the number of cached selectors
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all ((root, target), selector) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&(N, N), &String)> {
        self.map.iter()
    }

    fn sync_generation(&mut self, generation: u64) {
        if self.generation != Some(generation) {
            if !self.map.is_empty() {
                log::debug!("Tree changed, dropping {} cached selectors", self.map.len());
            }
            self.map.clear();
            self.generation = Some(generation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomTree, NodeId};

    fn two_paragraphs() -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new("div");
        let root = tree.root();
        let p1 = tree.append_element(root, "p");
        let p2 = tree.append_element(root, "p");
        (tree, p1, p2)
    }

    #[test]
    fn test_cache_hit() {
        let (tree, _, p2) = two_paragraphs();
        let mut cache = SelectorCache::new();

        let first = cache.get_or_synthesize(&tree, tree.root(), p2).unwrap();
        assert_eq!(first, "p:nth-of-type(2)");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&tree, tree.root(), p2), Some("p:nth-of-type(2)"));

        let second = cache.get_or_synthesize(&tree, tree.root(), p2).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_invalidated_by_mutation() {
        let (mut tree, _, p2) = two_paragraphs();
        let mut cache = SelectorCache::new();
        let root = tree.root();

        assert_eq!(cache.get_or_synthesize(&tree, root, p2).unwrap(), "p:nth-of-type(2)");

        tree.set_attribute(p2, "id", "second");
        assert_eq!(cache.get(&tree, root, p2), None);
        assert_eq!(cache.get_or_synthesize(&tree, root, p2).unwrap(), "#second");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_errors_not_stored() {
        let (tree, p1, p2) = two_paragraphs();
        let mut cache = SelectorCache::new();

        assert!(cache.get_or_synthesize(&tree, p1, p2).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_and_iteration() {
        let (tree, p1, p2) = two_paragraphs();
        let mut cache = SelectorCache::new();
        let root = tree.root();

        cache.get_or_synthesize(&tree, root, p1).unwrap();
        cache.get_or_synthesize(&tree, root, p2).unwrap();
        let selectors: Vec<_> = cache.iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(selectors, vec!["p:nth-of-type(1)", "p:nth-of-type(2)"]);

        cache.invalidate();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&tree, root, p1), None);
    }
}
