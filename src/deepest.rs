//! Deepest-match search
//!
//! Content-region discovery wants the smallest element that still contains an identifying
//! snippet. Descending only into matching elements, while keeping siblings queued at every
//! level, avoids settling on the first matching ancestor (usually the whole page body).

use crate::dom::Document;
use std::collections::VecDeque;

/// Most specific element under `root` whose rendered text satisfies `predicate`
///
/// Candidates are visited in queue order starting with root's direct children. A match
/// is recorded and its children are queued; a miss prunes its subtree. The last recorded
/// match wins. The predicate sees the text as rendered; any case folding is up to it.
pub fn find_deepest_match<D, P>(doc: &D, root: D::Node, mut predicate: P) -> Option<D::Node>
where
    D: Document,
    P: FnMut(&str) -> bool,
{
    let mut queue: VecDeque<D::Node> = doc.children(root).iter().copied().collect();
    let mut last_match = None;

    while let Some(node) = queue.pop_front() {
        if predicate(&doc.text(node)) {
            last_match = Some(node);
            queue.extend(doc.children(node).iter().copied());
        }
    }

    if let Some(node) = last_match {
        log::debug!("Deepest match is {}", doc.describe(node));
    }
    last_match
}

/// Predicate matching text that contains every excerpt
///
/// With `case_insensitive`, both excerpts and text are lowercased before comparing.
pub fn contains_all<'a>(excerpts: &'a [String], case_insensitive: bool) -> impl FnMut(&str) -> bool + 'a {
    let needles: Vec<String> = excerpts
        .iter()
        .map(|excerpt| {
            if case_insensitive {
                excerpt.to_lowercase()
            } else {
                excerpt.clone()
            }
        })
        .collect();

    move |text: &str| {
        if case_insensitive {
            let text = text.to_lowercase();
            needles.iter().all(|needle| text.contains(needle.as_str()))
        } else {
            needles.iter().all(|needle| text.contains(needle.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomTree, ElementNode, NodeId};

    fn find_tag(tree: &DomTree, tag: &str) -> NodeId {
        tree.descendants(tree.root())
            .into_iter()
            .find(|&node| tree.is_tag(node, tag))
            .unwrap()
    }

    #[test]
    fn test_leaf_match() {
        let root = ElementNode::new("body").with_child(
            ElementNode::new("div")
                .with_child(ElementNode::new("nav").with_text("menu"))
                .with_child(ElementNode::new("article").with_text("begin story end")),
        );
        let tree = DomTree::from_element(&root);

        let found = find_deepest_match(&tree, tree.root(), |text| text.contains("begin") && text.contains("end"));
        assert_eq!(found, Some(find_tag(&tree, "article")));
    }

    #[test]
    fn test_ancestor_match_when_split_across_children() {
        let root = ElementNode::new("body").with_child(
            ElementNode::new("section")
                .with_child(ElementNode::new("p").with_text("begin"))
                .with_child(ElementNode::new("p").with_text("end")),
        );
        let tree = DomTree::from_element(&root);

        let found = find_deepest_match(&tree, tree.root(), |text| text.contains("begin") && text.contains("end"));
        assert_eq!(found, Some(find_tag(&tree, "section")));
    }

    #[test]
    fn test_no_match() {
        let mut tree = DomTree::new("body");
        assert_eq!(find_deepest_match(&tree, tree.root(), |_| true), None);

        let p = tree.append_element(tree.root(), "p");
        tree.append_text(p, "hello");
        assert_eq!(find_deepest_match(&tree, tree.root(), |text| text.contains("bye")), None);
        assert_eq!(find_deepest_match(&tree, tree.root(), |_| true), Some(p));
    }

    #[test]
    fn test_last_match_in_queue_order() {
        // Both siblings match; the later one's subtree is explored last
        let root = ElementNode::new("body")
            .with_child(ElementNode::new("div").with_child(ElementNode::new("p").with_text("x")))
            .with_child(ElementNode::new("aside").with_text("x"));
        let tree = DomTree::from_element(&root);

        let found = find_deepest_match(&tree, tree.root(), |text| text.contains('x'));
        assert_eq!(found, Some(find_tag(&tree, "p")));
    }

    #[test]
    fn test_predicate_sees_original_case() {
        let root = ElementNode::new("body").with_child(ElementNode::new("p").with_text("Begin END"));
        let tree = DomTree::from_element(&root);

        assert_eq!(find_deepest_match(&tree, tree.root(), |text| text.contains("begin")), None);

        let excerpts = vec!["begin".to_string(), "end".to_string()];
        let found = find_deepest_match(&tree, tree.root(), contains_all(&excerpts, true));
        assert_eq!(found, Some(find_tag(&tree, "p")));
        assert_eq!(find_deepest_match(&tree, tree.root(), contains_all(&excerpts, false)), None);
    }
}
