//! Document tree module
//!
//! This module provides the tree the selector engine works on. It includes:
//! - Document: the read-only capability set the algorithms depend on
//! - DomTree: arena-backed implementation with parent links and interleaved text
//! - ElementNode: owned, serializable description of an element subtree
//! - Query: tag/id/class/attribute filters evaluated against a scope

pub mod document;
pub mod element;
pub mod query;
pub mod tree;

pub use document::Document;
pub use element::ElementNode;
pub use query::Query;
pub use tree::{DomTree, NodeId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_export() {
        let element = ElementNode::new("div");
        assert_eq!(element.tag_name, "div");
    }

    #[test]
    fn test_dom_tree_export() {
        let tree = DomTree::from_element(&ElementNode::new("body"));
        assert_eq!(tree.tag_name(tree.root()), "body");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_query_export() {
        assert_eq!(Query::tag("a").tag, Some("a"));
    }
}
