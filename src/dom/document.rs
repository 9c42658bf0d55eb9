use crate::dom::query::Query;
use std::fmt::Debug;
use std::hash::Hash;

/// Read-only view of a document tree
///
/// This is the capability set selector synthesis, ranking and the deepest-match search
/// depend on. [`DomTree`](crate::dom::DomTree) implements it; any other parsed tree can
/// implement it as well, as long as parent links and children agree with each other.
pub trait Document {
    /// Cheap, copyable handle to one element of the tree
    type Node: Copy + Eq + Hash + Debug;

    /// Tag name of an element (e.g. "div", "h1")
    fn tag_name(&self, node: Self::Node) -> &str;

    /// Raw attribute value
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Parent element, `None` for the top of the tree
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Direct element children in document order
    fn children(&self, node: Self::Node) -> &[Self::Node];

    /// Rendered text of the subtree: whitespace runs collapsed, text segments joined by a
    /// single space
    fn text(&self, node: Self::Node) -> String;

    /// Mutation counter. Trees that never change can keep the default.
    fn generation(&self) -> u64 {
        0
    }

    /// Short human-readable description of a node, used in error messages
    fn describe(&self, node: Self::Node) -> String {
        format!("<{}> ({:?})", self.tag_name(node), node)
    }

    /// Element ID, ignoring empty `id=""` attributes
    fn id(&self, node: Self::Node) -> Option<&str> {
        self.attribute(node, "id").filter(|id| !id.is_empty())
    }

    /// Classes in declaration order
    fn classes(&self, node: Self::Node) -> impl Iterator<Item = &str> {
        self.attribute(node, "class").unwrap_or_default().split_whitespace()
    }

    /// Check if element has a specific class
    fn has_class(&self, node: Self::Node, class_name: &str) -> bool {
        self.classes(node).any(|c| c == class_name)
    }

    /// Check if element is a specific tag
    fn is_tag(&self, node: Self::Node, tag: &str) -> bool {
        self.tag_name(node).eq_ignore_ascii_case(tag)
    }

    /// 1-based position among siblings sharing the same tag name (`:nth-of-type` index)
    fn position_of_type(&self, node: Self::Node) -> usize {
        let Some(parent) = self.parent(node) else {
            return 1;
        };
        let tag = self.tag_name(node);
        let mut position = 0;
        for &sibling in self.children(parent) {
            if self.is_tag(sibling, tag) {
                position += 1;
            }
            if sibling == node {
                break;
            }
        }
        position
    }

    /// All descendants of `node` in document order, excluding `node` itself
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Elements searched by a query in `scope`: the whole subtree when `recursive`,
    /// otherwise only direct children
    fn elements(&self, scope: Self::Node, recursive: bool) -> Vec<Self::Node> {
        if recursive {
            self.descendants(scope)
        } else {
            self.children(scope).to_vec()
        }
    }

    /// Elements under `scope` matching `query`, in document order
    fn query_all(&self, scope: Self::Node, query: &Query<'_>, recursive: bool) -> Vec<Self::Node>
    where
        Self: Sized,
    {
        self.elements(scope, recursive)
            .into_iter()
            .filter(|&node| query.matches(self, node))
            .collect()
    }

    /// Whether `node` lies strictly inside the subtree of `ancestor`
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut current = self.parent(node);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }
}
