use crate::dom::Document;

/// Simple element filter: tag name, ID, class and attribute presence
///
/// All set conditions must hold. Tag names compare case-insensitively; IDs, classes and
/// attribute names compare exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub tag: Option<&'a str>,
    pub id: Option<&'a str>,
    pub class: Option<&'a str>,
    pub attribute: Option<&'a str>,
}

impl<'a> Query<'a> {
    /// Query matching every element
    pub fn any() -> Self {
        Self::default()
    }

    /// Query matching a tag name
    pub fn tag(tag: &'a str) -> Self {
        Self {
            tag: Some(tag),
            ..Self::default()
        }
    }

    /// Builder method: require an ID
    pub fn with_id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder method: require a class
    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Builder method: require an attribute to be present
    pub fn with_attribute(mut self, name: &'a str) -> Self {
        self.attribute = Some(name);
        self
    }

    /// Check a single element against the query
    pub fn matches<D: Document>(&self, doc: &D, node: D::Node) -> bool {
        if let Some(tag) = self.tag {
            if !doc.is_tag(node, tag) {
                return false;
            }
        }
        if let Some(id) = self.id {
            if doc.id(node) != Some(id) {
                return false;
            }
        }
        if let Some(class) = self.class {
            if !doc.has_class(node, class) {
                return false;
            }
        }
        if let Some(name) = self.attribute {
            if doc.attribute(node, name).is_none() {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomTree;

    #[test]
    fn test_query_filters() {
        let mut tree = DomTree::new("body");
        let root = tree.root();
        let link = tree.append_element(root, "a");
        tree.set_attribute(link, "href", "/one");
        tree.set_attribute(link, "class", "nav primary");
        let anchor = tree.append_element(root, "A");
        tree.set_attribute(anchor, "id", "top");

        assert_eq!(tree.query_all(root, &Query::tag("a"), true), vec![link, anchor]);
        assert_eq!(tree.query_all(root, &Query::tag("a").with_attribute("href"), true), vec![link]);
        assert_eq!(tree.query_all(root, &Query::any().with_class("primary"), true), vec![link]);
        assert_eq!(tree.query_all(root, &Query::any().with_id("top"), true), vec![anchor]);
        assert!(tree.query_all(root, &Query::any().with_class("prim"), true).is_empty());
    }

    #[test]
    fn test_query_recursive_flag() {
        let mut tree = DomTree::new("body");
        let root = tree.root();
        let outer = tree.append_element(root, "div");
        let inner = tree.append_element(outer, "div");

        assert_eq!(tree.query_all(root, &Query::tag("div"), true), vec![outer, inner]);
        assert_eq!(tree.query_all(root, &Query::tag("div"), false), vec![outer]);
    }
}
