use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Owned, nested description of an element and its subtree
///
/// This is the serde-friendly way to hand a tree to [`DomTree::from_element`]
/// (for instance from JSON produced by another tool). The element's own text is
/// treated as preceding its children.
///
/// [`DomTree::from_element`]: crate::dom::DomTree::from_element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "h1", "a")
    pub tag_name: String,

    /// Element attributes (e.g., id, class, href), in source order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Text content of the element itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            text_content: None,
            children: Vec::new(),
        }
    }

    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder method: set the id attribute
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attribute("id", id)
    }

    /// Builder method: set the class attribute
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attribute("class", class)
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Builder method: append a child
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let element = ElementNode::new("h1")
            .with_id("title")
            .with_class("heading main")
            .with_text("Chapter One")
            .with_child(ElementNode::new("small"));

        assert_eq!(element.tag_name, "h1");
        assert_eq!(element.attributes.get("id").map(String::as_str), Some("title"));
        assert_eq!(element.attributes.get("class").map(String::as_str), Some("heading main"));
        assert_eq!(element.text_content.as_deref(), Some("Chapter One"));
        assert_eq!(element.children, vec![ElementNode::new("small")]);
    }

    #[test]
    fn test_with_attribute_overwrites() {
        let element = ElementNode::new("div").with_class("a").with_id("x").with_class("b");

        let pairs: Vec<_> = element.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("class", "b"), ("id", "x")]);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"tag_name": "ul", "children": [{"tag_name": "li", "text_content": "one"}]}"#;
        let element: ElementNode = serde_json::from_str(json).unwrap();

        assert!(element.attributes.is_empty());
        assert_eq!(element.children.len(), 1);
        assert_eq!(element.children[0].text_content.as_deref(), Some("one"));
    }

    #[test]
    fn test_attribute_order_preserved() {
        let element = ElementNode::new("a")
            .with_attribute("href", "/x")
            .with_attribute("class", "b a")
            .with_attribute("id", "c");

        let keys: Vec<_> = element.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["href", "class", "id"]);
    }
}
