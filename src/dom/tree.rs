use crate::dom::Document;
use crate::dom::element::ElementNode;
use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tags whose text never shows up in rendered output
#[cfg(feature = "html")]
const NON_RENDERED_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Handle to an element stored in a [`DomTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the tree's arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

#[derive(Debug, Clone)]
enum Content {
    Element(NodeId),
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    tag_name: String,
    attributes: IndexMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    content: Vec<Content>,
}

impl NodeData {
    fn new(tag_name: String, parent: Option<NodeId>) -> Self {
        Self {
            tag_name,
            attributes: IndexMap::new(),
            parent,
            children: Vec::new(),
            content: Vec::new(),
        }
    }
}

/// Arena-backed element tree
///
/// Elements are addressed by [`NodeId`]. Text is kept interleaved with child elements so
/// [`Document::text`] renders segments in document order. Every mutation bumps
/// [`Document::generation`], which is what selector caches key their validity on.
///
/// Methods taking a [`NodeId`] panic if the handle does not belong to this tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<NodeData>,
    generation: u64,
}

impl DomTree {
    /// Create a tree holding a single root element
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData::new(root_tag.into(), None)],
            generation: 0,
        }
    }

    /// Root element of the tree
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of elements in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All element handles, root first
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Append a new element as the last child of `parent`
    pub fn append_element(&mut self, parent: NodeId, tag_name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(tag_name.into(), Some(parent)));
        let parent_data = &mut self.nodes[parent.0];
        parent_data.children.push(id);
        parent_data.content.push(Content::Element(id));
        self.generation += 1;
        id
    }

    /// Append a text segment after the current last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) {
        self.nodes[parent.0].content.push(Content::Text(text.into()));
        self.generation += 1;
    }

    /// Set or replace an attribute
    pub fn set_attribute(&mut self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
        self.nodes[node.0].attributes.insert(name.into(), value.into());
        self.generation += 1;
    }

    /// Attributes of an element in source order
    pub fn attributes(&self, node: NodeId) -> &IndexMap<String, String> {
        &self.nodes[node.0].attributes
    }

    /// Build a tree from a nested [`ElementNode`]
    pub fn from_element(root: &ElementNode) -> Self {
        let mut tree = Self::new(root.tag_name.clone());
        let mut stack = vec![(root, tree.root())];

        while let Some((element, id)) = stack.pop() {
            for (name, value) in &element.attributes {
                tree.set_attribute(id, name.clone(), value.clone());
            }
            if let Some(text) = &element.text_content {
                tree.append_text(id, text.clone());
            }
            for child in &element.children {
                let child_id = tree.append_element(id, child.tag_name.clone());
                stack.push((child, child_id));
            }
        }

        tree
    }

    /// Build a tree from the JSON form of an [`ElementNode`]
    pub fn from_json(json: &str) -> Result<Self> {
        let root: ElementNode = serde_json::from_str(json)?;
        Ok(Self::from_element(&root))
    }

    /// Parse an HTML document
    #[cfg(feature = "html")]
    pub fn from_html(html: &str) -> Self {
        Self::from_scraper(&scraper::Html::parse_document(html))
    }

    /// Copy an already parsed `scraper` document, rooted at its `<html>` element
    ///
    /// Every element is kept, so `:nth-of-type` positions agree with the source
    /// document. Text inside script, style and similar elements is dropped.
    #[cfg(feature = "html")]
    pub fn from_scraper(document: &scraper::Html) -> Self {
        let html = document.root_element();
        let mut tree = Self::new(html.value().name());
        for (name, value) in html.value().attrs() {
            tree.set_attribute(tree.root(), name, value);
        }

        let mut stack = vec![(html, tree.root())];
        while let Some((element, id)) = stack.pop() {
            let rendered = !NON_RENDERED_TAGS.contains(&element.value().name());
            for child in element.children() {
                match child.value() {
                    scraper::Node::Element(data) => {
                        let child_id = tree.append_element(id, data.name());
                        for (name, value) in data.attrs() {
                            tree.set_attribute(child_id, name, value);
                        }
                        if let Some(child_element) = scraper::ElementRef::wrap(child) {
                            stack.push((child_element, child_id));
                        }
                    }
                    scraper::Node::Text(text) if rendered => {
                        tree.append_text(id, &**text);
                    }
                    _ => {}
                }
            }
        }

        log::debug!("Copied {} elements from parsed HTML", tree.len());
        tree
    }

    fn collect_text(&self, node: NodeId, words: &mut Vec<String>) {
        for content in &self.nodes[node.0].content {
            match content {
                Content::Text(text) => words.extend(text.split_whitespace().map(str::to_string)),
                Content::Element(child) => self.collect_text(*child, words),
            }
        }
    }
}

impl Document for DomTree {
    type Node = NodeId;

    fn tag_name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag_name
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attributes.get(name).map(String::as_str)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|data| data.parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    fn text(&self, node: NodeId) -> String {
        let mut words = Vec::new();
        self.collect_text(node, &mut words);
        words.join(" ")
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn describe(&self, node: NodeId) -> String {
        let Some(data) = self.nodes.get(node.0) else {
            return format!("<?> ({node}, not in this tree)");
        };
        let mut out = format!("<{}", data.tag_name);
        if let Some(id) = data.attributes.get("id") {
            out.push_str(&format!(" id=\"{id}\""));
        }
        if let Some(class) = data.attributes.get("class") {
            out.push_str(&format!(" class=\"{class}\""));
        }
        out.push_str(&format!("> ({node})"));
        out
    }
}
