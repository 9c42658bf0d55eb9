use crate::dom::Document;
use crate::error::Result;
use crate::probe::{Finder, ProbeContext};
use crate::similarity::rank;

const PROMPT: &str = "Please choose heading: ";

/// Headings `h1` through `h{max_level}` under `root`, grouped by level, in document order
/// within a level. Headings without text are skipped.
pub fn headings<D: Document>(doc: &D, root: D::Node, max_level: u8) -> Vec<D::Node> {
    let descendants = doc.descendants(root);
    let mut found = Vec::new();

    for level in 1..=max_level.clamp(1, 6) {
        let tag = format!("h{level}");
        for &node in &descendants {
            if doc.is_tag(node, &tag) && !doc.text(node).is_empty() {
                found.push(node);
            }
        }
    }

    found
}

/// Let the chooser pick a heading, most typical wording first
///
/// Titles tend to recur across a page with near-identical text, so candidates are ranked
/// by [`rank`] and shown as `"text": "selector"`.
pub fn pick_heading<D: Document>(context: &mut ProbeContext<'_, D>) -> Result<Option<D::Node>> {
    let candidates = headings(context.document, context.root, context.options.max_heading_level);
    if candidates.is_empty() {
        log::warn!("No headings found under {}", context.document.describe(context.root));
        return Ok(None);
    }

    let texts: Vec<String> = candidates.iter().map(|&node| context.document.text(node)).collect();
    let order = rank(&texts);

    let mut items = Vec::with_capacity(order.len());
    for &index in &order {
        let selector = context.selector(candidates[index])?;
        items.push(format!("{:?}: {:?}", texts[index], selector));
    }

    let choice = context.choose_one(PROMPT, &items)?;
    Ok(Some(candidates[order[choice]]))
}

/// Finder for page and chapter titles
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingFinder;

impl<D: Document> Finder<D> for HeadingFinder {
    fn name(&self) -> &str {
        "heading"
    }

    fn find(&self, context: &mut ProbeContext<'_, D>) -> Result<Option<D::Node>> {
        pick_heading(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeOptions;
    use crate::dom::{DomTree, ElementNode};
    use crate::probe::ScriptedChooser;

    fn page() -> DomTree {
        DomTree::from_element(
            &ElementNode::new("body")
                .with_child(ElementNode::new("h2").with_text("Sidebar"))
                .with_child(ElementNode::new("h1").with_class("title").with_text("Chapter 3: Rain"))
                .with_child(ElementNode::new("h3"))
                .with_child(ElementNode::new("h2").with_text("Chapter 4: Snow")),
        )
    }

    #[test]
    fn test_headings_level_order() {
        let tree = page();
        let texts: Vec<String> = headings(&tree, tree.root(), 6)
            .into_iter()
            .map(|node| tree.text(node))
            .collect();

        assert_eq!(texts, vec!["Chapter 3: Rain", "Sidebar", "Chapter 4: Snow"]);
        assert_eq!(headings(&tree, tree.root(), 1).len(), 1);
    }

    #[test]
    fn test_pick_heading_ranked_items() {
        let tree = page();
        let options = ProbeOptions::default();
        let mut chooser = ScriptedChooser::new(["1"]);

        let picked = {
            let mut context = ProbeContext::new(&tree, tree.root(), &mut chooser, &options);
            pick_heading(&mut context).unwrap().unwrap()
        };

        let presented = &chooser.presented[0];
        assert_eq!(presented.len(), 3);
        // The two chapter titles resemble each other more than the sidebar label
        assert!(presented[0].starts_with("\"Chapter"));
        assert!(presented[2].starts_with("\"Sidebar\""));
        assert!(presented.contains(&"\"Chapter 3: Rain\": \".title\"".to_string()));
        assert!(tree.text(picked).starts_with("Chapter"));
    }

    #[test]
    fn test_pick_heading_without_headings() {
        let tree = DomTree::new("body");
        let options = ProbeOptions::default();
        let mut chooser = ScriptedChooser::new(["1"]);
        let mut context = ProbeContext::new(&tree, tree.root(), &mut chooser, &options);

        assert_eq!(pick_heading(&mut context).unwrap(), None);
    }
}
