use crate::dom::{Document, Query};
use crate::error::Result;
use crate::probe::{Finder, ProbeContext};

const PROMPT: &str = "Select a number of links to be included: ";

/// Smallest element holding every node of `picks`
///
/// Climbs from the first pick's parent until all picks lie inside, never above `root`.
pub fn enclosing_container<D: Document>(doc: &D, root: D::Node, picks: &[D::Node]) -> D::Node {
    let Some(&first) = picks.first() else {
        return root;
    };

    let mut container = doc.parent(first).unwrap_or(root);
    while container != root && !picks.iter().all(|&pick| doc.contains(container, pick)) {
        container = doc.parent(container).unwrap_or(root);
    }
    container
}

/// Let the chooser pick some links, returning the container that holds all of them
pub fn pick_links<D: Document>(context: &mut ProbeContext<'_, D>) -> Result<Option<D::Node>> {
    let doc = context.document;
    let links = doc.query_all(context.root, &Query::tag("a").with_attribute("href"), true);
    if links.is_empty() {
        log::warn!("No links found under {}", doc.describe(context.root));
        return Ok(None);
    }

    let items: Vec<String> = links.iter().map(|&link| format!("{:?}", doc.text(link))).collect();
    let picks: Vec<D::Node> = context
        .choose_many(PROMPT, &items)?
        .into_iter()
        .map(|index| links[index])
        .collect();

    let container = enclosing_container(doc, context.root, &picks);
    log::debug!("{} picked links live in {}", picks.len(), doc.describe(container));
    Ok(Some(container))
}

/// Finder for the table of contents link list
#[derive(Debug, Clone, Copy, Default)]
pub struct LinksFinder;

impl<D: Document> Finder<D> for LinksFinder {
    fn name(&self) -> &str {
        "links"
    }

    fn find(&self, context: &mut ProbeContext<'_, D>) -> Result<Option<D::Node>> {
        pick_links(context)
    }
}
