//! Interactive selector discovery
//!
//! A probe walks a table-of-contents page and a chapter page, asks a [`Chooser`] to pick
//! among ranked candidates, and records one selector per finder:
//! - `heading`: a heading, candidates ranked by text similarity
//! - `links`: the smallest container holding a chosen set of links
//! - `content`: the deepest element containing a beginning and ending excerpt

pub mod chooser;
pub mod content;
pub mod heading;
pub mod links;

pub use chooser::{Chooser, ConsoleChooser, ScriptedChooser, parse_selection};
pub use content::ContentFinder;
pub use heading::{HeadingFinder, headings};
pub use links::{LinksFinder, enclosing_container};

use crate::config::ProbeOptions;
use crate::dom::{Document, DomTree};
use crate::error::{Result, SelectorError};
use crate::selector::SelectorCache;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A step of the probe that locates one element of interest
pub trait Finder<D: Document> {
    /// Name used as the report key suffix
    fn name(&self) -> &str;

    /// Locate the element, `Ok(None)` if the page offers nothing to pick
    fn find(&self, context: &mut ProbeContext<'_, D>) -> Result<Option<D::Node>>;
}

/// Everything a finder needs while probing one page
pub struct ProbeContext<'a, D: Document> {
    pub document: &'a D,
    pub root: D::Node,
    pub chooser: &'a mut dyn Chooser,
    pub options: &'a ProbeOptions,
    cache: SelectorCache<D::Node>,
}

impl<'a, D: Document> ProbeContext<'a, D> {
    pub fn new(document: &'a D, root: D::Node, chooser: &'a mut dyn Chooser, options: &'a ProbeOptions) -> Self {
        Self {
            document,
            root,
            chooser,
            options,
            cache: SelectorCache::with_options(options.synthesis),
        }
    }

    /// Selector for `node` relative to the page root, memoized per page
    pub fn selector(&mut self, node: D::Node) -> Result<String> {
        self.cache.get_or_synthesize(self.document, self.root, node)
    }

    /// Let the chooser pick several items, every index checked against `items`
    pub fn choose_many(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>> {
        if items.is_empty() {
            return Err(SelectorError::NoCandidates(prompt.trim().to_string()));
        }
        let indices = self.chooser.choose(prompt, items)?;
        if indices.is_empty() {
            return Err(SelectorError::EmptySelection);
        }
        if let Some(&bad) = indices.iter().find(|&&index| index >= items.len()) {
            return Err(SelectorError::InvalidSelection {
                input: (bad + 1).to_string(),
                count: items.len(),
            });
        }
        Ok(indices)
    }

    /// Let the chooser pick one item; extra picks are ignored
    pub fn choose_one(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        Ok(self.choose_many(prompt, items)?[0])
    }
}

/// One page handed to a probe
pub struct Page<'a, D: Document> {
    pub document: &'a D,
    pub root: D::Node,
}

impl<'a, D: Document> Page<'a, D> {
    pub fn new(document: &'a D, root: D::Node) -> Self {
        Self { document, root }
    }
}

impl<'a> Page<'a, DomTree> {
    /// The whole tree, rooted at its top element
    pub fn whole(tree: &'a DomTree) -> Self {
        Self::new(tree, tree.root())
    }
}

/// Selectors found by a probe, keyed `<page>_<finder>` in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorReport {
    pub selectors: IndexMap<String, Option<String>>,
}

impl SelectorReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector recorded under `key`, if the finder located anything
    pub fn get(&self, key: &str) -> Option<&str> {
        self.selectors.get(key).and_then(|selector| selector.as_deref())
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs finders over pages and collects their selectors
pub struct Probe<C: Chooser> {
    chooser: C,
    options: ProbeOptions,
}

impl<C: Chooser> Probe<C> {
    pub fn new(chooser: C, options: ProbeOptions) -> Self {
        Self { chooser, options }
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Give the chooser back
    pub fn into_chooser(self) -> C {
        self.chooser
    }

    /// Run `finders` over one page, recording each result as `<page_name>_<finder>`
    pub fn probe_page<D: Document>(
        &mut self,
        page_name: &str,
        page: &Page<'_, D>,
        finders: &[&dyn Finder<D>],
        report: &mut SelectorReport,
    ) -> Result<()> {
        let mut context = ProbeContext::new(page.document, page.root, &mut self.chooser, &self.options);

        for finder in finders {
            let key = format!("{page_name}_{}", finder.name());
            let selector = match finder.find(&mut context)? {
                Some(node) => Some(context.selector(node)?),
                None => None,
            };
            log::info!("{key}: {selector:?}");
            report.selectors.insert(key, selector);
        }

        Ok(())
    }

    /// Probe a table-of-contents page (heading and link list) and optionally a chapter
    /// page (heading and content)
    pub fn run<D: Document>(&mut self, toc: &Page<'_, D>, chapter: Option<&Page<'_, D>>) -> Result<SelectorReport> {
        let mut report = SelectorReport::new();

        let toc_finders: [&dyn Finder<D>; 2] = [&HeadingFinder, &LinksFinder];
        self.probe_page("toc", toc, &toc_finders, &mut report)?;

        if let Some(chapter) = chapter {
            let chapter_finders: [&dyn Finder<D>; 2] = [&HeadingFinder, &ContentFinder];
            self.probe_page("chapter", chapter, &chapter_finders, &mut report)?;
        }

        Ok(report)
    }
}

/// Probe a whole [`DomTree`] pair with default finders
pub fn probe_trees<C: Chooser>(
    chooser: C,
    options: ProbeOptions,
    toc: &DomTree,
    chapter: Option<&DomTree>,
) -> Result<SelectorReport> {
    let chapter = chapter.map(Page::whole);
    Probe::new(chooser, options).run(&Page::whole(toc), chapter.as_ref())
}

/// Run a single finder over a page, returning the located node instead of its selector
pub fn locate<D: Document, F: Finder<D>>(
    finder: &F,
    page: &Page<'_, D>,
    chooser: &mut dyn Chooser,
    options: &ProbeOptions,
) -> Result<Option<D::Node>> {
    let mut context = ProbeContext::new(page.document, page.root, chooser, options);
    finder.find(&mut context)
}
