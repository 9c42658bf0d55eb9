use crate::config::SynthesisOptions;
use crate::dom::Document;
use crate::error::{Result, SelectorError};
use crate::selector::chain::{SelectorChain, resolve_steps};
use crate::selector::step::{ChainStep, Combinator, SelectorStep};

/// Best single-level selector for `node` inside `scope`
///
/// Tries, in order: `#id`, `tag#id`, then `.class` / `tag.class` for each class in
/// declaration order, then the bare tag, and finally falls back to
/// `tag:nth-of-type(n)`. Uniqueness is checked against `scope` only: its whole
/// subtree when `recursive`, its direct children otherwise.
pub fn best_selector<D: Document>(doc: &D, scope: D::Node, node: D::Node, recursive: bool) -> SelectorStep {
    let tag = doc.tag_name(node);

    if let Some(id) = doc.id(node) {
        for candidate in [SelectorStep::id(None, id), SelectorStep::id(Some(tag), id)] {
            if candidate.is_unique(doc, scope, recursive) {
                return candidate;
            }
        }
    }

    for class in doc.classes(node) {
        for candidate in [SelectorStep::class(None, class), SelectorStep::class(Some(tag), class)] {
            if candidate.is_unique(doc, scope, recursive) {
                return candidate;
            }
        }
    }

    let candidate = SelectorStep::tag(tag);
    if candidate.is_unique(doc, scope, recursive) {
        return candidate;
    }

    SelectorStep::nth_of_type(tag, doc.position_of_type(node))
}

/// Synthesize a selector chain from `root` to `target` with default options
pub fn synthesize<D: Document>(doc: &D, root: D::Node, target: D::Node) -> Result<SelectorChain> {
    Synthesizer::new(doc).synthesize(root, target)
}

/// Selector synthesis over one document
pub struct Synthesizer<'d, D: Document> {
    doc: &'d D,
    options: SynthesisOptions,
}

impl<'d, D: Document> Synthesizer<'d, D> {
    pub fn new(doc: &'d D) -> Self {
        Self::with_options(doc, SynthesisOptions::default())
    }

    pub fn with_options(doc: &'d D, options: SynthesisOptions) -> Self {
        Self { doc, options }
    }

    /// Build a chain that resolves to exactly `target` when evaluated against `root`
    ///
    /// Walks the ancestors of `target` from nearest to farthest looking for one with a
    /// non-positional selector unique under the current scope. That ancestor becomes the
    /// new scope. When no ancestor qualifies, scope moves one level down the path with a
    /// direct-child selector joined by the descendant combinator. Each round strictly
    /// shortens the remaining path.
    ///
    /// Only when the finished chain still matches more than the target are some of those
    /// descent steps switched to the child combinator (`>`), latest first.
    pub fn synthesize(&self, root: D::Node, target: D::Node) -> Result<SelectorChain> {
        let path = self.ancestor_path(root, target)?;
        let mut steps = Vec::new();
        // Positions of the combinators in front of descent steps
        let mut descents = Vec::new();

        // path[0] is the target, path[scope] the current scope
        let mut scope = path.len() - 1;
        while scope > 0 {
            let scope_node = path[scope];

            let anchor = (1..scope).find_map(|i| {
                let step = best_selector(self.doc, scope_node, path[i], true);
                (!step.is_fragile()).then_some((i, step))
            });

            if let Some((i, step)) = anchor {
                log::trace!("Anchored on {} via '{}'", self.doc.describe(path[i]), step);
                steps.push(ChainStep::Select(step));
                scope = i;
                continue;
            }

            let child = path[scope - 1];
            let step = best_selector(self.doc, scope_node, child, false);
            log::trace!("Descending to {} via '{}'", self.doc.describe(child), step);
            descents.push(steps.len());
            steps.push(ChainStep::Combinator(Combinator::Descendant));
            steps.push(ChainStep::Select(step));
            scope -= 1;
        }

        self.tighten(&mut steps, &descents, root, target);
        let chain = SelectorChain::from_steps(steps);

        if self.options.verify {
            let matches = chain.resolve(self.doc, root);
            if matches != [target] {
                return Err(SelectorError::Ambiguous {
                    selector: chain.to_string(),
                    matches: matches.len(),
                });
            }
        }

        log::debug!("Synthesized '{}' for {}", chain, self.doc.describe(target));
        Ok(chain)
    }

    /// Switch descent combinators to `>` until `steps` resolves to exactly `target`, then
    /// undo every switch that turns out not to be needed
    ///
    /// With every descent step on `>` each step matches exactly one path node, so the
    /// first loop always ends with an exact chain.
    fn tighten(&self, steps: &mut [ChainStep], descents: &[usize], root: D::Node, target: D::Node) {
        let exact = |steps: &[ChainStep]| resolve_steps(steps, self.doc, root) == [target];
        if exact(&*steps) {
            return;
        }

        let mut switched = Vec::new();
        for &index in descents.iter().rev() {
            steps[index] = ChainStep::Combinator(Combinator::Child);
            switched.push(index);
            if exact(&*steps) {
                break;
            }
        }

        // The last switch made the chain exact; earlier ones may be redundant now
        for &index in switched.iter().rev().skip(1) {
            steps[index] = ChainStep::Combinator(Combinator::Descendant);
            if !exact(&*steps) {
                steps[index] = ChainStep::Combinator(Combinator::Child);
            }
        }
        let children = steps
            .iter()
            .filter(|step| matches!(step, ChainStep::Combinator(Combinator::Child)))
            .count();
        log::trace!("Needed {children} child combinator(s)");
    }

    /// Ancestors from `target` up to and including `root`
    fn ancestor_path(&self, root: D::Node, target: D::Node) -> Result<Vec<D::Node>> {
        let mut path = vec![target];
        let mut current = target;
        while current != root {
            match self.doc.parent(current) {
                Some(parent) => {
                    path.push(parent);
                    current = parent;
                }
                None => {
                    return Err(SelectorError::NotContained {
                        root: self.doc.describe(root),
                        target: self.doc.describe(target),
                    });
                }
            }
        }
        Ok(path)
    }
}
