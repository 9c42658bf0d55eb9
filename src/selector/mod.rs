//! Selector synthesis module
//!
//! - SelectorStep / ChainStep: the `#id`, `.class`, `tag`, `tag:nth-of-type(n)` steps and
//!   combinators a chain is made of
//! - SelectorChain: rendering, parsing and resolution of chains
//! - Synthesizer: builds the shortest stable chain that pins down one element
//! - SelectorCache: memoized selector strings per (root, target)

pub mod cache;
pub mod chain;
pub mod step;
pub mod synth;

pub use cache::SelectorCache;
pub use chain::SelectorChain;
pub use step::{ChainStep, Combinator, SelectorStep};
pub use synth::{Synthesizer, best_selector, synthesize};

use crate::dom::Document;
use crate::error::Result;

/// Rendered selector that resolves to `target` within `root`
pub fn unique_selector_string<D: Document>(doc: &D, root: D::Node, target: D::Node) -> Result<String> {
    synthesize(doc, root, target).map(|chain| chain.to_string())
}
