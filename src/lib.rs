//! # selectsmith
//!
//! A Rust library for deriving short, stable CSS selectors that pin down one element of an
//! HTML document, designed for writing scrapers against sites you have only a sample page of.
//!
//! ## Features
//!
//! - **Selector Synthesis**: Shortest chain of `#id`, `.class`, `tag` and `tag:nth-of-type(n)`
//!   steps that resolves to exactly one element, preferring identifying attributes over positions
//! - **Selector Resolution**: Parse and evaluate the same selector subset against any tree
//! - **Heading Ranking**: Order candidate titles by how typical their wording is on the page
//! - **Content Discovery**: Deepest element whose text contains a beginning and ending excerpt
//! - **Interactive Probe**: Ask a human (or a script) to pick headings, links and content, and
//!   report one selector per pick
//!
//! ## Usage
//!
//! ### Synthesizing a Selector
//!
//! ```rust
//! use selectsmith::{DomTree, SelectorChain};
//!
//! # fn main() -> selectsmith::Result<()> {
//! let mut tree = DomTree::new("div");
//! let root = tree.root();
//! let first = tree.append_element(root, "p");
//! tree.set_attribute(first, "id", "x");
//! let second = tree.append_element(root, "p");
//! let span = tree.append_element(second, "span");
//!
//! let selector = selectsmith::unique_selector_string(&tree, root, span)?;
//! assert_eq!(selector, "p:nth-of-type(2) span");
//!
//! // Selectors parse back and resolve to the element they were made for
//! let chain: SelectorChain = selector.parse()?;
//! assert_eq!(chain.resolve(&tree, root), vec![span]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Probing a Page
//!
//! ```rust
//! use selectsmith::probe::{Page, Probe, ScriptedChooser};
//! use selectsmith::{DomTree, ProbeOptions};
//!
//! # fn main() -> selectsmith::Result<()> {
//! let toc = DomTree::from_html(
//!     r#"<h1>Index</h1><ul class="chapters"><li><a href="/1">One</a></li><li><a href="/2">Two</a></li></ul>"#,
//! );
//!
//! // Pick the first heading, then links 1 to 2
//! let chooser = ScriptedChooser::new(["1", "1-2"]);
//! let report = Probe::new(chooser, ProbeOptions::default()).run(&Page::whole(&toc), None)?;
//!
//! println!("{}", report.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: Document trait, arena tree and element queries
//! - [`selector`]: Selector steps, chains, synthesis and the memo cache
//! - [`similarity`]: Text similarity ranking
//! - [`deepest`]: Deepest-match search
//! - [`probe`]: Interactive selector discovery
//! - [`config`]: Synthesis and probe options
//! - [`error`]: Error types and result aliases

pub mod config;
pub mod deepest;
pub mod dom;
pub mod error;
pub mod probe;
pub mod selector;
pub mod similarity;

pub use config::{ProbeOptions, SynthesisOptions};
pub use deepest::{contains_all, find_deepest_match};
pub use dom::{Document, DomTree, ElementNode, NodeId, Query};
pub use error::{Result, SelectorError};
pub use probe::{Chooser, Probe, SelectorReport};
pub use selector::{SelectorCache, SelectorChain, SelectorStep, Synthesizer, synthesize, unique_selector_string};
pub use similarity::{rank, ratio};
