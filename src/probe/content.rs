use crate::deepest::{contains_all, find_deepest_match};
use crate::dom::Document;
use crate::error::{Result, SelectorError};
use crate::probe::{Finder, ProbeContext};

const BEGINNING_PROMPT: &str = "Enter excerpt of the chapter beginning: ";
const ENDING_PROMPT: &str = "Enter excerpt of the chapter ending: ";

/// Ask for the first and last words of a chapter and return the deepest element holding both
pub fn pick_content<D: Document>(context: &mut ProbeContext<'_, D>) -> Result<Option<D::Node>> {
    let beginning = context.chooser.ask(BEGINNING_PROMPT)?.trim().to_string();
    let ending = context.chooser.ask(ENDING_PROMPT)?.trim().to_string();
    if beginning.is_empty() && ending.is_empty() {
        return Err(SelectorError::EmptySelection);
    }

    let excerpts = [beginning, ending];
    let found = find_deepest_match(
        context.document,
        context.root,
        contains_all(&excerpts, context.options.case_insensitive),
    );
    if found.is_none() {
        log::warn!("No element contains both excerpts {:?}", excerpts);
    }
    Ok(found)
}

/// Finder for the chapter body
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentFinder;

impl<D: Document> Finder<D> for ContentFinder {
    fn name(&self) -> &str {
        "content"
    }

    fn find(&self, context: &mut ProbeContext<'_, D>) -> Result<Option<D::Node>> {
        pick_content(context)
    }
}
