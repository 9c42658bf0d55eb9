use crate::dom::Document;
use crate::error::{Result, SelectorError};
use crate::selector::step::{ChainStep, Combinator, SelectorStep};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Ordered selector steps that resolve to one element under the root they were built for
///
/// Adjacent selector steps are separated by the descendant combinator unless a
/// [`Combinator::Child`] step sits between them. The rendered string uses the CSS subset
/// `#id`, `tag#id`, `.class`, `tag.class`, `tag`, `tag:nth-of-type(n)`, whitespace and `>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectorChain {
    steps: Vec<ChainStep>,
}

impl SelectorChain {
    /// Create an empty chain, which resolves to the root itself
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn from_steps(steps: Vec<ChainStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn push(&mut self, step: ChainStep) {
        self.steps.push(step);
    }

    /// Selector steps only, skipping combinators
    pub fn selectors(&self) -> impl Iterator<Item = &SelectorStep> {
        self.steps.iter().filter_map(|step| match step {
            ChainStep::Select(selector) => Some(selector),
            ChainStep::Combinator(_) => None,
        })
    }

    /// True when the chain selects nothing beyond the root
    pub fn is_empty(&self) -> bool {
        self.selectors().next().is_none()
    }

    /// Whether any step depends on element position
    pub fn is_fragile(&self) -> bool {
        self.selectors().any(SelectorStep::is_fragile)
    }

    /// Evaluate the chain left to right as nested queries starting at `root`
    ///
    /// Returns the matched elements in discovery order without duplicates. An empty
    /// chain yields `root`.
    pub fn resolve<D: Document>(&self, doc: &D, root: D::Node) -> Vec<D::Node> {
        resolve_steps(&self.steps, doc, root)
    }
}

/// Nested-query evaluation shared by [`SelectorChain::resolve`] and synthesis
pub(crate) fn resolve_steps<D: Document>(steps: &[ChainStep], doc: &D, root: D::Node) -> Vec<D::Node> {
    let mut current = vec![root];
    let mut recursive = true;

    for step in steps {
        match step {
            ChainStep::Combinator(Combinator::Descendant) => recursive = true,
            ChainStep::Combinator(Combinator::Child) => recursive = false,
            ChainStep::Select(selector) => {
                let mut seen = HashSet::new();
                let mut next = Vec::new();
                for scope in current {
                    for node in selector.select(doc, scope, recursive) {
                        if seen.insert(node) {
                            next.push(node);
                        }
                    }
                }
                current = next;
                recursive = true;
            }
        }
    }

    current
}

impl fmt::Display for SelectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for step in &self.steps {
            if matches!(step, ChainStep::Combinator(Combinator::Descendant)) {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{step}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for SelectorChain {
    type Err = SelectorError;

    fn from_str(input: &str) -> Result<Self> {
        Parser::new(input).parse()
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<SelectorChain> {
        let mut steps = Vec::new();
        let mut pending_child = false;

        loop {
            self.skip_whitespace();
            let Some(c) = self.peek() else {
                break;
            };
            if c == '>' {
                if pending_child {
                    return Err(self.error("repeated '>' combinator"));
                }
                pending_child = true;
                self.pos += 1;
                continue;
            }

            let selector = self.compound()?;
            if pending_child {
                steps.push(ChainStep::Combinator(Combinator::Child));
                pending_child = false;
            }
            steps.push(ChainStep::Select(selector));
        }

        if pending_child {
            return Err(self.error("'>' must be followed by a selector"));
        }
        Ok(SelectorChain::from_steps(steps))
    }

    fn compound(&mut self) -> Result<SelectorStep> {
        let tag = match self.peek() {
            Some(c) if is_identifier_start(c) => Some(self.identifier()?),
            _ => None,
        };

        let selector = match self.peek() {
            Some('#') => {
                self.pos += 1;
                SelectorStep::Id {
                    tag,
                    value: self.identifier()?,
                }
            }
            Some('.') => {
                self.pos += 1;
                SelectorStep::Class {
                    tag,
                    value: self.identifier()?,
                }
            }
            Some(':') => {
                self.pos += 1;
                self.expect_literal("nth-of-type(")?;
                let n = self.number()?;
                self.expect_literal(")")?;
                let tag = tag.ok_or_else(|| self.error(":nth-of-type needs a tag name"))?;
                SelectorStep::NthOfType { tag, n }
            }
            _ => match tag {
                Some(name) => SelectorStep::Tag { name },
                None => return Err(self.error("expected a selector")),
            },
        };

        match self.peek() {
            None | Some('>') => Ok(selector),
            Some(c) if c.is_whitespace() => Ok(selector),
            Some(c) => Err(self.error(&format!("unexpected '{c}'"))),
        }
    }

    fn identifier(&mut self) -> Result<String> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                out.push(self.escape()?);
            } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if out.is_empty() {
            return Err(self.error("expected an identifier"));
        }
        Ok(out)
    }

    fn escape(&mut self) -> Result<char> {
        let Some(c) = self.peek() else {
            return Err(self.error("dangling escape"));
        };
        if c == '\n' {
            return Err(self.error("escaped newline"));
        }
        if !c.is_ascii_hexdigit() {
            self.pos += 1;
            return Ok(c);
        }

        let mut value = 0u32;
        let mut digits = 0;
        while digits < 6 {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    digits += 1;
                    self.pos += 1;
                }
                None => break,
            }
        }
        if self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        Ok(char::from_u32(value)
            .filter(|&c| c != '\0')
            .unwrap_or('\u{FFFD}'))
    }

    fn number(&mut self) -> Result<usize> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        match digits.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(self.error("expected a positive integer")),
        }
    }

    fn expect_literal(&mut self, literal: &str) -> Result<()> {
        for expected in literal.chars() {
            if self.peek() != Some(expected) {
                return Err(self.error(&format!("expected '{literal}'")));
            }
            self.pos += 1;
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, reason: &str) -> SelectorError {
        SelectorError::InvalidSelector(format!("{reason} at position {} in '{}'", self.pos, self.source))
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '\\' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomTree;

    fn parse(input: &str) -> SelectorChain {
        input.parse().unwrap()
    }

    fn sample_tree() -> DomTree {
        let mut tree = DomTree::new("div");
        let root = tree.root();
        let p1 = tree.append_element(root, "p");
        tree.set_attribute(p1, "id", "x");
        let p2 = tree.append_element(root, "p");
        tree.append_element(p2, "span");
        tree
    }

    #[test]
    fn test_parse_forms() {
        let chain = parse("div#main .title > h1.big p:nth-of-type(3) span");
        let steps: Vec<_> = chain.selectors().cloned().collect();

        assert_eq!(
            steps,
            vec![
                SelectorStep::id(Some("div"), "main"),
                SelectorStep::class(None, "title"),
                SelectorStep::class(Some("h1"), "big"),
                SelectorStep::nth_of_type("p", 3),
                SelectorStep::tag("span"),
            ]
        );
        assert_eq!(chain.steps()[2], ChainStep::Combinator(Combinator::Child));
        assert!(chain.is_fragile());
    }

    #[test]
    fn test_display_reparses() {
        for input in ["#main", "> div p:nth-of-type(2) span", "h1.title", "#chapter\\:1 a", "#\\31 23 span"] {
            let chain = parse(input);
            assert_eq!(chain.to_string(), input);
            assert_eq!(parse(&chain.to_string()), chain);
        }
    }

    #[test]
    fn test_escapes() {
        let chain = parse("#\\31 23 .a\\.b");
        let steps: Vec<_> = chain.selectors().cloned().collect();
        assert_eq!(steps, vec![SelectorStep::id(None, "123"), SelectorStep::class(None, "a.b")]);
    }

    #[test]
    fn test_parse_errors() {
        for input in ["div >", "> > p", ":nth-of-type(2)", "p:nth-of-type(0)", "p:first-child", "a[href]", "#", "*"] {
            let err = input.parse::<SelectorChain>().unwrap_err();
            assert!(matches!(err, SelectorError::InvalidSelector(_)), "{input}");
        }
    }

    #[test]
    fn test_empty_chain_resolves_to_root() {
        let tree = sample_tree();
        let chain = parse("   ");

        assert!(chain.is_empty());
        assert_eq!(chain.resolve(&tree, tree.root()), vec![tree.root()]);
        assert_eq!(chain.to_string(), "");
    }

    #[test]
    fn test_resolve_descendant_and_child() {
        let tree = sample_tree();
        let root = tree.root();
        let spans = parse("span").resolve(&tree, root);
        assert_eq!(spans.len(), 1);

        assert!(parse("> span").resolve(&tree, root).is_empty());
        assert_eq!(parse("> p > span").resolve(&tree, root), spans);
        assert_eq!(parse("p:nth-of-type(2) span").resolve(&tree, root), spans);
        assert_eq!(parse("p").resolve(&tree, root).len(), 2);
        assert!(parse("#missing").resolve(&tree, root).is_empty());
    }
}
