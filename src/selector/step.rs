use crate::dom::Document;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// One simple selector, the unit a chain is built from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectorStep {
    /// `#id` or `tag#id`
    Id { tag: Option<String>, value: String },
    /// `.class` or `tag.class`
    Class { tag: Option<String>, value: String },
    /// Bare `tag`
    Tag { name: String },
    /// `tag:nth-of-type(n)`, positional and therefore fragile
    NthOfType { tag: String, n: usize },
}

/// How the next selector step is searched relative to the previous match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    /// Any descendant (whitespace)
    Descendant,
    /// Direct children only (`>`)
    Child,
}

/// Element of a selector chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainStep {
    Select(SelectorStep),
    Combinator(Combinator),
}

impl SelectorStep {
    pub fn id(tag: Option<&str>, value: impl Into<String>) -> Self {
        Self::Id {
            tag: tag.map(str::to_string),
            value: value.into(),
        }
    }

    pub fn class(tag: Option<&str>, value: impl Into<String>) -> Self {
        Self::Class {
            tag: tag.map(str::to_string),
            value: value.into(),
        }
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag { name: name.into() }
    }

    pub fn nth_of_type(tag: impl Into<String>, n: usize) -> Self {
        Self::NthOfType { tag: tag.into(), n }
    }

    /// Positional selectors break under unrelated edits to the document
    pub fn is_fragile(&self) -> bool {
        matches!(self, Self::NthOfType { .. })
    }

    fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Id { tag, .. } | Self::Class { tag, .. } => tag.as_deref(),
            Self::Tag { name } => Some(name),
            Self::NthOfType { tag, .. } => Some(tag),
        }
    }

    /// Check a single element against this selector
    pub fn matches<D: Document>(&self, doc: &D, node: D::Node) -> bool {
        if let Some(tag) = self.tag_name() {
            if !doc.is_tag(node, tag) {
                return false;
            }
        }
        match self {
            Self::Id { value, .. } => doc.id(node) == Some(value.as_str()),
            Self::Class { value, .. } => doc.has_class(node, value),
            Self::Tag { .. } => true,
            Self::NthOfType { n, .. } => doc.position_of_type(node) == *n,
        }
    }

    /// Matching elements under `scope`, searching descendants or direct children
    pub fn select<D: Document>(&self, doc: &D, scope: D::Node, recursive: bool) -> Vec<D::Node> {
        doc.elements(scope, recursive)
            .into_iter()
            .filter(|&node| self.matches(doc, node))
            .collect()
    }

    /// Whether exactly one element under `scope` matches
    pub fn is_unique<D: Document>(&self, doc: &D, scope: D::Node, recursive: bool) -> bool {
        doc.elements(scope, recursive)
            .into_iter()
            .filter(|&node| self.matches(doc, node))
            .take(2)
            .count()
            == 1
    }
}

impl fmt::Display for SelectorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.tag_name() {
            write_identifier(f, tag)?;
        }
        match self {
            Self::Id { value, .. } => {
                f.write_char('#')?;
                write_identifier(f, value)
            }
            Self::Class { value, .. } => {
                f.write_char('.')?;
                write_identifier(f, value)
            }
            Self::Tag { .. } => Ok(()),
            Self::NthOfType { n, .. } => write!(f, ":nth-of-type({n})"),
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descendant => Ok(()),
            Self::Child => f.write_char('>'),
        }
    }
}

impl fmt::Display for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(step) => fmt::Display::fmt(step, f),
            Self::Combinator(combinator) => fmt::Display::fmt(combinator, f),
        }
    }
}

/// Write `value` as a CSS identifier, escaping what the grammar does not allow literally
fn write_identifier<W: Write>(out: &mut W, value: &str) -> fmt::Result {
    if value == "-" {
        return out.write_str("\\-");
    }
    let leading_hyphen = value.starts_with('-');
    for (i, c) in value.chars().enumerate() {
        let leading_digit = c.is_ascii_digit() && (i == 0 || (i == 1 && leading_hyphen));
        if c == '\0' {
            out.write_char('\u{FFFD}')?;
        } else if c.is_control() || leading_digit {
            write!(out, "\\{:x} ", c as u32)?;
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.write_char(c)?;
        } else {
            out.write_char('\\')?;
            out.write_char(c)?;
        }
    }
    Ok(())
}
