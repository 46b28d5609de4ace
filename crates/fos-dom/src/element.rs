//! Element Query
//!
//! querySelectorAll / querySelector / matches for attribute-presence
//! selectors (`[name]`). Attribute names follow CSS identifier syntax,
//! including backslash escapes.

use crate::node::{ElementData, Namespace};
use crate::{DomError, DomResult, DomTree, NodeId};

/// Parsed `[attr]` selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSelector {
    /// Unescaped attribute name as written
    pub name: String,
    /// ASCII-lowercased name, matched against HTML elements
    lower: String,
}

impl AttrSelector {
    /// Parse an attribute-presence selector such as `[data-id]`
    pub fn parse(selector: &str) -> DomResult<Self> {
        let invalid = || DomError::InvalidSelector {
            selector: selector.to_string(),
        };

        let mut chars = selector.trim_matches(is_css_whitespace).chars().peekable();
        if chars.next() != Some('[') {
            return Err(invalid());
        }
        while chars.next_if(|&c| is_css_whitespace(c)).is_some() {}

        let name = parse_ident(&mut chars).ok_or_else(invalid)?;

        while chars.next_if(|&c| is_css_whitespace(c)).is_some() {}
        if chars.next() != Some(']') || chars.next().is_some() {
            return Err(invalid());
        }

        let lower = name.to_ascii_lowercase();
        Ok(Self { name, lower })
    }

    /// Check an element against this selector
    pub fn matches(&self, elem: &ElementData) -> bool {
        if elem.namespace == Namespace::Html {
            elem.attrs.has_attribute(&self.lower)
        } else {
            elem.attrs.has_attribute(&self.name)
        }
    }
}

fn is_css_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Consume a CSS ident-token, returning its unescaped value.
fn parse_ident(chars: &mut Chars<'_>) -> Option<String> {
    let mut out = String::new();

    // Start: "--", "-" name-start, "-" escape, name-start or escape
    if chars.next_if_eq(&'-').is_some() {
        out.push('-');
        match chars.peek().copied() {
            Some('-') => {
                chars.next();
                out.push('-');
            }
            Some('\\') => {
                chars.next();
                out.push(parse_escape(chars)?);
            }
            Some(c) if is_name_start(c) => {
                chars.next();
                out.push(c);
            }
            _ => return None,
        }
    } else {
        match chars.peek().copied() {
            Some('\\') => {
                chars.next();
                out.push(parse_escape(chars)?);
            }
            Some(c) if is_name_start(c) => {
                chars.next();
                out.push(c);
            }
            _ => return None,
        }
    }

    loop {
        match chars.peek().copied() {
            Some('\\') => {
                chars.next();
                out.push(parse_escape(chars)?);
            }
            Some(c) if is_name_char(c) => {
                chars.next();
                out.push(c);
            }
            _ => return Some(out),
        }
    }
}

/// Consume the part of an escape after the backslash.
fn parse_escape(chars: &mut Chars<'_>) -> Option<char> {
    let first = chars.next()?;
    if first == '\n' || first == '\r' || first == '\x0C' {
        return None;
    }
    if !first.is_ascii_hexdigit() {
        return Some(first);
    }

    let mut code = first.to_digit(16)?;
    for _ in 0..5 {
        match chars.peek().and_then(|c| c.to_digit(16)) {
            Some(d) => {
                chars.next();
                code = code * 16 + d;
            }
            None => break,
        }
    }
    chars.next_if(|&c| is_css_whitespace(c));

    match code {
        0 => Some(char::REPLACEMENT_CHARACTER),
        _ => Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
    }
}

impl DomTree {
    /// Query all elements in `root`'s subtree (excluding `root`) matching `selector`
    ///
    /// The result is a snapshot: later tree mutations do not affect it.
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let selector = AttrSelector::parse(selector)?;
        Ok(self.select_all(root, &selector))
    }

    /// `query_selector_all` with an already parsed selector
    pub fn select_all(&self, root: NodeId, selector: &AttrSelector) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|(_, node)| node.as_element().is_some_and(|e| selector.matches(e)))
            .map(|(id, _)| id)
            .collect()
    }

    /// First element in `root`'s subtree matching `selector`
    pub fn query_selector(&self, root: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = AttrSelector::parse(selector)?;
        Ok(self
            .descendants(root)
            .find(|(_, node)| node.as_element().is_some_and(|e| selector.matches(e)))
            .map(|(id, _)| id))
    }

    /// Check if an element matches `selector`
    pub fn matches(&self, element: NodeId, selector: &str) -> DomResult<bool> {
        let selector = AttrSelector::parse(selector)?;
        Ok(self.element(element).is_some_and(|e| selector.matches(e)))
    }
}
