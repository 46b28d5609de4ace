//! DOM Node
//!
//! Nodes live in the `DomTree` arena and link to each other through
//! `NodeId`s instead of pointers.

use crate::NodeId;
use crate::attributes::NamedNodeMap;

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Whether this node may hold children
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.data, NodeData::Document | NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
    Other,
}

impl Namespace {
    pub const HTML_URI: &'static str = "http://www.w3.org/1999/xhtml";
    pub const SVG_URI: &'static str = "http://www.w3.org/2000/svg";
    pub const MATHML_URI: &'static str = "http://www.w3.org/1998/Math/MathML";

    /// Classify a namespace URI
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            Self::HTML_URI => Self::Html,
            Self::SVG_URI => Self::Svg,
            Self::MATHML_URI => Self::MathMl,
            _ => Self::Other,
        }
    }
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Local name; lowercase for HTML elements
    pub name: String,
    /// Element namespace
    pub namespace: Namespace,
    /// Attributes in insertion order
    pub attrs: NamedNodeMap,
    /// Mutable form-control state (dirty value, checkedness, selectedness)
    pub(crate) control: ControlState,
}

impl ElementData {
    /// Create an element in the HTML namespace
    pub fn new(name: &str) -> Self {
        Self::new_ns(name, Namespace::Html)
    }

    /// Create an element in the given namespace
    pub fn new_ns(name: &str, namespace: Namespace) -> Self {
        let name = if namespace == Namespace::Html {
            name.to_ascii_lowercase()
        } else {
            name.to_string()
        };
        let control = ControlState::for_element(&name, namespace);
        Self {
            name,
            namespace,
            attrs: NamedNodeMap::new(),
            control,
        }
    }

    /// Check for an HTML element with the given local name
    #[inline]
    pub fn is_html(&self, local: &str) -> bool {
        self.namespace == Namespace::Html && self.name == local
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(&self.attr_key(name))
    }

    /// Check if an attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attribute(&self.attr_key(name))
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let key = self.attr_key(name);
        self.attrs.set_attribute(&key, value);
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let key = self.attr_key(name);
        self.attrs.remove_named_item(&key).map(|attr| attr.value)
    }

    /// HTML elements have ASCII-case-insensitive attribute names.
    fn attr_key(&self, name: &str) -> String {
        if self.namespace == Namespace::Html {
            name.to_ascii_lowercase()
        } else {
            name.to_string()
        }
    }
}

/// Form-control state that lives beside the content attributes.
///
/// `None` in any slot means "pristine": the value is derived from the
/// corresponding content attribute (or text content) until a script-side
/// write marks it dirty.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum ControlState {
    #[default]
    None,
    Input {
        value: Option<String>,
        checked: Option<bool>,
    },
    Textarea {
        value: Option<String>,
    },
    Option {
        selected: Option<bool>,
    },
}

impl ControlState {
    fn for_element(name: &str, namespace: Namespace) -> Self {
        if namespace != Namespace::Html {
            return Self::None;
        }
        match name {
            "input" => Self::Input { value: None, checked: None },
            "textarea" => Self::Textarea { value: None },
            "option" => Self::Option { selected: None },
            _ => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_names_are_lowercased() {
        let mut elem = ElementData::new("INPUT");
        elem.set_attr("Data-Role", "x");

        assert_eq!(elem.name, "input");
        assert_eq!(elem.get_attr("data-role"), Some("x"));
        assert_eq!(elem.get_attr("DATA-ROLE"), Some("x"));
        assert!(matches!(elem.control, ControlState::Input { .. }));
    }

    #[test]
    fn test_foreign_names_keep_case() {
        let mut elem = ElementData::new_ns("foreignObject", Namespace::Svg);
        elem.set_attr("viewBox", "0 0 10 10");

        assert_eq!(elem.name, "foreignObject");
        assert!(elem.has_attr("viewBox"));
        assert!(!elem.has_attr("viewbox"));
        assert_eq!(elem.control, ControlState::None);
    }

    #[test]
    fn test_namespace_from_uri() {
        assert_eq!(Namespace::from_uri(Namespace::HTML_URI), Namespace::Html);
        assert_eq!(Namespace::from_uri(Namespace::SVG_URI), Namespace::Svg);
        assert_eq!(Namespace::from_uri("urn:x"), Namespace::Other);
    }
}
