//! fOS DOM - Document Object Model
//!
//! Arena DOM tree with attributes, attribute-presence selectors and the
//! form-control state behind the `value`, `checked` and `valueAsNumber`
//! properties.

mod attributes;
mod document;
mod element;
pub mod forms;
mod node;
mod number;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use document::Document;
pub use element::AttrSelector;
pub use forms::{InputType, PropertyValue, ValueMode};
pub use node::{ElementData, Namespace, Node, NodeData};
pub use number::{format_number, parse_html_float};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID (the document node)
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a real node reference
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn some(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Selector string is not valid (DOMException "SyntaxError")
    #[error("'{selector}' is not a valid selector")]
    InvalidSelector { selector: String },

    /// Operation not allowed in the node's current state (DOMException "InvalidStateError")
    #[error("invalid state: {message}")]
    InvalidState { message: String },

    /// A non-finite number was written to a floating-point property
    #[error("the provided double value is non-finite")]
    NotFinite,

    /// Node id does not refer to a node of this tree
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    /// Node id refers to a node that is not an element
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// Insertion would create a cycle or put children under a leaf node
    #[error("hierarchy request error")]
    HierarchyRequest,
}

impl DomError {
    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState { message: message.into() }
    }
}
