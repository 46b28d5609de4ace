//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.link_last(NodeId::ROOT, html);
        tree.link_last(html, head);
        tree.link_last(html, body);

        doc.html_element = html;
        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate the html/head/body elements after the tree was built externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let html = tree
            .children(tree.root())
            .map(|(id, _)| id)
            .find(|&id| tree.is_html_element(id, "html"));
        let child = |name: &str| {
            html.and_then(|h| tree.children(h).map(|(id, _)| id).find(|&id| tree.is_html_element(id, name)))
        };

        self.head_element = child("head").unwrap_or(NodeId::NONE);
        self.body_element = child("body").unwrap_or(NodeId::NONE);
        self.html_element = html.unwrap_or(NodeId::NONE);
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The document node; the default scope for subtree queries
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.some()
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element.some()
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element.some()
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(self.root(), id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
