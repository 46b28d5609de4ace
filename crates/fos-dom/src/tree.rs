//! DOM Tree (arena-based allocation)
//!
//! Node 0 is always the document node. Nodes created but never appended
//! stay in the arena as detached subtrees.

use crate::node::{ElementData, Namespace, Node, NodeData};
use crate::{DomError, DomResult, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data for `id`, if it names an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data for `id`
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Element data, or an error naming why there is none
    pub(crate) fn require_element(&self, id: NodeId) -> DomResult<&ElementData> {
        let node = self.get(id).ok_or(DomError::NotFound(id))?;
        node.as_element().ok_or(DomError::NotAnElement(id))
    }

    pub(crate) fn require_element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        node.as_element_mut().ok_or(DomError::NotAnElement(id))
    }

    /// Check for an HTML element with the given local name
    pub fn is_html_element(&self, id: NodeId, local: &str) -> bool {
        self.element(id).is_some_and(|e| e.is_html(local))
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Create a detached HTML element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(name)))
    }

    /// Create a detached element in the given namespace
    pub fn create_element_ns(&mut self, name: &str, namespace: Namespace) -> NodeId {
        self.push(NodeData::Element(ElementData::new_ns(name, namespace)))
    }

    /// Create a detached HTML element with attributes
    pub fn create_element_with_attrs<I, K, V>(&mut self, name: &str, attrs: I) -> NodeId
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut elem = ElementData::new(name);
        for (key, value) in attrs {
            elem.set_attr(key.as_ref(), value);
        }
        self.push(NodeData::Element(elem))
    }

    /// Insert prepared element data
    pub fn create_element_from(&mut self, elem: ElementData) -> NodeId {
        self.push(NodeData::Element(elem))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(NodeData::Text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(NodeData::Comment(content.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.push(NodeData::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        })
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        if !parent_node.is_container() {
            return Err(DomError::HierarchyRequest);
        }
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if matches!(child_node.data, NodeData::Document) || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        self.detach(child);
        self.link_last(parent, child);
        Ok(child)
    }

    /// Link a detached `child` as the last child of `parent` without hierarchy checks
    pub(crate) fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let node = self.get(child).ok_or(DomError::NotFound(child))?;
        if node.parent != parent {
            return Err(DomError::NotFound(child));
        }
        self.detach(child);
        Ok(child)
    }

    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node.some();
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Parent of `id`
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.some())
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Topmost inclusive ancestor of `id`
    pub fn tree_root(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate over the descendants of a node in tree order, excluding the node itself
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Descendants {
            tree: self,
            root: id,
            next,
        }
    }

    /// Concatenated data of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        let mut out = String::new();
        for (_, node) in self.descendants(id) {
            if let Some(text) = node.as_text() {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace all children of `id` with a single text node (none if `text` is empty)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        match &mut node.data {
            NodeData::Text(content) | NodeData::Comment(content) => {
                *content = text.to_string();
                return Ok(());
            }
            NodeData::Element(_) => {}
            NodeData::Document | NodeData::Doctype { .. } => return Ok(()),
        }

        let children: Vec<NodeId> = self.children(id).map(|(child, _)| child).collect();
        for child in children {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    /// Get an attribute value of an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.get_attr(name))
    }

    /// Check whether an element carries an attribute
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> DomResult<()> {
        self.require_element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.require_element_mut(id)?.remove_attr(name))
    }

    /// First element with the given `id` attribute in `scope`'s inclusive subtree
    pub fn get_element_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        if self.get_attribute(scope, "id") == Some(id) {
            return Some(scope);
        }
        self.descendants(scope)
            .find(|(_, node)| node.as_element().and_then(|e| e.get_attr("id")) == Some(id))
            .map(|(node_id, _)| node_id)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.some()?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree, excluding its root
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.some()?;
        let node = self.tree.get(id)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut current = id;
            loop {
                if current == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(current) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                match n.parent.some() {
                    Some(parent) if parent != self.root => current = parent,
                    _ => break NodeId::NONE,
                }
            }
        };
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        let text = tree.create_text("hello");
        let span = tree.create_element("span");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, p).unwrap();
        tree.append_child(p, text).unwrap();
        tree.append_child(div, span).unwrap();
        (tree, div, p, text, span)
    }

    #[test]
    fn test_descendants_tree_order() {
        let (tree, div, p, text, span) = sample();
        let ids: Vec<_> = tree.descendants(tree.root()).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![div, p, text, span]);

        let inner: Vec<_> = tree.descendants(p).map(|(id, _)| id).collect();
        assert_eq!(inner, vec![text]);
    }

    #[test]
    fn test_descendants_stop_at_subtree_root() {
        let (mut tree, div, p, text, _span) = sample();
        let after = tree.create_element("footer");
        tree.append_child(tree.root(), after).unwrap();

        let ids: Vec<_> = tree.descendants(p).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![text]);
        assert!(tree.descendants(div).all(|(id, _)| id != after));
    }

    #[test]
    fn test_append_moves_node() {
        let (mut tree, div, p, _text, span) = sample();
        tree.append_child(span, p).unwrap();

        let children: Vec<_> = tree.children(div).map(|(id, _)| id).collect();
        assert_eq!(children, vec![span]);
        assert_eq!(tree.parent(p), Some(span));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let (mut tree, div, p, text, _span) = sample();
        assert_eq!(tree.append_child(p, div), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(text, div), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(div, tree.root()), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_text_content() {
        let (mut tree, div, p, _text, _span) = sample();
        assert_eq!(tree.text_content(div), "hello");

        tree.set_text_content(p, "bye").unwrap();
        assert_eq!(tree.text_content(p), "bye");
        assert_eq!(tree.children(p).count(), 1);

        tree.set_text_content(p, "").unwrap();
        assert_eq!(tree.children(p).count(), 0);
    }

    #[test]
    fn test_get_element_by_id() {
        let (mut tree, _div, _p, _text, span) = sample();
        tree.set_attribute(span, "id", "target").unwrap();

        assert_eq!(tree.get_element_by_id(tree.root(), "target"), Some(span));
        assert_eq!(tree.get_element_by_id(tree.root(), "missing"), None);
        assert_eq!(tree.get_element_by_id(span, "target"), Some(span));
    }

    #[test]
    fn test_tree_root_of_detached() {
        let (mut tree, div, _p, text, _span) = sample();
        let lonely = tree.create_element("section");
        let inner = tree.create_element("b");
        tree.append_child(lonely, inner).unwrap();

        assert_eq!(tree.tree_root(text), tree.root());
        assert_eq!(tree.tree_root(inner), lonely);
        assert!(tree.is_inclusive_ancestor(div, text));
    }
}
