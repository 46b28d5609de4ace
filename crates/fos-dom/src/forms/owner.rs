//! Form Owner
//!
//! Listed elements, form-owner resolution and `form.elements`.

use crate::{DomTree, NodeId};

/// Listed form-associated elements (`form.elements` candidates)
const LISTED_ELEMENTS: &[&str] = &["button", "fieldset", "input", "object", "output", "select", "textarea"];

impl DomTree {
    /// Whether `id` is a listed form-associated element
    pub fn is_listed_element(&self, id: NodeId) -> bool {
        LISTED_ELEMENTS.iter().any(|name| self.is_html_element(id, name))
    }

    /// The form owner of a form-associated element
    ///
    /// A `form` content attribute wins over ancestry; if it does not name a
    /// form element in the same tree the element has no owner.
    pub fn form_owner(&self, control: NodeId) -> Option<NodeId> {
        if let Some(form_id) = self.get_attribute(control, "form") {
            let root = self.tree_root(control);
            return self
                .get_element_by_id(root, form_id)
                .filter(|&form| self.is_html_element(form, "form"));
        }
        self.ancestors(control).find(|&a| self.is_html_element(a, "form"))
    }

    /// `form.elements`: listed elements owned by `form`, in tree order
    ///
    /// Image buttons are excluded, matching HTMLFormControlsCollection.
    pub fn form_elements(&self, form: NodeId) -> Vec<NodeId> {
        if !self.is_html_element(form, "form") {
            return Vec::new();
        }
        let root = self.tree_root(form);
        self.descendants(root)
            .map(|(id, _)| id)
            .filter(|&id| self.is_listed_element(id))
            .filter(|&id| !matches!(self.input_type(id), Some(crate::InputType::Image)))
            .filter(|&id| self.form_owner(id) == Some(form))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_elements_by_ancestry() {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        let fieldset = tree.create_element("fieldset");
        let a = tree.create_element_with_attrs("input", [("name", "a")]);
        let img = tree.create_element_with_attrs("input", [("type", "image")]);
        let div = tree.create_element("div");
        let area = tree.create_element("textarea");
        tree.append_child(tree.root(), form).unwrap();
        tree.append_child(form, fieldset).unwrap();
        tree.append_child(fieldset, a).unwrap();
        tree.append_child(form, img).unwrap();
        tree.append_child(form, div).unwrap();
        tree.append_child(div, area).unwrap();

        assert_eq!(tree.form_elements(form), vec![fieldset, a, area]);
        assert_eq!(tree.form_owner(a), Some(form));
    }

    #[test]
    fn test_form_attribute_association() {
        let mut tree = DomTree::new();
        let form = tree.create_element_with_attrs("form", [("id", "f")]);
        let other = tree.create_element("form");
        let outside = tree.create_element_with_attrs("input", [("form", "f")]);
        let moved = tree.create_element_with_attrs("select", [("form", "f")]);
        let broken = tree.create_element_with_attrs("input", [("form", "nope")]);
        tree.append_child(tree.root(), form).unwrap();
        tree.append_child(tree.root(), outside).unwrap();
        tree.append_child(tree.root(), other).unwrap();
        tree.append_child(other, moved).unwrap();
        tree.append_child(other, broken).unwrap();

        assert_eq!(tree.form_elements(form), vec![outside, moved]);
        assert!(tree.form_elements(other).is_empty());
        assert_eq!(tree.form_owner(broken), None);
    }

    #[test]
    fn test_form_elements_of_non_form() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        assert!(tree.form_elements(div).is_empty());
    }
}
