//! Attribute Selection
//!
//! Find elements by attribute presence, optionally filtered by value.

use fos_dom::{AttrSelector, DomResult, DomTree, NodeId};

use crate::Value;
use crate::coerce::loosely_equals;

fn attr_selector(attr: &str) -> DomResult<AttrSelector> {
    AttrSelector::parse(&format!("[{attr}]"))
}

/// All elements under `parent` carrying attribute `attr`, in document order
///
/// `attr` uses CSS identifier syntax (escapes allowed). A name that does not
/// form a valid `[attr]` selector is an `InvalidSelector` error. `parent`
/// itself is never included; pass `Document::root()` to search a whole
/// document.
pub fn get_elements_by_attr(tree: &DomTree, attr: &str, parent: NodeId) -> DomResult<Vec<NodeId>> {
    Ok(tree.select_all(parent, &attr_selector(attr)?))
}

/// Elements under `parent` whose `attr` attribute loosely equals `val`
///
/// Comparison follows abstract equality between the attribute string and
/// `val`: `"1"` matches both `"1"` and `1`, and a null or undefined `val`
/// matches nothing.
pub fn get_elements_by_attr_val(
    tree: &DomTree,
    attr: &str,
    val: &Value,
    parent: NodeId,
) -> DomResult<Vec<NodeId>> {
    let selector = attr_selector(attr)?;
    let mut elems = tree.select_all(parent, &selector);
    elems.retain(|&elem| {
        tree.get_attribute(elem, &selector.name)
            .is_some_and(|actual| loosely_equals(actual, val))
    });
    tracing::trace!(attr, ?val, matched = elems.len(), "selected by attribute value");
    Ok(elems)
}
