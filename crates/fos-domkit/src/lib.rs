//! fOS DOM Kit
//!
//! Convenience helpers on top of `fos-dom`:
//! - attribute selection (`get_elements_by_attr`, `get_elements_by_attr_val`)
//! - value marshaling for inputs, forms and generic elements
//! - total coercion of dynamic values into string, number and boolean
//!
//! # Example
//!
//! ```
//! use fos_domkit::{Value, get_form_value, set_form_value};
//!
//! let mut doc = fos_html::parse(r#"<form id="f"><input name="q" value="rust"></form>"#).unwrap();
//! let form = doc.get_element_by_id("f").unwrap();
//! assert_eq!(get_form_value(&doc.tree, form).get("q"), Some(&Value::from("rust")));
//!
//! set_form_value(&mut doc.tree, form, &serde_json::json!({ "q": 42 }).into());
//! assert_eq!(get_form_value(&doc.tree, form).get("q"), Some(&Value::from("42")));
//! ```

mod coerce;
mod marshal;
mod select;
mod value;

pub use coerce::{loosely_equals, parse_boolean, parse_number, parse_string, string_to_number, to_number};
pub use marshal::{
    ElementKind, FormBinding, GenericBinding, InputBinding, ValueBinding, get_element_value, get_form_value,
    get_input_value, set_element_value, set_form_value, set_input_value,
};
pub use select::{get_elements_by_attr, get_elements_by_attr_val};
pub use value::{Value, ValueBag};

pub use fos_dom::{Document, DomError, DomResult, DomTree, NodeId};
