//! Value Marshaling
//!
//! Read and write the "value" of inputs, forms and other elements as
//! dynamic `Value`s. Which binding applies is decided by `ElementKind`:
//!
//! - `<input>`: checkboxes map to booleans, number inputs to finite numbers,
//!   everything else to strings.
//! - `<form>`: an object keyed by control name, covering every named
//!   control in `form.elements`.
//! - anything else: the element's own `value` property, if it has one.
//!
//! Writes never fail. A value the host rejects (a non-empty string for a
//! file input, say) is dropped with a warning, and the element keeps its
//! previous value.

use fos_dom::{DomResult, DomTree, InputType, NodeId, PropertyValue};
use tracing::{trace, warn};

use crate::coerce::{parse_boolean, parse_number, parse_string, to_number};
use crate::{Value, ValueBag};

/// How an element's value is marshaled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Input,
    Form,
    Generic,
}

impl ElementKind {
    /// Classify a node; non-elements are `Generic`
    pub fn of(tree: &DomTree, elem: NodeId) -> Self {
        if tree.is_html_element(elem, "input") {
            Self::Input
        } else if tree.is_html_element(elem, "form") {
            Self::Form
        } else {
            Self::Generic
        }
    }

    /// The binding that reads and writes this kind of element
    pub fn binding(self) -> &'static dyn ValueBinding {
        match self {
            Self::Input => &InputBinding,
            Self::Form => &FormBinding,
            Self::Generic => &GenericBinding,
        }
    }
}

/// Reads and writes one kind of element's value
pub trait ValueBinding {
    fn get(&self, tree: &DomTree, elem: NodeId) -> Value;
    fn set(&self, tree: &mut DomTree, elem: NodeId, val: &Value);
}

/// `<input>` elements
#[derive(Debug, Clone, Copy, Default)]
pub struct InputBinding;

/// `<form>` elements
#[derive(Debug, Clone, Copy, Default)]
pub struct FormBinding;

/// Every other element, through its `value` property
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericBinding;

impl ValueBinding for InputBinding {
    fn get(&self, tree: &DomTree, elem: NodeId) -> Value {
        match tree.input_type(elem) {
            Some(InputType::Checkbox) => Value::Bool(tree.checked(elem).unwrap_or(false)),
            Some(InputType::Number) => {
                let n = tree.value_as_number(elem).unwrap_or(f64::NAN);
                Value::Number(parse_number(&Value::Number(n)))
            }
            Some(_) => tree.input_value(elem).map_or(Value::Undefined, Value::String),
            None => GenericBinding.get(tree, elem),
        }
    }

    fn set(&self, tree: &mut DomTree, elem: NodeId, val: &Value) {
        let result = match tree.input_type(elem) {
            Some(InputType::Checkbox) => tree.set_checked(elem, parse_boolean(val)),
            Some(InputType::Number) => tree.set_value_as_number(elem, parse_number(val)),
            Some(_) => tree.set_input_value(elem, &parse_string(val)),
            None => set_text_property(tree, elem, val),
        };
        report(elem, result);
    }
}

impl ValueBinding for FormBinding {
    fn get(&self, tree: &DomTree, elem: NodeId) -> Value {
        Value::Object(get_form_value(tree, elem))
    }

    fn set(&self, tree: &mut DomTree, elem: NodeId, val: &Value) {
        set_form_value(tree, elem, val);
    }
}

impl ValueBinding for GenericBinding {
    fn get(&self, tree: &DomTree, elem: NodeId) -> Value {
        match tree.value_property(elem) {
            Some(PropertyValue::Text(s)) => Value::String(s),
            Some(PropertyValue::Number(n)) => Value::Number(n),
            None => Value::Undefined,
        }
    }

    fn set(&self, tree: &mut DomTree, elem: NodeId, val: &Value) {
        let result = match tree.value_property(elem) {
            Some(PropertyValue::Number(_)) => {
                tree.set_value_property(elem, PropertyValue::Number(to_number(val)))
            }
            Some(PropertyValue::Text(_)) => {
                tree.set_value_property(elem, PropertyValue::Text(parse_string(val)))
            }
            None => {
                trace!(?elem, "element has no value property, write ignored");
                Ok(())
            }
        };
        report(elem, result);
    }
}

/// String write for elements that have a text `value` property
fn set_text_property(tree: &mut DomTree, elem: NodeId, val: &Value) -> DomResult<()> {
    if tree.has_value_property(elem) {
        tree.set_value_property(elem, PropertyValue::Text(parse_string(val)))
    } else {
        Ok(())
    }
}

fn report(elem: NodeId, result: DomResult<()>) {
    if let Err(err) = result {
        warn!(%err, ?elem, "element rejected value");
    }
}

/// Value of an input: bool for checkboxes, finite number for number inputs, string otherwise
pub fn get_input_value(tree: &DomTree, elem: NodeId) -> Value {
    InputBinding.get(tree, elem)
}

/// Write an input's value, coercing `val` to the input's shape
pub fn set_input_value(tree: &mut DomTree, elem: NodeId, val: &Value) {
    InputBinding.set(tree, elem, val);
}

/// Value of any element, dispatched on its kind
pub fn get_element_value(tree: &DomTree, elem: NodeId) -> Value {
    ElementKind::of(tree, elem).binding().get(tree, elem)
}

/// Write any element's value, dispatched on its kind
pub fn set_element_value(tree: &mut DomTree, elem: NodeId, val: &Value) {
    ElementKind::of(tree, elem).binding().set(tree, elem, val);
}

fn control_name(tree: &DomTree, control: NodeId) -> Option<String> {
    tree.get_attribute(control, "name")
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Collect a form's named controls into an object
///
/// Unnamed controls are skipped. When several controls share a name the
/// last one in tree order wins.
pub fn get_form_value(tree: &DomTree, form: NodeId) -> ValueBag {
    let mut bag = ValueBag::new();
    for control in tree.form_elements(form) {
        let Some(name) = control_name(tree, control) else {
            continue;
        };
        let value = get_element_value(tree, control);
        trace!(%name, ?value, "read form control");
        bag.insert(name, value);
    }
    bag
}

/// Write `data[name]` into every named control of a form
///
/// Controls whose name is missing from `data` receive `undefined`, which
/// clears text controls and unchecks checkboxes. Data that is not an object
/// or array is treated as an empty object.
pub fn set_form_value(tree: &mut DomTree, form: NodeId, data: &Value) {
    let empty = Value::Object(ValueBag::new());
    let data = if data.is_object() { data } else { &empty };

    for control in tree.form_elements(form) {
        let Some(name) = control_name(tree, control) else {
            continue;
        };
        let value = data.property(&name);
        trace!(%name, ?value, "write form control");
        set_element_value(tree, control, &value);
    }
}
