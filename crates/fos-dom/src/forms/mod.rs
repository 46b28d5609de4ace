//! Form Elements Module
//!
//! Control state for input, textarea, select and option, form ownership,
//! and the `value` property of every element kind that exposes one.

mod input;
mod owner;
mod select;

pub use input::{InputType, ValueMode};

use crate::node::ControlState;
use crate::{DomError, DomResult, DomTree, NodeId, format_number, parse_html_float};

/// Current content of an element's `value` property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// DOMString-typed `value`
    Text(String),
    /// Numeric `value` (`li`, `meter`, `progress`)
    Number(f64),
}

impl PropertyValue {
    /// String form of the value
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
        }
    }

    /// Numeric form of the value; NaN for non-numeric text
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Text(s) => parse_html_float(s.trim()).unwrap_or(f64::NAN),
            Self::Number(n) => *n,
        }
    }
}

/// Element kinds that expose a `value` property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueSlot {
    Input,
    Textarea,
    Select,
    Output,
    /// Reflects the `value` content attribute as a string
    Attribute,
    /// `li`: reflects `value` as a 32-bit integer
    Ordinal,
    /// `meter`: `value` clamped to `[min, max]`
    Meter,
    /// `progress`: `value` clamped to `[0, max]`
    Progress,
}

impl DomTree {
    fn value_slot(&self, id: NodeId) -> Option<ValueSlot> {
        let elem = self.element(id)?;
        if elem.namespace != crate::Namespace::Html {
            return None;
        }
        Some(match elem.name.as_str() {
            "input" => ValueSlot::Input,
            "textarea" => ValueSlot::Textarea,
            "select" => ValueSlot::Select,
            "output" => ValueSlot::Output,
            "button" | "data" | "option" | "param" => ValueSlot::Attribute,
            "li" => ValueSlot::Ordinal,
            "meter" => ValueSlot::Meter,
            "progress" => ValueSlot::Progress,
            _ => return None,
        })
    }

    /// Whether the element exposes a `value` property at all
    pub fn has_value_property(&self, id: NodeId) -> bool {
        self.value_slot(id).is_some()
    }

    /// The element's `value` property, `None` if it has none
    pub fn value_property(&self, id: NodeId) -> Option<PropertyValue> {
        Some(match self.value_slot(id)? {
            ValueSlot::Input => PropertyValue::Text(self.input_value(id)?),
            ValueSlot::Textarea => PropertyValue::Text(self.textarea_value(id)),
            ValueSlot::Select => PropertyValue::Text(self.select_value(id)),
            ValueSlot::Output => PropertyValue::Text(self.text_content(id)),
            ValueSlot::Attribute if self.is_html_element(id, "option") => {
                PropertyValue::Text(self.option_value(id))
            }
            ValueSlot::Attribute => {
                PropertyValue::Text(self.get_attribute(id, "value").unwrap_or_default().to_string())
            }
            ValueSlot::Ordinal => PropertyValue::Number(
                self.get_attribute(id, "value")
                    .and_then(parse_html_integer)
                    .unwrap_or(0) as f64,
            ),
            ValueSlot::Meter => {
                let min = self.float_attribute(id, "min").unwrap_or(0.0);
                let max = self.float_attribute(id, "max").unwrap_or(1.0).max(min);
                let value = self.float_attribute(id, "value").unwrap_or(0.0);
                PropertyValue::Number(value.clamp(min, max))
            }
            ValueSlot::Progress => {
                let max = self.float_attribute(id, "max").filter(|&m| m > 0.0).unwrap_or(1.0);
                let value = self.float_attribute(id, "value").unwrap_or(0.0);
                PropertyValue::Number(value.clamp(0.0, max))
            }
        })
    }

    /// Write the element's `value` property
    ///
    /// The value is converted to the property's own type first: text slots
    /// take the string form, `li` truncates to a 32-bit integer, and
    /// `meter`/`progress` reject non-finite numbers.
    pub fn set_value_property(&mut self, id: NodeId, value: PropertyValue) -> DomResult<()> {
        let slot = self.value_slot(id).ok_or_else(|| {
            if self.element(id).is_some() {
                DomError::invalid_state("element has no value property")
            } else {
                DomError::NotAnElement(id)
            }
        })?;

        match slot {
            ValueSlot::Input => self.set_input_value(id, &value.to_text()),
            ValueSlot::Textarea => self.set_textarea_value(id, &value.to_text()),
            ValueSlot::Select => self.set_select_value(id, &value.to_text()),
            ValueSlot::Output => self.set_text_content(id, &value.to_text()),
            ValueSlot::Attribute => self.set_attribute(id, "value", value.to_text()),
            ValueSlot::Ordinal => {
                let n = to_int32(value.to_number());
                self.set_attribute(id, "value", n.to_string())
            }
            ValueSlot::Meter | ValueSlot::Progress => {
                let n = value.to_number();
                if !n.is_finite() {
                    return Err(DomError::NotFinite);
                }
                self.set_attribute(id, "value", format_number(n))
            }
        }
    }

    fn float_attribute(&self, id: NodeId, name: &str) -> Option<f64> {
        self.get_attribute(id, name).and_then(|v| parse_html_float(v.trim()))
    }

    /// The `value` of a textarea: its dirty value, else its text content
    pub fn textarea_value(&self, id: NodeId) -> String {
        match self.element(id).map(|e| &e.control) {
            Some(ControlState::Textarea { value: Some(dirty) }) => dirty.clone(),
            _ => self.text_content(id),
        }
    }

    /// Set the `value` of a textarea; line breaks are normalized to LF
    pub fn set_textarea_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        let normalized = value.replace("\r\n", "\n").replace('\r', "\n");
        match &mut self.require_element_mut(id)?.control {
            ControlState::Textarea { value } => {
                *value = Some(normalized);
                Ok(())
            }
            _ => Err(DomError::invalid_state("element is not a textarea")),
        }
    }
}

/// HTML rules for parsing integers: optional whitespace, sign, digits, trailing junk ignored.
fn parse_html_integer(s: &str) -> Option<i64> {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let n: i64 = digits[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

/// ECMAScript ToInt32
fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let modulo = n.trunc().rem_euclid(4_294_967_296.0);
    if modulo >= 2_147_483_648.0 {
        (modulo - 4_294_967_296.0) as i32
    } else {
        modulo as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attach(tree: &mut DomTree, id: NodeId) {
        tree.append_child(tree.root(), id).unwrap();
    }

    #[test]
    fn test_value_property_kinds() {
        let mut tree = DomTree::new();
        let button = tree.create_element_with_attrs("button", [("value", "go")]);
        let data = tree.create_element("data");
        let div = tree.create_element("div");
        let li = tree.create_element_with_attrs("li", [("value", " 12abc")]);
        let meter = tree.create_element_with_attrs("meter", [("value", "0.25")]);

        assert_eq!(tree.value_property(button), Some(PropertyValue::Text("go".into())));
        assert_eq!(tree.value_property(data), Some(PropertyValue::Text(String::new())));
        assert_eq!(tree.value_property(div), None);
        assert_eq!(tree.value_property(li), Some(PropertyValue::Number(12.0)));
        assert_eq!(tree.value_property(meter), Some(PropertyValue::Number(0.25)));
        assert!(!tree.has_value_property(div));
    }

    #[test]
    fn test_numeric_writes() {
        let mut tree = DomTree::new();
        let li = tree.create_element("li");
        let progress = tree.create_element("progress");

        tree.set_value_property(li, PropertyValue::Number(3.9)).unwrap();
        assert_eq!(tree.get_attribute(li, "value"), Some("3"));
        tree.set_value_property(li, PropertyValue::Number(f64::NAN)).unwrap();
        assert_eq!(tree.get_attribute(li, "value"), Some("0"));
        tree.set_value_property(li, PropertyValue::Number(4_294_967_297.0)).unwrap();
        assert_eq!(tree.get_attribute(li, "value"), Some("1"));

        tree.set_value_property(progress, PropertyValue::Number(0.5)).unwrap();
        assert_eq!(tree.value_property(progress), Some(PropertyValue::Number(0.5)));
        tree.set_value_property(progress, PropertyValue::Number(-3.0)).unwrap();
        assert_eq!(tree.get_attribute(progress, "value"), Some("-3"));
        assert_eq!(tree.value_property(progress), Some(PropertyValue::Number(0.0)));
        assert_eq!(
            tree.set_value_property(progress, PropertyValue::Number(f64::INFINITY)),
            Err(DomError::NotFinite)
        );
    }

    #[test]
    fn test_meter_value_is_clamped() {
        let mut tree = DomTree::new();
        let high = tree.create_element_with_attrs("meter", [("value", "5")]);
        let low = tree.create_element_with_attrs("meter", [("value", "2"), ("min", "3"), ("max", "10")]);
        let inverted = tree.create_element_with_attrs("meter", [("value", "9"), ("min", "4"), ("max", "1")]);
        let bare = tree.create_element("meter");

        assert_eq!(tree.value_property(high), Some(PropertyValue::Number(1.0)));
        assert_eq!(tree.value_property(low), Some(PropertyValue::Number(3.0)));
        assert_eq!(tree.value_property(inverted), Some(PropertyValue::Number(4.0)));
        assert_eq!(tree.value_property(bare), Some(PropertyValue::Number(0.0)));
    }

    #[test]
    fn test_progress_value_is_clamped() {
        let mut tree = DomTree::new();
        let negative = tree.create_element_with_attrs("progress", [("value", "-3")]);
        let over = tree.create_element_with_attrs("progress", [("value", "40"), ("max", "25")]);
        let bad_max = tree.create_element_with_attrs("progress", [("value", "0.5"), ("max", "-2")]);
        let inside = tree.create_element_with_attrs("progress", [("value", "12"), ("max", "25")]);

        assert_eq!(tree.value_property(negative), Some(PropertyValue::Number(0.0)));
        assert_eq!(tree.value_property(over), Some(PropertyValue::Number(25.0)));
        assert_eq!(tree.value_property(bad_max), Some(PropertyValue::Number(0.5)));
        assert_eq!(tree.value_property(inside), Some(PropertyValue::Number(12.0)));
    }

    #[test]
    fn test_textarea_and_output() {
        let mut tree = DomTree::new();
        let area = tree.create_element("textarea");
        let text = tree.create_text("initial");
        tree.append_child(area, text).unwrap();
        let output = tree.create_element("output");
        attach(&mut tree, output);

        assert_eq!(tree.value_property(area), Some(PropertyValue::Text("initial".into())));
        tree.set_value_property(area, PropertyValue::Text("a\r\nb".into())).unwrap();
        assert_eq!(tree.textarea_value(area), "a\nb");
        assert_eq!(tree.text_content(area), "initial");

        tree.set_value_property(output, PropertyValue::Number(5.0)).unwrap();
        assert_eq!(tree.text_content(output), "5");
    }

    #[test]
    fn test_set_value_without_property() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let text = tree.create_text("x");

        assert!(matches!(
            tree.set_value_property(div, PropertyValue::Text("v".into())),
            Err(DomError::InvalidState { .. })
        ));
        assert_eq!(
            tree.set_value_property(text, PropertyValue::Text("v".into())),
            Err(DomError::NotAnElement(text))
        );
    }

    #[test]
    fn test_to_int32() {
        assert_eq!(to_int32(-1.5), -1);
        assert_eq!(to_int32(2_147_483_648.0), -2_147_483_648);
        assert_eq!(to_int32(f64::INFINITY), 0);
    }
}
