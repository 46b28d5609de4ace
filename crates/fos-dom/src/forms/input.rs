//! Input Element
//!
//! Type keywords, value modes and value sanitization for `<input>`, plus
//! the `value` / `checked` / `valueAsNumber` accessors on the tree.

use crate::node::ControlState;
use crate::{DomError, DomResult, DomTree, NodeId, format_number, parse_html_float};

/// HTML input types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Tel,
    Url,
    Search,
    Date,
    Time,
    DatetimeLocal,
    Month,
    Week,
    Color,
    Range,
    File,
    Hidden,
    Checkbox,
    Radio,
    Submit,
    Reset,
    Button,
    Image,
}

impl InputType {
    /// Parse the `type` attribute; unknown or missing keywords map to text
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "password" => Self::Password,
            "email" => Self::Email,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "search" => Self::Search,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime-local" => Self::DatetimeLocal,
            "month" => Self::Month,
            "week" => Self::Week,
            "color" => Self::Color,
            "range" => Self::Range,
            "file" => Self::File,
            "hidden" => Self::Hidden,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "button" => Self::Button,
            "image" => Self::Image,
            _ => Self::Text,
        }
    }

    /// Canonical keyword, as reflected by the `type` IDL attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Search => "search",
            Self::Date => "date",
            Self::Time => "time",
            Self::DatetimeLocal => "datetime-local",
            Self::Month => "month",
            Self::Week => "week",
            Self::Color => "color",
            Self::Range => "range",
            Self::File => "file",
            Self::Hidden => "hidden",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Submit => "submit",
            Self::Reset => "reset",
            Self::Button => "button",
            Self::Image => "image",
        }
    }

    /// How the `value` IDL attribute behaves for this type
    pub fn value_mode(self) -> ValueMode {
        match self {
            Self::Hidden | Self::Submit | Self::Image | Self::Reset | Self::Button => ValueMode::Default,
            Self::Checkbox | Self::Radio => ValueMode::DefaultOn,
            Self::File => ValueMode::Filename,
            _ => ValueMode::Value,
        }
    }

    /// Whether `valueAsNumber` applies to this type
    pub fn has_numeric_value(self) -> bool {
        matches!(self, Self::Number | Self::Range)
    }

    /// Sanitize a candidate value for this type
    pub fn sanitize(self, value: &str, min: Option<&str>, max: Option<&str>) -> String {
        match self {
            Self::Text | Self::Search | Self::Tel | Self::Password => strip_newlines(value),
            Self::Email | Self::Url => strip_newlines(value)
                .trim_matches(|c: char| c.is_ascii_whitespace())
                .to_string(),
            Self::Number => match parse_html_float(value) {
                Some(_) => value.to_string(),
                None => String::new(),
            },
            Self::Range => sanitize_range(value, min, max),
            Self::Color => sanitize_color(value),
            _ => value.to_string(),
        }
    }
}

/// Modes of the `value` IDL attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// Value lives in the control state (text-like inputs)
    Value,
    /// Reflects the `value` content attribute, `""` when absent
    Default,
    /// Reflects the `value` content attribute, `"on"` when absent
    DefaultOn,
    /// File selection; only clearing is allowed
    Filename,
}

fn strip_newlines(value: &str) -> String {
    value.chars().filter(|&c| c != '\n' && c != '\r').collect()
}

fn sanitize_range(value: &str, min: Option<&str>, max: Option<&str>) -> String {
    let min = min.and_then(parse_html_float).unwrap_or(0.0);
    let max = max.and_then(parse_html_float).unwrap_or(100.0);
    let max = if max < min { min } else { max };

    let n = match parse_html_float(value) {
        Some(n) => n.clamp(min, max),
        None => min + (max - min) / 2.0,
    };
    format_number(n)
}

fn sanitize_color(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit) {
        value.to_ascii_lowercase()
    } else {
        "#000000".to_string()
    }
}

impl DomTree {
    /// Input type of an `<input>` element, `None` for anything else
    pub fn input_type(&self, id: NodeId) -> Option<InputType> {
        let elem = self.element(id)?;
        elem.is_html("input")
            .then(|| InputType::parse(elem.get_attr("type").unwrap_or_default()))
    }

    fn require_input(&self, id: NodeId) -> DomResult<InputType> {
        self.require_element(id)?;
        self.input_type(id)
            .ok_or_else(|| DomError::invalid_state("element is not an input"))
    }

    /// The `value` IDL attribute of an input
    pub fn input_value(&self, id: NodeId) -> Option<String> {
        let ty = self.input_type(id)?;
        let elem = self.element(id)?;
        let attr = elem.get_attr("value");

        Some(match ty.value_mode() {
            ValueMode::Value => match &elem.control {
                ControlState::Input { value: Some(dirty), .. } => dirty.clone(),
                _ => ty.sanitize(attr.unwrap_or_default(), elem.get_attr("min"), elem.get_attr("max")),
            },
            ValueMode::Default => attr.unwrap_or_default().to_string(),
            ValueMode::DefaultOn => attr.unwrap_or("on").to_string(),
            ValueMode::Filename => String::new(),
        })
    }

    /// Set the `value` IDL attribute of an input
    pub fn set_input_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        let ty = self.require_input(id)?;
        let elem = self.require_element_mut(id)?;

        match ty.value_mode() {
            ValueMode::Value => {
                let sanitized = ty.sanitize(value, elem.get_attr("min"), elem.get_attr("max"));
                if let ControlState::Input { value, .. } = &mut elem.control {
                    *value = Some(sanitized);
                }
            }
            ValueMode::Default | ValueMode::DefaultOn => elem.set_attr("value", value),
            ValueMode::Filename => {
                if !value.is_empty() {
                    return Err(DomError::invalid_state(
                        "a file input's value may only be set to the empty string",
                    ));
                }
            }
        }
        Ok(())
    }

    /// The checkedness of an input
    pub fn checked(&self, id: NodeId) -> Option<bool> {
        let elem = self.element(id)?;
        match &elem.control {
            ControlState::Input { checked, .. } => Some(checked.unwrap_or_else(|| elem.has_attr("checked"))),
            _ => None,
        }
    }

    /// Set the checkedness of an input
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> DomResult<()> {
        self.require_input(id)?;
        if let ControlState::Input { checked: state, .. } = &mut self.require_element_mut(id)?.control {
            *state = Some(checked);
        }
        Ok(())
    }

    /// The `valueAsNumber` IDL attribute; NaN where it does not apply
    pub fn value_as_number(&self, id: NodeId) -> Option<f64> {
        let ty = self.input_type(id)?;
        if !ty.has_numeric_value() {
            return Some(f64::NAN);
        }
        let value = self.input_value(id)?;
        Some(parse_html_float(&value).unwrap_or(f64::NAN))
    }

    /// Set the `valueAsNumber` IDL attribute
    pub fn set_value_as_number(&mut self, id: NodeId, n: f64) -> DomResult<()> {
        let ty = self.require_input(id)?;
        if !ty.has_numeric_value() {
            return Err(DomError::invalid_state(format!(
                "valueAsNumber does not apply to input type '{}'",
                ty.as_str()
            )));
        }
        if !n.is_finite() {
            return Err(DomError::NotFinite);
        }
        self.set_input_value(id, &format_number(n))
    }
}
