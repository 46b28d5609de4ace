//! Select and Option Elements
//!
//! Option selectedness and the select element's `value`.

use crate::node::ControlState;
use crate::{DomResult, DomTree, NodeId};

impl DomTree {
    /// Options of a select: option children, and option children of optgroup children
    pub fn select_options(&self, select: NodeId) -> Vec<NodeId> {
        let mut options = Vec::new();
        for (child, _) in self.children(select) {
            if self.is_html_element(child, "option") {
                options.push(child);
            } else if self.is_html_element(child, "optgroup") {
                options.extend(
                    self.children(child)
                        .map(|(id, _)| id)
                        .filter(|&id| self.is_html_element(id, "option")),
                );
            }
        }
        options
    }

    /// The `value` of an option: its `value` attribute, else its stripped and collapsed text
    pub fn option_value(&self, option: NodeId) -> String {
        match self.get_attribute(option, "value") {
            Some(value) => value.to_string(),
            None => self
                .text_content(option)
                .split_ascii_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Whether an option or its optgroup is disabled
    pub fn option_disabled(&self, option: NodeId) -> bool {
        self.has_attribute(option, "disabled")
            || self
                .parent(option)
                .is_some_and(|p| self.is_html_element(p, "optgroup") && self.has_attribute(p, "disabled"))
    }

    fn explicit_selectedness(&self, option: NodeId) -> (Option<bool>, bool) {
        let dirty = match self.element(option).map(|e| &e.control) {
            Some(ControlState::Option { selected }) => *selected,
            _ => None,
        };
        (dirty, self.has_attribute(option, "selected"))
    }

    /// Selectedness of every option of a select, in option order
    pub fn selectedness(&self, select: NodeId) -> Vec<bool> {
        let options = self.select_options(select);
        let states: Vec<_> = options.iter().map(|&o| self.explicit_selectedness(o)).collect();

        if states.iter().any(|(dirty, _)| dirty.is_some()) {
            return states
                .into_iter()
                .map(|(dirty, attr)| dirty.unwrap_or(attr))
                .collect();
        }

        let multiple = self.has_attribute(select, "multiple");
        let display_size = self
            .get_attribute(select, "size")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(if multiple { 4 } else { 1 });

        let mut selected: Vec<bool> = states.iter().map(|&(_, attr)| attr).collect();
        if multiple {
            return selected;
        }

        // A single-select keeps only the last option marked selected.
        if let Some(last) = selected.iter().rposition(|&s| s) {
            selected.iter_mut().enumerate().for_each(|(i, s)| *s = i == last);
        } else if display_size == 1 {
            if let Some(first) = options.iter().position(|&o| !self.option_disabled(o)) {
                selected[first] = true;
            }
        }
        selected
    }

    /// The select's `value`: value of the first selected option, or `""`
    pub fn select_value(&self, select: NodeId) -> String {
        let options = self.select_options(select);
        self.selectedness(select)
            .into_iter()
            .zip(options)
            .find(|(selected, _)| *selected)
            .map(|(_, option)| self.option_value(option))
            .unwrap_or_default()
    }

    /// Select the first option whose value equals `value`; deselect all others
    pub fn set_select_value(&mut self, select: NodeId, value: &str) -> DomResult<()> {
        self.require_element(select)?;
        let options = self.select_options(select);
        let target = options.iter().position(|&o| self.option_value(o) == value);

        for (i, option) in options.into_iter().enumerate() {
            if let ControlState::Option { selected } = &mut self.require_element_mut(option)?.control {
                *selected = Some(Some(i) == target);
            }
        }
        if target.is_none() {
            tracing::trace!(value, "no option matched select value");
        }
        Ok(())
    }
}
