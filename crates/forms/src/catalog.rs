//! Immutable registry of a form's named controls, built once from the parsed document.

use crate::dom::{
    ControlType, checkable_value, collapse_whitespace, control_name, control_type,
    textarea_default,
};
use html::Node;
use html::traverse::walk_elements;
use std::collections::HashMap;

/// One `<option>` of a select.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub default_selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Select {
    pub name: String,
    pub multiple: bool,
    pub options: Vec<SelectOption>,
}

impl Select {
    /// Build a select from its element, collecting options (including those inside
    /// `<optgroup>`) in document order.
    fn from_node(name: &str, node: &Node) -> Self {
        let multiple = node.has_attr("multiple");
        let mut options = Vec::new();
        walk_elements(node, &mut |n| {
            if !n.is_element("option") {
                return true;
            }
            let text = collapse_whitespace(&n.text_content());
            let value = n.attr("value").map_or_else(|| text.clone(), str::to_string);
            let label = n.attr("label").map_or(text, str::to_string);
            options.push(SelectOption {
                value,
                label,
                default_selected: n.has_attr("selected"),
            });
            false
        });

        // A single-choice select keeps only the last `selected` mark.
        if !multiple
            && let Some(last) = options.iter().rposition(|o| o.default_selected)
        {
            for (i, o) in options.iter_mut().enumerate() {
                o.default_selected = i == last;
            }
        }

        Self {
            name: name.to_string(),
            multiple,
            options,
        }
    }

    /// Index of the first option with this value. Several options may share a value.
    pub fn position_of_value(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }

    pub fn position_of_label(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|o| o.label == label)
    }

    /// Indices of default-selected options, in document order.
    pub fn default_positions(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.default_selected)
            .map(|(i, _)| i)
            .collect()
    }

    /// Values of default-selected options, in document order.
    pub fn default_values(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|o| o.default_selected)
            .map(|o| o.value.clone())
            .collect()
    }
}

/// Catalog entry for one submittable field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Text {
        name: String,
        default_value: String,
    },
    RadioGroup {
        name: String,
        values: Vec<String>,
        default_value: Option<String>,
    },
    /// Same-named checkboxes collapse into one on/off field whose value is the first
    /// declaration's `value`.
    Checkbox {
        name: String,
        value: String,
        checked: bool,
    },
    Select(Select),
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Text { name, .. }
            | Field::RadioGroup { name, .. }
            | Field::Checkbox { name, .. } => name,
            Field::Select(select) => &select.name,
        }
    }

    /// Values this field contributes before any mutation.
    pub fn initial_values(&self) -> Vec<String> {
        match self {
            Field::Text { default_value, .. } => vec![default_value.clone()],
            Field::RadioGroup { default_value, .. } => default_value.iter().cloned().collect(),
            Field::Checkbox { value, checked, .. } => {
                if *checked {
                    vec![value.clone()]
                } else {
                    Vec::new()
                }
            }
            Field::Select(select) => select.default_values(),
        }
    }

    /// Whether `value` is something this control could hold.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Field::Text { .. } => true,
            Field::RadioGroup { values, .. } => values.iter().any(|v| v == value),
            Field::Checkbox { value: own, .. } => own == value,
            Field::Select(select) => select.position_of_value(value).is_some(),
        }
    }
}

/// A submit control. Never part of the submission state; chosen per submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
    buttons: Vec<Button>,
}

impl FieldCatalog {
    /// Walk a `<form>` element's subtree once and register every named control.
    ///
    /// Unsupported controls, unnamed controls, disabled controls and controls inside a
    /// disabled `<fieldset>` are skipped.
    pub fn from_form(form: &Node) -> Self {
        let mut catalog = Self::default();
        let root_id = form.id();

        walk_elements(form, &mut |node| {
            if node.id() != root_id
                && node.is_element("fieldset")
                && node.has_attr("disabled")
            {
                return false;
            }

            let kind = control_type(node);
            if kind == ControlType::Other {
                return true;
            }
            let Some(name) = control_name(node) else {
                return kind != ControlType::Select;
            };
            if node.has_attr("disabled") {
                log::trace!(target: "forms.catalog", "skipping disabled control '{name}'");
                return kind != ControlType::Select;
            }

            match kind {
                ControlType::Text => catalog.register(Field::Text {
                    name: name.to_string(),
                    default_value: node.attr("value").unwrap_or("").to_string(),
                }),
                ControlType::Textarea => catalog.register(Field::Text {
                    name: name.to_string(),
                    default_value: textarea_default(node),
                }),
                ControlType::Radio => {
                    catalog.register_radio(name, checkable_value(node), node.has_attr("checked"))
                }
                ControlType::Checkbox => catalog.register_checkbox(
                    name,
                    checkable_value(node),
                    node.has_attr("checked"),
                ),
                ControlType::Select => {
                    catalog.register(Field::Select(Select::from_node(name, node)));
                    return false;
                }
                ControlType::Submit => catalog.buttons.push(Button {
                    name: name.to_string(),
                    value: node.attr("value").unwrap_or("").to_string(),
                }),
                ControlType::Other => {}
            }
            true
        });

        catalog
    }

    fn register(&mut self, field: Field) {
        let name = field.name();
        if self.by_name.contains_key(name) {
            log::debug!(target: "forms.catalog", "ignoring duplicate control named '{name}'");
            return;
        }
        self.by_name.insert(name.to_string(), self.fields.len());
        self.fields.push(field);
    }

    fn register_radio(&mut self, name: &str, value: String, checked: bool) {
        let Some(&index) = self.by_name.get(name) else {
            self.register(Field::RadioGroup {
                name: name.to_string(),
                default_value: checked.then(|| value.clone()),
                values: vec![value],
            });
            return;
        };

        let Field::RadioGroup {
            values,
            default_value,
            ..
        } = &mut self.fields[index]
        else {
            log::debug!(target: "forms.catalog", "radio '{name}' clashes with another control");
            return;
        };
        if checked {
            // Last checked radio of a group wins, as when a browser parses the page.
            *default_value = Some(value.clone());
        }
        if !values.contains(&value) {
            values.push(value);
        }
    }

    fn register_checkbox(&mut self, name: &str, value: String, checked: bool) {
        let Some(&index) = self.by_name.get(name) else {
            self.register(Field::Checkbox {
                name: name.to_string(),
                value,
                checked,
            });
            return;
        };

        match &mut self.fields[index] {
            Field::Checkbox { checked: seen, .. } => *seen |= checked,
            _ => {
                log::debug!(target: "forms.catalog", "checkbox '{name}' clashes with another control");
            }
        }
    }

    /// Fields in the order their names were first seen in the document.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// The declared value of the checkbox named `name`.
    pub fn checkbox_value(&self, name: &str) -> Option<&str> {
        match self.field(name)? {
            Field::Checkbox { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn select(&self, name: &str) -> Option<&Select> {
        match self.field(name)? {
            Field::Select(select) => Some(select),
            _ => None,
        }
    }

    /// Buttons in document order; names may repeat.
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button(&self, name: &str) -> Option<&Button> {
        self.buttons.iter().find(|b| b.name == name)
    }

    pub fn button_with_value(&self, name: &str, value: &str) -> Option<&Button> {
        self.buttons
            .iter()
            .find(|b| b.name == name && b.value == value)
    }
}
