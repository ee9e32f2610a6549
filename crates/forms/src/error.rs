use std::fmt;

/// The one failure kind of the form API: something the caller named does not exist (or is
/// not allowed) in the form's field catalog. Failed operations never modify form state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    ElementNotFound(String),
}

impl FormError {
    pub(crate) fn field(name: &str) -> Self {
        Self::ElementNotFound(format!("No field found with name '{name}'."))
    }

    pub(crate) fn inactive(name: &str) -> Self {
        Self::ElementNotFound(format!("No active field found with name '{name}'."))
    }

    pub(crate) fn checkbox(name: &str) -> Self {
        Self::ElementNotFound(format!("No checkbox found with name '{name}'."))
    }

    pub(crate) fn select(name: &str) -> Self {
        Self::ElementNotFound(format!("No select element found with name '{name}'."))
    }

    pub(crate) fn not_multiple(name: &str) -> Self {
        Self::ElementNotFound(format!(
            "The select element with name '{name}' is not a select multiple."
        ))
    }

    pub(crate) fn option_value(name: &str, value: &str) -> Self {
        Self::ElementNotFound(format!(
            "No option with value '{value}' found in select '{name}'."
        ))
    }

    pub(crate) fn option_label(name: &str, label: &str) -> Self {
        Self::ElementNotFound(format!(
            "No option with label '{label}' found in select '{name}'."
        ))
    }

    pub(crate) fn repeated_option(name: &str, option: &str) -> Self {
        Self::ElementNotFound(format!(
            "Option '{option}' is selected more than once in select '{name}'."
        ))
    }

    pub(crate) fn not_selected(name: &str, value: &str) -> Self {
        Self::ElementNotFound(format!(
            "Value '{value}' is not selected in select '{name}'."
        ))
    }

    pub(crate) fn value(name: &str, value: &str) -> Self {
        Self::ElementNotFound(format!(
            "Value '{value}' is not allowed for field '{name}'."
        ))
    }

    pub(crate) fn multiple_values(name: &str) -> Self {
        Self::ElementNotFound(format!(
            "Field '{name}' holds more than one value; use select_values instead."
        ))
    }

    pub(crate) fn button(name: &str) -> Self {
        Self::ElementNotFound(format!("No button found with name '{name}'."))
    }

    pub(crate) fn button_value(name: &str, value: &str) -> Self {
        Self::ElementNotFound(format!(
            "No button found with name '{name}' and value '{value}'."
        ))
    }

    pub fn message(&self) -> &str {
        match self {
            FormError::ElementNotFound(msg) => msg,
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FormError {}

/// Returned when a node handed to [`crate::Form::from_node`] is not a `<form>` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub found: Option<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(tag) => write!(f, "expected a <form> element, found <{tag}>"),
            None => f.write_str("expected a <form> element, found a non-element node"),
        }
    }
}

impl std::error::Error for ParseError {}
