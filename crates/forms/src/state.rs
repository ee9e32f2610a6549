use crate::catalog::FieldCatalog;
use std::collections::HashMap;

/// Which fields currently contribute to a submission, and with what values.
///
/// A key is present exactly when the field is active; stored value lists are never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmissionState {
    values: HashMap<String, Vec<String>>,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Seed from catalog defaults: text always, radios/checkboxes when checked, selects with
    /// their default-selected options.
    pub fn from_catalog(catalog: &FieldCatalog) -> Self {
        let mut state = Self::new();
        for field in catalog.fields() {
            state.replace(field.name(), field.initial_values());
        }
        state
    }

    /// Returns `true` if the field has an entry (will be submitted).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Active values for `name`; empty when the field is inactive.
    pub fn values(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), vec![value.into()]);
    }

    /// Replace the whole value list; an empty list deactivates the field.
    pub fn replace(&mut self, name: &str, values: Vec<String>) {
        if values.is_empty() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), values);
        }
    }

    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.values.remove(name).is_some()
    }

    /// Remove the first occurrence of `value`, keeping the order of the rest.
    ///
    /// Returns `true` if the value was active.
    pub fn remove_value(&mut self, name: &str, value: &str) -> bool {
        let Some(values) = self.values.get_mut(name) else {
            return false;
        };
        let Some(pos) = values.iter().position(|v| v == value) else {
            return false;
        };
        values.remove(pos);
        if values.is_empty() {
            self.values.remove(name);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
