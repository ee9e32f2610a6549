use crate::catalog::{Button, Field, FieldCatalog, Select};
use crate::error::{FormError, ParseError};
use crate::state::SubmissionState;
use crate::submit::{SubmitError, Submission, Submitter};
use core_types::{EncType, Method};
use html::Node;
use std::collections::HashMap;

/// One HTML form: its immutable field catalog plus the mutable submission state.
///
/// Every mutation is checked against the catalog first; a failed call returns
/// [`FormError::ElementNotFound`] and leaves the state exactly as it was.
///
/// Selects also remember which options are selected, since options may share a value while
/// carrying different labels.
#[derive(Clone, Debug)]
pub struct Form {
    name: Option<String>,
    id: Option<String>,
    method: Method,
    action: String,
    enctype: EncType,
    catalog: FieldCatalog,
    initial: SubmissionState,
    state: SubmissionState,
    // Option indices per active select, parallel to that select's values in `state`.
    selected: HashMap<String, Vec<usize>>,
}

impl Form {
    /// Build a form from its `<form>` element.
    pub fn from_node(node: &Node) -> Result<Self, ParseError> {
        if !node.is_element("form") {
            return Err(ParseError {
                found: node.tag_name().map(str::to_string),
            });
        }

        let catalog = FieldCatalog::from_form(node);
        let initial = SubmissionState::from_catalog(&catalog);
        log::debug!(
            target: "forms.catalog",
            "form {:?}: {} fields, {} buttons",
            node.attr("name").or(node.attr("id")).unwrap_or(""),
            catalog.fields().len(),
            catalog.buttons().len()
        );

        Ok(Self {
            name: node.attr("name").map(str::to_string),
            id: node.attr("id").map(str::to_string),
            method: Method::from_attr(node.attr("method")),
            action: node.attr("action").unwrap_or("").trim().to_string(),
            enctype: EncType::from_attr(node.attr("enctype")),
            state: initial.clone(),
            initial,
            selected: default_selection(&catalog),
            catalog,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The `action` attribute as written (empty when missing).
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn enctype(&self) -> EncType {
        self.enctype
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Field names in document order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.catalog.fields().iter().map(Field::name)
    }

    pub fn buttons(&self) -> &[Button] {
        self.catalog.buttons()
    }

    /// Restore the state the form had when it was parsed.
    pub fn reset(&mut self) {
        self.state = self.initial.clone();
        self.selected = default_selection(&self.catalog);
    }

    fn field(&self, name: &str) -> Result<&Field, FormError> {
        self.catalog.field(name).ok_or_else(|| FormError::field(name))
    }

    fn select(&self, name: &str) -> Result<&Select, FormError> {
        self.catalog.select(name).ok_or_else(|| FormError::select(name))
    }

    fn checkbox_value(&self, name: &str) -> Result<&str, FormError> {
        self.catalog
            .checkbox_value(name)
            .ok_or_else(|| FormError::checkbox(name))
    }

    /// Change the value of a field that is already active.
    ///
    /// Radio groups and checkboxes that are not yet active must be activated with
    /// [`Form::set`] or [`Form::check`] first.
    pub fn input(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        if !self.state.contains(name) {
            return Err(FormError::inactive(name));
        }
        self.set(name, value)
    }

    /// Create or overwrite a field's value, activating it if it was inactive.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let field = self.field(name)?;
        if !field.accepts(value) {
            return Err(FormError::value(name, value));
        }
        let option = match field {
            Field::Select(select) => select.position_of_value(value),
            _ => None,
        };
        log::trace!(target: "forms.state", "set {name}={value:?}");
        self.state.set(name, value);
        if let Some(index) = option {
            self.selected.insert(name.to_string(), vec![index]);
        }
        Ok(())
    }

    /// Deactivate a field so it is left out of the submission.
    pub fn remove(&mut self, name: &str) -> Result<(), FormError> {
        self.field(name)?;
        self.state.remove(name);
        self.selected.remove(name);
        Ok(())
    }

    /// The single active value of a field.
    pub fn value(&self, name: &str) -> Result<&str, FormError> {
        self.field(name)?;
        match self.state.values(name) {
            [value] => Ok(value.as_str()),
            [] => Err(FormError::inactive(name)),
            _ => Err(FormError::multiple_values(name)),
        }
    }

    pub fn check(&mut self, name: &str) -> Result<(), FormError> {
        let value = self.checkbox_value(name)?.to_string();
        self.state.set(name, value);
        Ok(())
    }

    pub fn uncheck(&mut self, name: &str) -> Result<(), FormError> {
        self.checkbox_value(name)?;
        self.state.remove(name);
        Ok(())
    }

    /// Whether the checkbox is checked. Unknown checkboxes are an error, not `false`.
    pub fn is_checked(&self, name: &str) -> Result<bool, FormError> {
        self.checkbox_value(name)?;
        Ok(self.state.contains(name))
    }

    /// Select options by value, replacing the current selection. The resulting order is the
    /// order of `values`, not document order.
    ///
    /// A value shared by several options picks the first of them; naming the same option
    /// twice is an error.
    pub fn select_by_option_value(&mut self, name: &str, values: &[&str]) -> Result<(), FormError> {
        self.select_options(name, values, Select::position_of_value, FormError::option_value)
    }

    /// Select options by their label, replacing the current selection in call order.
    pub fn select_by_option_label(&mut self, name: &str, labels: &[&str]) -> Result<(), FormError> {
        self.select_options(name, labels, Select::position_of_label, FormError::option_label)
    }

    fn select_options(
        &mut self,
        name: &str,
        wanted: &[&str],
        position: fn(&Select, &str) -> Option<usize>,
        missing: fn(&str, &str) -> FormError,
    ) -> Result<(), FormError> {
        let select = self.select(name)?;
        if wanted.len() > 1 && !select.multiple {
            return Err(FormError::not_multiple(name));
        }
        let mut indices = Vec::with_capacity(wanted.len());
        for &option in wanted {
            let index = position(select, option).ok_or_else(|| missing(name, option))?;
            if indices.contains(&index) {
                return Err(FormError::repeated_option(name, option));
            }
            indices.push(index);
        }
        let values = indices
            .iter()
            .map(|&i| select.options[i].value.clone())
            .collect();

        self.state.replace(name, values);
        if indices.is_empty() {
            self.selected.remove(name);
        } else {
            self.selected.insert(name.to_string(), indices);
        }
        Ok(())
    }

    /// Currently selected values, in the order they were selected.
    pub fn select_values(&self, name: &str) -> Result<Vec<String>, FormError> {
        self.select(name)?;
        Ok(self.state.values(name).to_vec())
    }

    /// Labels of the currently selected options, in the order they were selected.
    pub fn select_labels(&self, name: &str) -> Result<Vec<String>, FormError> {
        let select = self.select(name)?;
        Ok(self
            .selected
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|&i| select.options.get(i))
            .map(|o| o.label.clone())
            .collect())
    }

    /// Deselect one value of a multiple select, keeping the order of the others. When two
    /// selected options share the value, the earlier selection goes.
    pub fn remove_value(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        if !self.select(name)?.multiple {
            return Err(FormError::not_multiple(name));
        }
        let Some(pos) = self.state.values(name).iter().position(|v| v == value) else {
            return Err(FormError::not_selected(name, value));
        };
        self.state.remove_value(name, value);

        let emptied = match self.selected.get_mut(name) {
            Some(indices) if pos < indices.len() => {
                indices.remove(pos);
                indices.is_empty()
            }
            _ => false,
        };
        if emptied {
            self.selected.remove(name);
        }
        Ok(())
    }

    /// The form data set without any button: fields in document order, multi-valued fields
    /// in selection order.
    pub fn data_set(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for field in self.catalog.fields() {
            let name = field.name();
            for value in self.state.values(name) {
                pairs.push((name.to_string(), value.clone()));
            }
        }
        pairs
    }

    fn submission(&self, button: Option<&Button>) -> Submission {
        let mut pairs = self.data_set();
        if let Some(button) = button {
            pairs.push((button.name.clone(), button.value.clone()));
        }
        Submission {
            method: self.method,
            action: self.action.clone(),
            enctype: self.enctype,
            pairs,
        }
    }

    /// The submission produced by clicking the first button named `name`.
    pub fn submission_for_click(&self, name: &str) -> Result<Submission, FormError> {
        let button = self
            .catalog
            .button(name)
            .ok_or_else(|| FormError::button(name))?;
        Ok(self.submission(Some(button)))
    }

    /// The submission produced by clicking the button with this exact name and value.
    pub fn submission_for_click_by_value(
        &self,
        name: &str,
        value: &str,
    ) -> Result<Submission, FormError> {
        let button = self
            .catalog
            .button_with_value(name, value)
            .ok_or_else(|| FormError::button_value(name, value))?;
        Ok(self.submission(Some(button)))
    }

    /// The submission produced by submitting without naming a button.
    ///
    /// Uses the form's default button, which is the first button in document order; a form
    /// without buttons submits its fields alone.
    pub fn submission_for_submit(&self) -> Submission {
        let buttons = self.catalog.buttons();
        if buttons.len() > 1 {
            log::debug!(
                target: "forms.submit",
                "{} buttons, submitting with the first ('{}')",
                buttons.len(),
                buttons[0].name
            );
        }
        self.submission(buttons.first())
    }

    pub fn click<S: Submitter>(
        &self,
        submitter: &mut S,
        name: &str,
    ) -> Result<(), SubmitError<S::Error>> {
        let submission = self.submission_for_click(name)?;
        send(submitter, submission)
    }

    pub fn click_by_value<S: Submitter>(
        &self,
        submitter: &mut S,
        name: &str,
        value: &str,
    ) -> Result<(), SubmitError<S::Error>> {
        let submission = self.submission_for_click_by_value(name, value)?;
        send(submitter, submission)
    }

    pub fn submit<S: Submitter>(&self, submitter: &mut S) -> Result<(), SubmitError<S::Error>> {
        send(submitter, self.submission_for_submit())
    }
}

fn default_selection(catalog: &FieldCatalog) -> HashMap<String, Vec<usize>> {
    catalog
        .fields()
        .iter()
        .filter_map(|field| match field {
            Field::Select(select) => {
                let positions = select.default_positions();
                (!positions.is_empty()).then(|| (select.name.clone(), positions))
            }
            _ => None,
        })
        .collect()
}

fn send<S: Submitter>(
    submitter: &mut S,
    submission: Submission,
) -> Result<(), SubmitError<S::Error>> {
    log::debug!(
        target: "forms.submit",
        "{} {:?} with {} pairs",
        submission.method,
        submission.action,
        submission.pairs.len()
    );
    submitter.submit(submission).map_err(SubmitError::Submitter)
}
