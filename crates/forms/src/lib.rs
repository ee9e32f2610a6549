//! HTML form model: a read-only catalog of a form's controls, the mutable set of values that
//! will be submitted, and construction of the form data set for a chosen submit button.

mod catalog;
mod dom;
mod error;
mod form;
mod state;
mod submit;

pub use catalog::{Button, Field, FieldCatalog, Select, SelectOption};
pub use dom::{ControlType, control_type};
pub use error::{FormError, ParseError};
pub use form::Form;
pub use state::SubmissionState;
pub use submit::{SubmitError, Submission, Submitter};

pub use core_types::{EncType, Method};

/// Every `<form>` element under `root`, in document order.
pub fn forms_in(root: &html::Node) -> Vec<Form> {
    html::traverse::elements_by_tag(root, "form")
        .into_iter()
        .filter_map(|node| Form::from_node(node).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::parse_document;

    #[test]
    fn finds_forms_in_document_order() {
        let dom = parse_document(
            r#"<form name="a"><input name="x"></form>
               <div><form id="b" method="post"></form></div>"#,
        );
        let forms = forms_in(&dom);
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].name(), Some("a"));
        assert_eq!(forms[1].id(), Some("b"));
        assert_eq!(forms[1].method(), Method::Post);
    }

    #[test]
    fn finds_controls_under_deeply_nested_markup() {
        let depth = 100_000;
        let html = format!(
            "<form>{}<input name=a value=1>{}</form>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let dom = parse_document(&html);
        let forms = forms_in(&dom);
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].fields().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(forms[0].submission_for_submit().encode(), "a=1");
    }
}
