use html::Node;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlType {
    Text,
    Textarea,
    Checkbox,
    Radio,
    Select,
    Submit,
    Other,
}

/// `<input type>` values whose state is a single free-form string.
const TEXTUAL_INPUT_TYPES: &[&str] = &[
    "text",
    "hidden",
    "password",
    "email",
    "search",
    "tel",
    "url",
    "number",
    "range",
    "color",
    "date",
    "datetime-local",
    "month",
    "week",
    "time",
];

pub fn control_type(node: &Node) -> ControlType {
    let Some(tag) = node.tag_name() else {
        return ControlType::Other;
    };

    match tag {
        "textarea" => ControlType::Textarea,
        "select" => ControlType::Select,
        "button" => match node.attr("type").map(str::trim).filter(|t| !t.is_empty()) {
            None => ControlType::Submit, // missing type defaults to submit
            Some(t) if t.eq_ignore_ascii_case("submit") => ControlType::Submit,
            Some(_) => ControlType::Other,
        },
        "input" => match node.attr("type").map(str::trim).filter(|t| !t.is_empty()) {
            None => ControlType::Text, // missing type defaults to text
            Some(t) if t.eq_ignore_ascii_case("checkbox") => ControlType::Checkbox,
            Some(t) if t.eq_ignore_ascii_case("radio") => ControlType::Radio,
            Some(t) if t.eq_ignore_ascii_case("submit") => ControlType::Submit,
            Some(t) if TEXTUAL_INPUT_TYPES.iter().any(|k| t.eq_ignore_ascii_case(k)) => {
                ControlType::Text
            }
            Some(_) => ControlType::Other,
        },
        _ => ControlType::Other,
    }
}

/// The control's `name`, if present and non-empty.
pub(crate) fn control_name(node: &Node) -> Option<&str> {
    node.attr("name").filter(|n| !n.is_empty())
}

/// `value` attribute for checkable inputs; browsers submit `on` when it is missing.
pub(crate) fn checkable_value(node: &Node) -> String {
    node.attr("value").unwrap_or("on").to_string()
}

pub(crate) fn textarea_default(node: &Node) -> String {
    let mut initial = normalize_textarea_newlines(&node.text_content());
    // HTML textarea parsing: if the first character is a newline, strip it.
    if initial.starts_with('\n') {
        initial.remove(0);
    }
    initial
}

fn normalize_textarea_newlines(s: &str) -> String {
    // Normalize CRLF/CR to LF. (Browsers store textarea values with LF newlines.)
    if !s.contains('\r') {
        return s.to_string();
    }
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Strip and collapse ASCII whitespace, as done for `<option>` text.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}
