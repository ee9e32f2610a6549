//! Minimal CSS selector matching for locating forms and controls.
//!
//! Supported: comma-separated lists of compound selectors made of a tag name or `*`, `#id`,
//! `.class`, `[attr]` and `[attr=value]` (value bare, single- or double-quoted).
//! Combinators and pseudo-classes are rejected with a [`SelectorError`].
use crate::Node;
use crate::traverse::walk_elements;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported selector '{}': {}", self.selector, self.reason)
    }
}

impl std::error::Error for SelectorError {}

#[derive(Clone, Debug, PartialEq, Eq)]
enum AttrCondition {
    Exists(String),
    Eq(String, String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        let Some(tag) = node.tag_name() else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| !t.eq_ignore_ascii_case(tag)) {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| node.attr("id") != Some(id)) {
            return false;
        }
        if !self
            .classes
            .iter()
            .all(|c| node.attr("class").is_some_and(|v| v.split_ascii_whitespace().any(|t| t == c)))
        {
            return false;
        }
        self.attrs.iter().all(|cond| match cond {
            AttrCondition::Exists(name) => node.has_attr(name),
            AttrCondition::Eq(name, value) => node.attr(name) == Some(value.as_str()),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let fail = |reason: &str| SelectorError {
            selector: input.to_string(),
            reason: reason.to_string(),
        };

        let mut alternatives = Vec::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(fail("empty selector"));
            }
            alternatives.push(parse_compound(part).map_err(|reason| fail(&reason))?);
        }
        Ok(Self { alternatives })
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.alternatives.iter().any(|c| c.matches(node))
    }

    /// Every matching element under `root`, in document order.
    pub fn select_all<'a>(&self, root: &'a Node) -> Vec<&'a Node> {
        let mut out = Vec::new();
        walk_elements(root, &mut |n| {
            if self.matches(n) {
                out.push(n);
            }
            true
        });
        out
    }

    pub fn select_first<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        let mut found = None;
        walk_elements(root, &mut |n| {
            if found.is_none() && self.matches(n) {
                found = Some(n);
            }
            found.is_none()
        });
        found
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_compound(part: &str) -> Result<Compound, String> {
    let mut compound = Compound::default();
    let mut rest = part;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else {
        let (tag, after) = take_ident(rest);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
            rest = after;
        }
    }

    while let Some(c) = rest.chars().next() {
        match c {
            '#' | '.' => {
                let (ident, after) = take_ident(&rest[1..]);
                if ident.is_empty() {
                    return Err(format!("expected a name after '{c}'"));
                }
                if c == '#' {
                    compound.id = Some(ident.to_string());
                } else {
                    compound.classes.push(ident.to_string());
                }
                rest = after;
            }
            '[' => {
                let close = rest.find(']').ok_or("unterminated attribute selector")?;
                compound.attrs.push(parse_attr(&rest[1..close])?);
                rest = &rest[close + 1..];
            }
            c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                return Err("combinators are not supported".to_string());
            }
            ':' => return Err("pseudo-classes are not supported".to_string()),
            other => return Err(format!("unexpected character '{other}'")),
        }
    }

    Ok(compound)
}

fn parse_attr(inner: &str) -> Result<AttrCondition, String> {
    let Some((name, value)) = inner.split_once('=') else {
        let name = inner.trim();
        if name.is_empty() {
            return Err("empty attribute name".to_string());
        }
        return Ok(AttrCondition::Exists(name.to_ascii_lowercase()));
    };

    let name = name.trim();
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(format!("invalid attribute name '{name}'"));
    }
    let value = value.trim();
    let unquoted = match value.as_bytes().first() {
        Some(&q @ (b'"' | b'\'')) => value
            .strip_prefix(q as char)
            .and_then(|v| v.strip_suffix(q as char))
            .ok_or("unterminated quoted attribute value")?,
        _ => value,
    };
    Ok(AttrCondition::Eq(
        name.to_ascii_lowercase(),
        unquoted.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    const PAGE: &str = r#"
        <form id="login" class="auth wide" name="default" method="post"></form>
        <form name='search'></form>
        <div data-role></div>
    "#;

    #[test]
    fn matches_attribute_selectors_with_quotes() {
        let dom = parse_document(PAGE);
        for sel in ["[name='default']", "[name=\"default\"]", "form[name=default]"] {
            let found = Selector::parse(sel).unwrap().select_first(&dom);
            assert_eq!(found.and_then(|n| n.attr("id")), Some("login"), "{sel}");
        }
    }

    #[test]
    fn matches_id_class_and_existence() {
        let dom = parse_document(PAGE);
        let sel = Selector::parse("#login.auth.wide").unwrap();
        assert_eq!(sel.select_all(&dom).len(), 1);
        let sel = Selector::parse("[data-role]").unwrap();
        assert_eq!(sel.select_first(&dom).and_then(Node::tag_name), Some("div"));
        let sel = Selector::parse(".missing").unwrap();
        assert!(sel.select_first(&dom).is_none());
    }

    #[test]
    fn selector_lists_match_in_document_order() {
        let dom = parse_document(PAGE);
        let sel = Selector::parse("form[name=search], #login").unwrap();
        let names: Vec<_> = sel
            .select_all(&dom)
            .into_iter()
            .filter_map(|n| n.attr("name"))
            .collect();
        assert_eq!(names, vec!["default", "search"]);
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert!(Selector::parse("form input").is_err());
        assert!(Selector::parse("input:checked").is_err());
        assert!(Selector::parse("[name='x]").is_err());
        assert!(Selector::parse("a,,b").is_err());
        let err = Selector::parse("div > p").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported selector 'div > p': combinators are not supported"
        );
    }
}
