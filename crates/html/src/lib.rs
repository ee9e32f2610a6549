pub mod query;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

use memchr::{memchr, memchr2};

pub fn is_html(ct: &Option<String>) -> bool {
    let Some(value) = ct.as_deref() else {
        return false;
    };
    contains_ignore_ascii_case(value, b"text/html")
        || contains_ignore_ascii_case(value, b"application/xhtml")
}

fn contains_ignore_ascii_case(haystack: &str, needle: &[u8]) -> bool {
    let hay = haystack.as_bytes();
    let n = needle.len();
    if n == 0 {
        return true;
    }
    if hay.len() < n {
        return false;
    }
    let first = needle[0];
    let (a, b) = (first.to_ascii_lowercase(), first.to_ascii_uppercase());
    let mut i = 0;
    while i + n <= hay.len() {
        let rel = if a == b {
            memchr(a, &hay[i..])
        } else {
            memchr2(a, b, &hay[i..])
        };
        let Some(rel) = rel else {
            return false;
        };
        let pos = i + rel;
        if pos + n <= hay.len() && hay[pos..pos + n].eq_ignore_ascii_case(needle) {
            return true;
        }
        i = pos + 1;
    }
    false
}

/// Tokenize, build and number a document in one step.
pub fn parse_document(input: &str) -> Node {
    let mut dom = build_dom(&tokenize(input));
    traverse::assign_node_ids(&mut dom);
    dom
}

/// Text of the first `<title>` element, whitespace-collapsed.
pub fn document_title(dom: &Node) -> Option<String> {
    let title = traverse::elements_by_tag(dom, "title").into_iter().next()?;
    Some(
        title
            .text_content()
            .split_ascii_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
    )
}

pub use crate::dom_builder::build_dom;
pub use crate::query::{Selector, SelectorError};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, Node, NodeId, Token};
