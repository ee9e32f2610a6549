use crate::{Id, Node};

/// Number every node in preorder, starting at 1. The document root keeps `Id(0)`.
pub fn assign_node_ids(root: &mut Node) {
    let mut next = 1;
    let mut stack: Vec<&mut Node> = match root.children_mut() {
        Some(children) => children.iter_mut().rev().collect(),
        None => return,
    };
    while let Some(node) = stack.pop() {
        node.set_id(Id(next));
        next = next.wrapping_add(1);
        if let Some(children) = node.children_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
}

/// Visit every element below (and including) `root` in document order.
///
/// The callback returns `false` to skip an element's subtree. The walk keeps its own stack,
/// so nesting depth is bounded by memory rather than by the thread's stack.
pub fn walk_elements<'a>(root: &'a Node, f: &mut impl FnMut(&'a Node) -> bool) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let descend = match node {
            Node::Element { .. } => f(node),
            Node::Document { .. } => true,
            Node::Text { .. } | Node::Comment { .. } => false,
        };
        if descend {
            stack.extend(node.children().iter().rev());
        }
    }
}

/// All elements named `tag` in document order.
pub fn elements_by_tag<'a>(root: &'a Node, tag: &str) -> Vec<&'a Node> {
    let mut out = Vec::new();
    walk_elements(root, &mut |n| {
        if n.is_element(tag) {
            out.push(n);
        }
        true
    });
    out
}
