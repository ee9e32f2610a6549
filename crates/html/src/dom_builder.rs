use crate::types::{Id, Node, Token};

/// Build a document tree from a token list.
///
/// Tree construction is deliberately forgiving: it knows just enough about implied end tags
/// (`option`, `optgroup`, `li`, `p`, table rows/cells) for form markup to nest the way browsers
/// nest it, and stray end tags that match no open element are ignored.
pub fn build_dom(tokens: &[Token]) -> Node {
    let mut arena = NodeArena::new();
    let root_index = arena.push(ArenaNode::Document {
        doctype: None,
        children: Vec::new(),
    });

    let mut open_elements: Vec<usize> = Vec::new();

    for token in tokens {
        match token {
            Token::Doctype(s) => {
                arena.set_doctype(root_index, s.clone());
            }
            Token::Comment(c) => {
                let parent_index = open_elements.last().copied().unwrap_or(root_index);
                arena.add_child(parent_index, ArenaNode::Comment { text: c.clone() });
            }
            Token::Text(txt) => {
                if !txt.is_empty() {
                    let parent_index = open_elements.last().copied().unwrap_or(root_index);
                    arena.add_child(parent_index, ArenaNode::Text { text: txt.clone() });
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                close_implied(&arena, &mut open_elements, name);

                let parent_index = open_elements.last().copied().unwrap_or(root_index);
                let new_index = arena.add_child(
                    parent_index,
                    ArenaNode::Element {
                        name: name.clone(),
                        attributes: attributes.clone(),
                        children: Vec::new(),
                    },
                );

                if !*self_closing {
                    open_elements.push(new_index);
                }
            }
            Token::EndTag(name) => {
                let Some(pos) = open_elements
                    .iter()
                    .rposition(|&index| arena.is_element_named(index, name))
                else {
                    log::trace!(target: "html.tree", "ignoring stray end tag </{name}>");
                    continue;
                };
                open_elements.truncate(pos);
            }
        }
    }

    arena.into_dom(root_index)
}

/// Pop elements whose end tag is implied by the start tag `incoming`.
fn close_implied(arena: &NodeArena, open_elements: &mut Vec<usize>, incoming: &str) {
    let closes: &[&str] = match incoming {
        "option" => &["option"],
        "optgroup" => &["option", "optgroup"],
        "li" => &["li"],
        "dt" | "dd" => &["dt", "dd"],
        "tr" => &["td", "th", "tr"],
        "td" | "th" => &["td", "th"],
        "p" | "div" | "form" | "fieldset" | "table" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4"
        | "h5" | "h6" => &["p"],
        _ => return,
    };

    while let Some(&top) = open_elements.last() {
        if closes.iter().any(|name| arena.is_element_named(top, name)) {
            open_elements.pop();
        } else {
            break;
        }
    }
}

#[derive(Debug)]
enum ArenaNode {
    Document {
        doctype: Option<String>,
        children: Vec<usize>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl ArenaNode {
    fn children(&self) -> Option<&[usize]> {
        match self {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                Some(children)
            }
            ArenaNode::Text { .. } | ArenaNode::Comment { .. } => None,
        }
    }
}

#[derive(Debug)]
struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    fn add_child(&mut self, parent_index: usize, child: ArenaNode) -> usize {
        let child_index = self.push(child);
        if let ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } =
            &mut self.nodes[parent_index]
        {
            children.push(child_index);
        }
        child_index
    }

    fn set_doctype(&mut self, root_index: usize, value: String) {
        if let ArenaNode::Document { doctype, .. } = &mut self.nodes[root_index] {
            *doctype = Some(value);
        }
    }

    fn is_element_named(&self, node_index: usize, target: &str) -> bool {
        match &self.nodes[node_index] {
            ArenaNode::Element { name, .. } => name.eq_ignore_ascii_case(target),
            _ => false,
        }
    }

    /// Convert the arena into an owned tree without recursion, so deep nesting cannot overflow
    /// the stack. Ids are left at `Id(0)`; see `traverse::assign_node_ids`.
    fn into_dom(self, root_index: usize) -> Node {
        let mut nodes = self.nodes;
        let mut built: Vec<Node> = Vec::with_capacity(nodes.len());

        fn take_children(n: usize, built: &mut Vec<Node>) -> Vec<Node> {
            built.split_off(built.len() - n)
        }

        // Postorder: a node is finalised on its second visit, at which point its direct
        // children are the last `child_count` entries of `built`, in document order.
        let mut stack: Vec<(usize, bool)> = vec![(root_index, false)];

        while let Some((node_index, visited)) = stack.pop() {
            if !visited {
                stack.push((node_index, true));
                if let Some(children) = nodes[node_index].children() {
                    for &child_index in children.iter().rev() {
                        stack.push((child_index, false));
                    }
                }
                continue;
            }

            let node = match &mut nodes[node_index] {
                ArenaNode::Document { doctype, children } => Node::Document {
                    id: Id(0),
                    doctype: doctype.take(),
                    children: take_children(children.len(), &mut built),
                },
                ArenaNode::Element {
                    name,
                    attributes,
                    children,
                } => Node::Element {
                    id: Id(0),
                    name: std::mem::take(name),
                    attributes: std::mem::take(attributes),
                    children: take_children(children.len(), &mut built),
                },
                ArenaNode::Text { text } => Node::Text {
                    id: Id(0),
                    text: std::mem::take(text),
                },
                ArenaNode::Comment { text } => Node::Comment {
                    id: Id(0),
                    text: std::mem::take(text),
                },
            };

            built.push(node);
        }

        debug_assert_eq!(built.len(), 1, "dom builder should build exactly one root");
        built.pop().unwrap_or(Node::Document {
            id: Id(0),
            doctype: None,
            children: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    fn element_names(node: &Node) -> Vec<String> {
        node.children()
            .iter()
            .filter_map(|c| c.tag_name().map(str::to_string))
            .collect()
    }

    #[test]
    fn options_without_end_tags_are_siblings() {
        let dom = build_dom(&tokenize(
            "<select name=s><option>One<option selected>Two<optgroup><option>Three</select><p>",
        ));
        let select = &dom.children()[0];
        assert_eq!(element_names(select), vec!["option", "option", "optgroup"]);
        assert_eq!(select.children()[1].text_content(), "Two");
        assert_eq!(element_names(&select.children()[2]), vec!["option"]);
        assert_eq!(element_names(&dom), vec!["select", "p"]);
    }

    #[test]
    fn stray_end_tags_do_not_close_open_elements() {
        let dom = build_dom(&tokenize("<form><div></span><input name=a></div></form>"));
        let form = &dom.children()[0];
        let div = &form.children()[0];
        assert_eq!(element_names(div), vec!["input"]);
    }

    #[test]
    fn end_tag_closes_intermediate_elements() {
        let dom = build_dom(&tokenize("<form><div><b>x</form><input name=after>"));
        assert_eq!(element_names(&dom), vec!["form", "input"]);
    }

    #[test]
    fn records_doctype() {
        let dom = build_dom(&tokenize("<!doctype html><html></html>"));
        let Node::Document { doctype, .. } = &dom else {
            panic!("expected document root");
        };
        assert_eq!(doctype.as_deref(), Some("doctype html"));
    }

    #[test]
    fn build_dom_stress_deep_nesting() {
        let depth: usize = 10_000;
        let mut tokens = Vec::with_capacity(depth * 2);
        for _ in 0..depth {
            tokens.push(Token::StartTag {
                name: "div".to_string(),
                attributes: Vec::new(),
                self_closing: false,
            });
        }
        for _ in 0..depth {
            tokens.push(Token::EndTag("div".to_string()));
        }

        let dom = build_dom(&tokens);

        let mut current = &dom.children()[0];
        let mut seen = 1usize;
        while let [child] = current.children() {
            assert_eq!(child.tag_name(), Some("div"));
            current = child;
            seen += 1;
        }
        assert_eq!(seen, depth);
    }
}
