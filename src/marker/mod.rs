// src/marker/mod.rs
//! Documentation marker.
//!
//! Walks a parsed tree in pre-order and emits one [`Item`] per documentable
//! declaration. Ids are assigned in visit order starting at 1.

pub mod types;

use crate::item::{DocSpan, Item, ItemId};
use crate::lang::DocKind;
use crate::normalize::SYNTHETIC_CLASS;
use tree_sitter::{Node, Tree};

use self::types::{first_child_of_kind, text};

/// Traversal context. Owns the id counter and the enclosing-type stack;
/// both are discarded when the walk finishes.
struct DocMarker<'s> {
    source: &'s str,
    next_id: u32,
    /// Qualified names of enclosing class-likes. `None` for anonymous classes.
    class_stack: Vec<Option<String>>,
    namespace: Option<String>,
    /// Namespaces to restore when leaving a braced `namespace X { }`.
    namespace_stack: Vec<Option<String>>,
    items: Vec<Item>,
}

/// Tags every documentable node of `tree`, in source order.
#[must_use]
pub fn mark(tree: &Tree, source: &str) -> Vec<Item> {
    let mut marker = DocMarker {
        source,
        next_id: 1,
        class_stack: Vec::new(),
        namespace: None,
        namespace_stack: Vec::new(),
        items: Vec::new(),
    };
    marker.walk(tree.root_node());
    marker.items
}

impl<'s> DocMarker<'s> {
    fn walk(&mut self, root: Node) {
        let mut cursor = root.walk();
        loop {
            self.enter(cursor.node());
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                self.leave(cursor.node());
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    fn enter(&mut self, node: Node) {
        if node.kind() == "namespace_definition" {
            self.enter_namespace(node);
            return;
        }

        let Some(kind) = DocKind::of(&node) else {
            return;
        };

        // The type's own qualified name is resolved before it is pushed.
        let qualified = self.qualified_name(kind, node);
        if kind.is_type() {
            self.class_stack.push(qualified.clone());
        }
        self.emit(kind, node, qualified);
    }

    fn leave(&mut self, node: Node) {
        if node.kind() == "namespace_definition" {
            if node.child_by_field_name("body").is_some() {
                self.namespace = self.namespace_stack.pop().flatten();
            }
            return;
        }
        if DocKind::of(&node).is_some_and(DocKind::is_type) {
            self.class_stack.pop();
        }
    }

    fn enter_namespace(&mut self, node: Node) {
        let name = node
            .child_by_field_name("name")
            .map(|n| text(n, self.source).trim().to_string())
            .filter(|n| !n.is_empty());

        if node.child_by_field_name("body").is_some() {
            self.namespace_stack.push(self.namespace.take());
        }
        self.namespace = name;
    }

    fn emit(&mut self, kind: DocKind, node: Node, qualified_name: Option<String>) {
        let id = ItemId(self.next_id);
        self.next_id += 1;

        let doc = doc_comment(node, self.source);
        let (parameters, return_type) = if kind.is_callable() {
            (
                types::parameters(node, self.source),
                Some(types::return_type(node, self.source)),
            )
        } else {
            (Vec::new(), None)
        };

        self.items.push(Item {
            id,
            kind,
            name: short_name(kind, node, self.source),
            qualified_name,
            existing_doc: doc.map(|d| text(d, self.source).to_string()),
            doc_span: doc.map(|d| DocSpan {
                start_line: d.start_position().row + 1,
                end_line: d.end_position().row + 1,
            }),
            parameters,
            return_type,
            line: node.start_position().row + 1,
            end_line: Some(node.end_position().row + 1),
        });
    }

    /// Namespace-resolved name for types and functions, `Class::method` for
    /// methods, otherwise the short name. Methods of the synthetic fragment
    /// class keep their short name.
    fn qualified_name(&self, kind: DocKind, node: Node) -> Option<String> {
        let short = short_name(kind, node, self.source);
        match kind {
            DocKind::Method => {
                let method = short?;
                // The fragment scaffold class is not a real owner.
                match self.class_stack.last() {
                    Some(Some(class)) if class != SYNTHETIC_CLASS => {
                        Some(format!("{class}::{method}"))
                    }
                    _ => Some(method),
                }
            }
            _ if kind.is_type() || kind == DocKind::Function => {
                let name = short?;
                match &self.namespace {
                    Some(ns) => Some(format!("{ns}\\{name}")),
                    None => Some(name),
                }
            }
            _ => short,
        }
    }
}

fn short_name(kind: DocKind, node: Node, source: &str) -> Option<String> {
    let name_node = match kind {
        DocKind::Property => {
            first_child_of_kind(node, "property_element").and_then(|el| {
                el.child_by_field_name("name")
                    .or_else(|| first_child_of_kind(el, "variable_name"))
            })
        }
        DocKind::Constant => first_child_of_kind(node, "const_element")
            .and_then(|el| first_child_of_kind(el, "name")),
        _ => node.child_by_field_name("name"),
    };
    name_node
        .map(|n| text(n, source).trim().to_string())
        .filter(|n| !n.is_empty())
}

/// Nearest `/** */` comment among the comments directly above `node`.
fn doc_comment<'t>(node: Node<'t>, source: &str) -> Option<Node<'t>> {
    let mut prev = node.prev_sibling();
    while let Some(sibling) = prev {
        if sibling.kind() != "comment" {
            return None;
        }
        if text(sibling, source).starts_with("/**") {
            return Some(sibling);
        }
        prev = sibling.prev_sibling();
    }
    None
}
