// src/marker/types.rs
//! Parameter lists and type expressions rendered to their PHP string form.

use crate::item::Parameter;
use tree_sitter::Node;

/// Type used when a declaration carries no explicit type.
pub const UNTYPED: &str = "mixed";

const PARAMETER_KINDS: &[&str] = &[
    "simple_parameter",
    "variadic_parameter",
    "property_promotion_parameter",
];

/// Walks the formal parameter list of a function-like node in declaration order.
#[must_use]
pub fn parameters(node: Node, source: &str) -> Vec<Parameter> {
    let Some(list) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|c| PARAMETER_KINDS.contains(&c.kind()))
        .map(|c| parameter(c, source))
        .collect()
}

fn parameter(node: Node, source: &str) -> Parameter {
    let name = node
        .child_by_field_name("name")
        .or_else(|| first_child_of_kind(node, "variable_name"))
        .map(|n| text(n, source).to_string())
        .unwrap_or_default();

    let default = node
        .child_by_field_name("default_value")
        .map(|n| text(n, source).to_string());

    Parameter {
        name,
        ty: declared_type(node, "type", source),
        pass_by_reference: has_token(node, "reference_modifier", "&"),
        variadic: node.kind() == "variadic_parameter" || has_token(node, "...", "..."),
        has_default: default.is_some(),
        default,
    }
}

/// Renders the return type of a function-like node.
#[must_use]
pub fn return_type(node: Node, source: &str) -> String {
    declared_type(node, "return_type", source)
}

fn declared_type(node: Node, field: &str, source: &str) -> String {
    node.child_by_field_name(field)
        .map(|t| render_type(t, source))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTYPED.to_string())
}

/// Renders a type node: `?T`, `A|B`, `A&B`, `(A&B)|C`, or the type's own text.
#[must_use]
pub fn render_type(node: Node, source: &str) -> String {
    match node.kind() {
        "optional_type" => {
            let inner = named_parts(node, source);
            match inner.first() {
                Some(t) => format!("?{t}"),
                None => squash(text(node, source)),
            }
        }
        "union_type" | "type_list" => join_parts(node, source, "|"),
        "intersection_type" => join_parts(node, source, "&"),
        "disjunctive_normal_form_type" => {
            let mut cursor = node.walk();
            let parts: Vec<String> = node
                .named_children(&mut cursor)
                .filter(|c| c.kind() != "comment")
                .map(|c| {
                    let rendered = render_type(c, source);
                    if c.kind() == "intersection_type" {
                        format!("({rendered})")
                    } else {
                        rendered
                    }
                })
                .collect();
            if parts.is_empty() {
                squash(text(node, source))
            } else {
                parts.join("|")
            }
        }
        _ => squash(text(node, source)),
    }
}

fn join_parts(node: Node, source: &str, separator: &str) -> String {
    let parts = named_parts(node, source);
    if parts.is_empty() {
        squash(text(node, source))
    } else {
        parts.join(separator)
    }
}

fn named_parts(node: Node, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .map(|c| render_type(c, source))
        .collect()
}

/// Drops a leading `:` and all whitespace.
fn squash(raw: &str) -> String {
    raw.trim_start_matches(':')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn has_token(node: Node, kind: &str, literal: &str) -> bool {
    if node.child_by_field_name(kind).is_some() {
        return true;
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| c.kind() == kind || c.kind() == literal);
    found
}

pub(crate) fn first_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

pub(crate) fn text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}
