// src/lang.rs
use serde::{Deserialize, Serialize};
use tree_sitter::{Language, Node};

/// The PHP grammar (with `<?php` tag handling, not the php-only variant).
#[must_use]
pub fn grammar() -> Language {
    tree_sitter_php::language_php()
}

/// Documentable element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Class,
    Interface,
    Trait,
    Enum,
    Function,
    Method,
    Property,
    Constant,
}

impl DocKind {
    /// Classifies a syntax node. Returns `None` for nodes that are not documented.
    #[must_use]
    pub fn of(node: &Node) -> Option<Self> {
        match node.kind() {
            "class_declaration" | "anonymous_class" => Some(Self::Class),
            // Older grammars spell `new class { }` as a creation expression with a body.
            "object_creation_expression" if has_body(node) => Some(Self::Class),
            "interface_declaration" => Some(Self::Interface),
            "trait_declaration" => Some(Self::Trait),
            "enum_declaration" => Some(Self::Enum),
            "function_definition" => Some(Self::Function),
            "method_declaration" => Some(Self::Method),
            "property_declaration" => Some(Self::Property),
            // Top-level `const X = 1;` is not a class constant.
            "const_declaration" if is_member(node) => Some(Self::Constant),
            _ => None,
        }
    }

    /// Class-like kinds open a qualified-name context.
    #[must_use]
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Trait | Self::Enum
        )
    }

    /// Function-like kinds carry parameters and a return type.
    #[must_use]
    pub fn is_callable(self) -> bool {
        matches!(self, Self::Function | Self::Method)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Trait => "trait",
            Self::Enum => "enum",
            Self::Function => "function",
            Self::Method => "method",
            Self::Property => "property",
            Self::Constant => "constant",
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn has_body(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .any(|c| c.kind() == "declaration_list");
    found
}

fn is_member(node: &Node) -> bool {
    node.parent().is_some_and(|p| {
        matches!(p.kind(), "declaration_list" | "enum_declaration_list")
    })
}
