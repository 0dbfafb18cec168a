// src/tree.rs
//! Parser boundary.
//!
//! Wraps tree-sitter so callers always get either a tree or a non-empty
//! list of structured errors, never a panic.

use crate::lang;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use tree_sitter::{Node, Parser, Tree};

const SNIPPET_LIMIT: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxError {
    pub message: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl SyntaxError {
    #[must_use]
    pub fn generic(message: &str) -> Self {
        Self {
            message: message.to_string(),
            start_line: 1,
            end_line: 1,
        }
    }
}

/// Result of parsing normalized text.
#[derive(Debug)]
pub struct Analysis {
    pub tree: Option<Tree>,
    pub errors: Vec<SyntaxError>,
}

impl Analysis {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.tree.is_some() && self.errors.is_empty()
    }
}

/// Parses `text` as PHP and collects syntax errors.
#[must_use]
pub fn analyze(text: &str) -> Analysis {
    match parse(text) {
        Ok(tree) => inspect(tree, text),
        Err(message) => Analysis {
            tree: None,
            errors: vec![SyntaxError::generic(&message)],
        },
    }
}

/// A missing tree always yields at least one error.
fn inspect(tree: Option<Tree>, text: &str) -> Analysis {
    let mut errors = Vec::new();
    match &tree {
        Some(tree) => {
            let root = tree.root_node();
            collect_errors(root, text, &mut errors);
            if root.has_error() && errors.is_empty() {
                errors.push(SyntaxError::generic("Syntax error."));
            }
        }
        None => errors.push(SyntaxError::generic("Parser failed.")),
    }

    Analysis { tree, errors }
}

fn parse(text: &str) -> Result<Option<Tree>, String> {
    let mut parser = Parser::new();
    parser
        .set_language(&lang::grammar())
        .map_err(|e| format!("Parser failed: {e}"))?;

    panic::catch_unwind(AssertUnwindSafe(|| parser.parse(text, None)))
        .map_err(|_| "Parser failed.".to_string())
}

fn collect_errors(node: Node, source: &str, out: &mut Vec<SyntaxError>) {
    if !node.has_error() && !node.is_missing() {
        return;
    }

    if node.is_error() {
        out.push(SyntaxError {
            message: format!("Syntax error, unexpected '{}'", snippet(node, source)),
            start_line: node.start_position().row + 1,
            end_line: node.end_position().row + 1,
        });
        return;
    }

    if node.is_missing() {
        out.push(SyntaxError {
            message: format!("Syntax error, missing '{}'", node.kind()),
            start_line: node.start_position().row + 1,
            end_line: node.end_position().row + 1,
        });
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(child, source, out);
    }
}

fn snippet(node: Node, source: &str) -> String {
    let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
    let first = text.lines().next().unwrap_or_default().trim();
    if first.chars().count() > SNIPPET_LIMIT {
        let cut: String = first.chars().take(SNIPPET_LIMIT).collect();
        format!("{cut}...")
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tree_gets_generic_error() {
        let analysis = inspect(None, "<?php\n");
        assert!(!analysis.is_clean());
        assert_eq!(analysis.errors, [SyntaxError::generic("Parser failed.")]);
    }

    #[test]
    fn test_errors_carry_lines() {
        let analysis = analyze("<?php\nfunction f( {\n");
        assert!(analysis.tree.is_some());
        assert!(!analysis.errors.is_empty());
        assert!(analysis.errors.iter().all(|e| e.start_line >= 1));
    }
}
