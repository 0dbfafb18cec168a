// src/applier.rs
//! Replaces `{{doc_<id>}}` marker lines with indented DocBlocks.

use crate::docblock;
use crate::item::{DocMap, ItemId};
use regex::Regex;
use std::sync::LazyLock;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)\{\{doc_(\d+)\}\}[ \t]*$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Result of an apply pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    pub text: String,
    /// Markers replaced by a block, in file order.
    pub replaced: Vec<ItemId>,
    /// Markers left in place because the map had no entry.
    pub unmatched: Vec<ItemId>,
}

/// Replaces every marker that has an entry in `docs`.
///
/// Line endings are normalized to `\n`; all non-marker lines are kept verbatim.
#[must_use]
pub fn apply(text: &str, docs: &DocMap) -> Applied {
    let normalized = text.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut out = Vec::with_capacity(lines.len());
    let mut replaced = Vec::new();
    let mut unmatched = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some((own_indent, id)) = parse_marker(line) else {
            out.push((*line).to_string());
            continue;
        };
        let Some(doc) = docs.get(&id) else {
            unmatched.push(id);
            out.push((*line).to_string());
            continue;
        };

        let indent = if own_indent.is_empty() {
            inherited_indent(&lines, i)
        } else {
            own_indent
        };

        out.push(docblock::indent_block(&docblock::to_docblock(doc), indent));
        replaced.push(id);
    }

    Applied {
        text: out.join("\n"),
        replaced,
        unmatched,
    }
}

/// Returns the marker's leading whitespace and id when `line` is a marker line.
#[must_use]
pub fn parse_marker(line: &str) -> Option<(&str, ItemId)> {
    let caps = MARKER_RE.captures(line)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let id = caps.get(2)?.as_str().parse().ok()?;
    Some((indent, ItemId(id)))
}

/// Indentation of the next line that is neither blank nor another marker.
fn inherited_indent<'a>(lines: &[&'a str], marker_idx: usize) -> &'a str {
    lines
        .iter()
        .skip(marker_idx + 1)
        .find(|l| !l.trim().is_empty() && parse_marker(l).is_none())
        .copied()
        .map_or("", |l| {
            let end = l.len() - l.trim_start_matches([' ', '\t']).len();
            &l[..end]
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marker_forms() {
        assert_eq!(parse_marker("{{doc_3}}"), Some(("", ItemId(3))));
        assert_eq!(parse_marker("  {{doc_12}}  "), Some(("  ", ItemId(12))));
        assert_eq!(parse_marker("x {{doc_3}}"), None);
        assert_eq!(parse_marker("{{doc_3}} // trailing"), None);
        assert_eq!(parse_marker("{{ doc_3 }}"), None);
    }

    #[test]
    fn test_consecutive_markers_share_target_indent() {
        let mut docs = DocMap::new();
        docs.insert(ItemId(1), "A.".into());
        docs.insert(ItemId(2), "B.".into());
        let out = apply("{{doc_1}}\n{{doc_2}}\n  class A { function b() {} }", &docs);
        assert!(out.text.starts_with("  /**\n   * A.\n   */\n  /**\n   * B.\n   */\n"));
    }
}
