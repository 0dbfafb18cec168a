// src/placeholder.rs
//! Placeholder injection.
//!
//! Inserts one `{{doc_<id>}}` line per item into the ORIGINAL source. Edits
//! are applied bottom-up so each target line is still expressed in original
//! coordinates when it is reached.

use crate::item::{ItemId, ItemPosition};

/// Lowest line a marker may be inserted before. Line 1 holds `<?php`.
pub const FIRST_MARKER_LINE: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct InjectOptions {
    /// Replace an item's existing doc comment with its marker instead of
    /// inserting the marker above the declaration.
    pub replace_existing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    /// Insert a marker before 1-based line `at`.
    Insert { at: usize, id: ItemId },
    /// Replace 1-based lines `start..=end` with a marker.
    Replace { start: usize, end: usize, id: ItemId },
}

impl Edit {
    fn anchor(self) -> usize {
        match self {
            Self::Insert { at, .. } => at,
            Self::Replace { start, .. } => start,
        }
    }

    fn id(self) -> ItemId {
        match self {
            Self::Insert { id, .. } | Self::Replace { id, .. } => id,
        }
    }
}

/// Returns `original` with a marker line placed for every position.
///
/// Line endings are normalized to `\n`.
#[must_use]
pub fn inject(original: &str, positions: &[ItemPosition], opts: InjectOptions) -> String {
    let text = original.replace("\r\n", "\n");
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

    for edit in plan(positions, lines.len(), opts) {
        let marker = edit.id().marker();
        match edit {
            Edit::Insert { at, .. } => lines.insert(at - 1, marker),
            Edit::Replace { start, end, .. } => {
                lines.splice(start - 1..end, std::iter::once(marker));
            }
        }
    }

    lines.join("\n")
}

/// Orders edits bottom-up. Items sharing a line keep their id order.
fn plan(positions: &[ItemPosition], line_count: usize, opts: InjectOptions) -> Vec<Edit> {
    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut edits: Vec<Edit> = positions
        .iter()
        .map(|pos| {
            if opts.replace_existing {
                if let Some(edit) = replacement(pos, line_count, &mut claimed) {
                    return edit;
                }
            }
            Edit::Insert {
                at: pos.line.max(FIRST_MARKER_LINE).min(line_count + 1),
                id: pos.id,
            }
        })
        .collect();

    edits.sort_by(|a, b| {
        b.anchor()
            .cmp(&a.anchor())
            .then_with(|| b.id().cmp(&a.id()))
    });
    edits
}

fn replacement(
    pos: &ItemPosition,
    line_count: usize,
    claimed: &mut Vec<(usize, usize)>,
) -> Option<Edit> {
    let span = pos.doc_span?;
    let valid = span.start_line >= FIRST_MARKER_LINE
        && span.start_line <= span.end_line
        && span.end_line < pos.line
        && span.end_line <= line_count;
    let overlaps = claimed
        .iter()
        .any(|&(s, e)| span.start_line <= e && s <= span.end_line);
    if !valid || overlaps {
        return None;
    }

    claimed.push((span.start_line, span.end_line));
    Some(Edit::Replace {
        start: span.start_line,
        end: span.end_line,
        id: pos.id,
    })
}
