// src/offset.rs
//! Maps item lines from normalized-text coordinates back to the original text.

use crate::item::{DocSpan, Item};
use crate::normalize::Normalization;
use crate::tree::SyntaxError;

/// Shifts every line field of `items` by the scaffold size, clamping at 1.
///
/// For fragments, class-like items are dropped, as is anything that starts
/// inside the synthetic scaffold (the wrapper function of a statement
/// fragment). Order and all other fields are preserved.
#[must_use]
pub fn correct(items: Vec<Item>, norm: &Normalization) -> Vec<Item> {
    let added = norm.added_lines;
    items
        .into_iter()
        .filter(|item| !norm.is_fragment || keep_in_fragment(item, added))
        .map(|item| shift_item(item, added))
        .collect()
}

/// Applies the same correction to parser diagnostics.
#[must_use]
pub fn correct_errors(errors: Vec<SyntaxError>, added: usize) -> Vec<SyntaxError> {
    errors
        .into_iter()
        .map(|e| SyntaxError {
            start_line: shift(e.start_line, added),
            end_line: shift(e.end_line, added),
            ..e
        })
        .collect()
}

fn keep_in_fragment(item: &Item, added: usize) -> bool {
    !item.kind.is_type() && item.line > added
}

fn shift_item(item: Item, added: usize) -> Item {
    Item {
        line: shift(item.line, added),
        end_line: item.end_line.map(|l| shift(l, added)),
        doc_span: item.doc_span.map(|s| DocSpan {
            start_line: shift(s.start_line, added),
            end_line: shift(s.end_line, added),
        }),
        ..item
    }
}

fn shift(line: usize, added: usize) -> usize {
    line.saturating_sub(added).max(1)
}
