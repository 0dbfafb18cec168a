// src/pipeline.rs
//! One documentation run over a single source text.
//!
//! normalize → parse → tag → correct → inject → generate → apply

use crate::applier::{self, Applied};
use crate::error::{DocGenError, Result};
use crate::events::{EventKind, EventLogger};
use crate::generator::{self, DocGenerator, Generated};
use crate::item::{DocMap, Item, ItemPosition};
use crate::marker;
use crate::normalize::{self, Normalization, OPEN_TAG};
use crate::offset;
use crate::placeholder::{self, InjectOptions};
use crate::prompt::{PromptBuilder, PromptEntry};
use crate::tokens::Tokenizer;
use crate::tree;

/// Items of one source, in original-file coordinates.
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub normalization: Normalization,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub inject: InjectOptions,
}

/// Everything a run produces. Persisting it is the caller's job.
#[derive(Debug, Clone)]
pub struct DocRun {
    pub fragment: bool,
    pub items: Vec<Item>,
    pub prompts: Vec<PromptEntry>,
    /// Source with markers; only for complete units.
    pub placeholder: Option<String>,
    /// `None` when generation was skipped.
    pub generation: Option<Generated>,
    /// Final documented source; only for complete units.
    pub documented: Option<String>,
    /// Generated blocks joined by a blank line; only for fragments.
    pub preview: Option<String>,
}

/// Normalizes, parses, tags and corrects `raw`.
///
/// # Errors
/// Returns `ParseFailure` (in original coordinates) when the parser reports errors.
pub fn map_source(raw: &str, events: &EventLogger) -> Result<SourceMap> {
    let normalization = normalize::normalize(raw);
    events.log(EventKind::Normalized {
        rule: normalization.rule,
        fragment: normalization.is_fragment,
        added_lines: normalization.added_lines,
    });

    let analysis = tree::analyze(&normalization.text);
    let tree = match analysis.tree {
        Some(tree) if analysis.errors.is_empty() => tree,
        _ => {
            events.log(EventKind::ParseFailed {
                errors: analysis.errors.len(),
            });
            return Err(DocGenError::ParseFailure(offset::correct_errors(
                analysis.errors,
                normalization.added_lines,
            )));
        }
    };

    let raw_items = marker::mark(&tree, &normalization.text);
    let items = offset::correct(raw_items, &normalization);
    events.log(EventKind::ItemsTagged { count: items.len() });

    Ok(SourceMap {
        normalization,
        items,
    })
}

/// Runs the whole pipeline. Without a generator, generation is skipped and
/// the documented text equals the placeholder text.
///
/// # Errors
/// Returns `ParseFailure` when the source does not parse.
pub fn run(
    raw: &str,
    doc_generator: Option<&dyn DocGenerator>,
    opts: RunOptions,
    events: &EventLogger,
) -> Result<DocRun> {
    let SourceMap {
        normalization,
        items,
    } = map_source(raw, events)?;
    let fragment = normalization.is_fragment;

    let placeholder = (!fragment).then(|| {
        let positions: Vec<ItemPosition> = items.iter().map(ItemPosition::from).collect();
        let text = placeholder::inject(raw, &positions, opts.inject);
        events.log(EventKind::PlaceholdersInjected {
            count: positions.len(),
        });
        text
    });

    let prompts = build_prompts(raw, &items);

    let generation = match doc_generator {
        Some(g) => Some(generator::generate_all(g, &items, &prompts, events)),
        None => {
            events.log(EventKind::GenerationSkipped {
                reason: "no generator configured".to_string(),
            });
            None
        }
    };

    let empty = DocMap::new();
    let docs = generation.as_ref().map_or(&empty, |g| &g.docs);

    let documented = placeholder.as_deref().map(|text| {
        let applied = apply_docs(text, docs);
        events.log(EventKind::DocumentApplied {
            replaced: applied.replaced.len(),
            unmatched: applied.unmatched.len(),
        });
        applied.text
    });

    let preview = (fragment && !docs.is_empty()).then(|| join_preview(&items, docs));

    Ok(DocRun {
        fragment,
        items,
        prompts,
        placeholder,
        generation,
        documented,
        preview,
    })
}

/// Applies `docs` to placeholder text, keeping a leading `<?php` line verbatim.
#[must_use]
pub fn apply_docs(placeholder: &str, docs: &DocMap) -> Applied {
    let mut applied = applier::apply(placeholder, docs);

    let head = placeholder.lines().next().unwrap_or_default();
    if head.starts_with(OPEN_TAG) {
        let head = head.trim_end_matches('\r');
        let rest = applied.text.find('\n').map_or("", |i| &applied.text[i..]);
        applied.text = format!("{head}{rest}");
    }
    applied
}

/// Builds one prompt per item from the original text.
#[must_use]
pub fn build_prompts(raw: &str, items: &[Item]) -> Vec<PromptEntry> {
    let builder = PromptBuilder::new(raw);
    items
        .iter()
        .map(|item| {
            let prompt = builder.build(item);
            PromptEntry {
                id: item.id,
                tokens: Tokenizer::request(&prompt),
                prompt,
            }
        })
        .collect()
}

fn join_preview(items: &[Item], docs: &DocMap) -> String {
    items
        .iter()
        .filter_map(|item| docs.get(&item.id))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n\n")
}
