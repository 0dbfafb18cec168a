// src/generator/mod.rs
//! Generation service boundary.
//!
//! Items are sent one at a time. A failure for one item is logged and
//! recorded as missing; it never stops the others.

pub mod openai;

pub use self::openai::OpenAiClient;

use crate::docblock;
use crate::error::GenerationError;
use crate::events::{EventKind, EventLogger};
use crate::item::{DocMap, Item, ItemId};
use crate::prompt::PromptEntry;

/// Produces documentation text for one item.
pub trait DocGenerator {
    /// # Errors
    /// Returns a per-item failure; callers treat it as "no documentation".
    fn generate(&self, item: &Item, prompt: &str) -> Result<String, GenerationError>;
}

/// Partial-success outcome of a generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    pub docs: DocMap,
    /// Ids that received no documentation, in item order.
    pub missing: Vec<ItemId>,
}

/// Requests documentation for every item, sequentially.
///
/// `prompts` must be in the same order as `items`.
pub fn generate_all(
    generator: &dyn DocGenerator,
    items: &[Item],
    prompts: &[PromptEntry],
    events: &EventLogger,
) -> Generated {
    let mut out = Generated::default();

    for (item, entry) in items.iter().zip(prompts) {
        events.log(EventKind::GenerationRequested {
            id: item.id,
            prompt_bytes: entry.prompt.len(),
        });

        match generator.generate(item, &entry.prompt).and_then(|d| finish(&d)) {
            Ok(doc) => {
                events.log(EventKind::GenerationSucceeded {
                    id: item.id,
                    doc_bytes: doc.len(),
                });
                out.docs.insert(item.id, doc);
            }
            Err(e) => {
                events.log(EventKind::GenerationFailed {
                    id: item.id,
                    kind: e.kind(),
                    reason: e.to_string(),
                });
                out.missing.push(item.id);
            }
        }
    }

    out
}

/// Trims a raw response and shapes it into a DocBlock. Blank text is a failure.
///
/// # Errors
/// Returns `EmptyResponse` when nothing but whitespace came back.
pub fn finish(raw: &str) -> Result<String, GenerationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(docblock::to_docblock(trimmed))
}
