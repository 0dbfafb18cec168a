// src/prompt.rs
//! Builds the per-item request text for the generation service.

use crate::item::Item;
use crate::lang::DocKind;
use crate::marker::types::UNTYPED;
use serde::Serialize;
use serde_json::json;

/// System instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You produce only valid PHPDoc DocBlocks.";

/// One prompt, as persisted in the prompt map.
#[derive(Debug, Clone, Serialize)]
pub struct PromptEntry {
    pub id: crate::item::ItemId,
    pub prompt: String,
    /// Estimated size of the whole chat request in model tokens.
    pub tokens: usize,
}

pub struct PromptBuilder<'a> {
    lines: Vec<&'a str>,
}

impl<'a> PromptBuilder<'a> {
    /// `source` is the ORIGINAL text; item lines must be in its coordinates.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
        }
    }

    /// Builds the prompt for one item.
    #[must_use]
    pub fn build(&self, item: &Item) -> String {
        let start = item.line;
        let end = item.end_line.unwrap_or(start + 1).max(start);
        let target = format!("{} {}", item.kind, item.label());
        let rules = rules_for(item);
        let metadata = self.metadata(item, start, end);
        let excerpt = self.excerpt(start, end);

        format!(
            r"Produce ONLY a valid PHPDoc DocBlock between /** and */. Do not use backticks.
If the metadata or the names disagree with the code body, document what the BODY does.

Target: {target} (lines {start}-{end})

RULES:
{rules}

METADATA (JSON):
{metadata}

CODE EXCERPT (element start to end):
{excerpt}"
        )
    }

    fn metadata(&self, item: &Item, start: usize, end: usize) -> String {
        json!({
            "kind": item.kind,
            "qualifiedName": item.label(),
            "parameters": item.parameters,
            "returnType": item.return_type,
            "existingDoc": item.existing_doc,
            "lines": { "start": start, "end": end, "loc": end - start + 1 },
        })
        .to_string()
    }

    fn excerpt(&self, start: usize, end: usize) -> String {
        let from = start.saturating_sub(1).min(self.lines.len());
        let to = end.min(self.lines.len()).max(from);
        self.lines[from..to].join("\n")
    }
}

fn rules_for(item: &Item) -> String {
    match item.kind {
        DocKind::Function | DocKind::Method => {
            let ret = item.return_type.as_deref().unwrap_or(UNTYPED);
            format!(
                "- Describe objectively what the body DOES, not what the name says.
- One sentence of description, then a blank line.
- One @param per parameter, in order, with its purpose.
- @return {ret} consistent with the body.
- Do not invent @throws. Only include it for a visible throw or declaration."
            )
        }
        DocKind::Class | DocKind::Interface | DocKind::Trait | DocKind::Enum => {
            "- Role and responsibility in 1-2 lines. No @param/@return.".to_string()
        }
        DocKind::Property => {
            "- Short description. Use @var <type> description. No @param/@return.".to_string()
        }
        DocKind::Constant => "- Short description. No @param/@return.".to_string(),
    }
}
