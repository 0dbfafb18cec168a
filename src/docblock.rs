// src/docblock.rs
//! PHPDoc block shaping shared by the generation client and the applier.

use regex::Regex;
use std::sync::LazyLock;

pub const BLOCK_OPEN: &str = "/**";
pub const BLOCK_CLOSE: &str = " */";
pub const LEADER: &str = " * ";

/// Body used when the generated text is empty.
pub const FALLBACK_TEXT: &str = "Generated documentation.";

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[*\u{2022}]|-\s)\s*").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Returns `text` as an unindented DocBlock.
///
/// Text that already opens with `/**` keeps its content and only has its
/// continuation lines realigned; anything else is wrapped line by line.
#[must_use]
pub fn to_docblock(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let text = strip_code_fence(normalized.trim());

    if text.starts_with(BLOCK_OPEN) {
        return realign(text);
    }

    let body: Vec<String> = if text.is_empty() {
        vec![format!("{LEADER}{FALLBACK_TEXT}")]
    } else {
        text.lines().map(leader_line).collect()
    };

    format!("{BLOCK_OPEN}\n{}\n{BLOCK_CLOSE}", body.join("\n"))
}

/// Prefixes every line of `block` with `indent`.
#[must_use]
pub fn indent_block(block: &str, indent: &str) -> String {
    block
        .lines()
        .map(|l| format!("{indent}{l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn leader_line(line: &str) -> String {
    let content = BULLET_RE.replace(line, "");
    let content = content.trim_end();
    if content.is_empty() {
        LEADER.trim_end().to_string()
    } else {
        format!("{LEADER}{content}")
    }
}

fn realign(block: &str) -> String {
    let mut lines = block.lines();
    let Some(first) = lines.next() else {
        return String::new();
    };

    let mut out = vec![first.trim_end().to_string()];
    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with('*') {
            out.push(format!(" {trimmed}"));
        } else if trimmed.is_empty() {
            out.push(LEADER.trim_end().to_string());
        } else {
            out.push(format!("{LEADER}{trimmed}"));
        }
    }
    out.join("\n")
}

/// Drops a surrounding Markdown fence (```php ... ```).
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = rest.find('\n').map_or("", |i| &rest[i + 1..]);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
