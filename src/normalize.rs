// src/normalize.rs
//! Fragment normalization.
//!
//! Decides whether an input is a complete PHP compilation unit and, if not,
//! wraps it in the smallest scaffold the parser accepts. Every rule records
//! exactly how many synthetic lines precede the first original line, so item
//! lines can be mapped back later.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Opening tag every compilation unit must start with.
pub const OPEN_TAG: &str = "<?php";

/// Name of the synthetic class wrapped around member fragments.
pub const SYNTHETIC_CLASS: &str = "__DocgenTmp__";

/// Name of the synthetic function wrapped around statement fragments.
pub const SYNTHETIC_FUNCTION: &str = "__docgen_tmp__";

const MODIFIERS: &str = r"(public|protected|private|static|abstract|final|readonly|var)";

static OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*<\?php").unwrap_or_else(|_| panic!("Invalid Regex")));

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(namespace\b|use\s|declare\s*\(|((abstract|final|readonly)\s+)*(class|interface|trait|enum)\s+[A-Za-z_]|function\s+&?\s*[A-Za-z_])",
    )
    .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^({MODIFIERS}\s+)+function\b"))
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static MEMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^({MODIFIERS}\s+|const\s+[A-Za-z_])"))
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Which heuristic classified the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentRule {
    /// Already starts with `<?php`.
    CompleteUnit,
    /// Namespace, import, type or free function declaration.
    Declaration,
    /// Visibility-qualified method.
    MethodLike,
    /// Visibility-qualified member that is not a function.
    MemberLike,
    /// Loose statements or blocks.
    Statements,
    Fallback,
}

/// Scaffold applied around the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wrap {
    Unchanged,
    OpenTag,
    SyntheticClass,
    SyntheticFunction,
}

impl Wrap {
    /// Returns the wrapped text and the number of lines placed before it.
    fn apply(self, raw: &str) -> (String, usize) {
        match self {
            Self::Unchanged => (raw.to_string(), 0),
            Self::OpenTag => (format!("{OPEN_TAG}\n{raw}"), 1),
            Self::SyntheticClass => (
                format!("{OPEN_TAG}\nclass {SYNTHETIC_CLASS} {{\n{raw}\n}}\n"),
                2,
            ),
            Self::SyntheticFunction => (
                format!("{OPEN_TAG}\nfunction {SYNTHETIC_FUNCTION}() {{\n{raw}\n}}\n"),
                2,
            ),
        }
    }
}

/// What a rule inspects: the raw text, and the raw text with leading
/// whitespace, comments and attributes removed.
struct Probe<'a> {
    raw: &'a str,
    head: &'a str,
}

struct Rule {
    kind: FragmentRule,
    matches: fn(&Probe) -> bool,
    wrap: Wrap,
}

// First match wins.
const RULES: &[Rule] = &[
    Rule {
        kind: FragmentRule::CompleteUnit,
        matches: |p| OPEN_TAG_RE.is_match(p.raw),
        wrap: Wrap::Unchanged,
    },
    Rule {
        kind: FragmentRule::Declaration,
        matches: |p| DECLARATION_RE.is_match(p.head),
        wrap: Wrap::OpenTag,
    },
    Rule {
        kind: FragmentRule::MethodLike,
        matches: |p| METHOD_RE.is_match(p.head),
        wrap: Wrap::SyntheticClass,
    },
    Rule {
        kind: FragmentRule::MemberLike,
        matches: |p| MEMBER_RE.is_match(p.head),
        wrap: Wrap::SyntheticClass,
    },
    Rule {
        kind: FragmentRule::Statements,
        matches: |p| p.raw.contains([';', '{', '}']),
        wrap: Wrap::SyntheticFunction,
    },
    Rule {
        kind: FragmentRule::Fallback,
        matches: |_| true,
        wrap: Wrap::OpenTag,
    },
];

/// Outcome of normalization. Computed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    pub text: String,
    pub is_fragment: bool,
    /// Synthetic lines preceding the first original line.
    pub added_lines: usize,
    pub rule: FragmentRule,
}

/// Classifies `raw` and wraps it when it is a fragment.
#[must_use]
pub fn normalize(raw: &str) -> Normalization {
    let probe = Probe {
        raw,
        head: skip_leading_trivia(raw),
    };

    let rule = RULES
        .iter()
        .find(|r| (r.matches)(&probe))
        .unwrap_or(&RULES[RULES.len() - 1]);

    let (text, added_lines) = rule.wrap.apply(raw);
    Normalization {
        text,
        is_fragment: rule.wrap != Wrap::Unchanged,
        added_lines,
        rule: rule.kind,
    }
}

/// Skips whitespace, `//`, `#` and `/* */` comments, and `#[...]` attributes.
fn skip_leading_trivia(text: &str) -> &str {
    let mut rest = text.trim_start();
    loop {
        if rest.starts_with("#[") {
            rest = skip_attribute(rest);
        } else if rest.starts_with("//") || rest.starts_with('#') {
            rest = rest.find('\n').map_or("", |i| &rest[i + 1..]);
        } else if rest.starts_with("/*") {
            rest = rest.find("*/").map_or("", |i| &rest[i + 2..]);
        } else {
            return rest;
        }
        rest = rest.trim_start();
    }
}

fn skip_attribute(text: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return &text[i + 1..];
                }
            }
            _ => {}
        }
    }
    ""
}
