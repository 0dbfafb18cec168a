// tests/integration_pipeline.rs
use std::cell::RefCell;
use std::collections::HashMap;

use docgen_core::error::{DocGenError, FailureKind, GenerationError};
use docgen_core::events::EventLogger;
use docgen_core::generator::DocGenerator;
use docgen_core::item::{Item, ItemId};
use docgen_core::lang::DocKind;
use docgen_core::pipeline::{apply_docs, run, RunOptions};

/// Answers from a fixed table; ids without an answer time out.
struct Scripted {
    answers: HashMap<u32, &'static str>,
    seen: RefCell<Vec<ItemId>>,
}

impl Scripted {
    fn new(answers: &[(u32, &'static str)]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl DocGenerator for Scripted {
    fn generate(&self, item: &Item, prompt: &str) -> Result<String, GenerationError> {
        assert!(!prompt.is_empty());
        self.seen.borrow_mut().push(item.id);
        self.answers
            .get(&item.id.0)
            .map(|text| (*text).to_string())
            .ok_or_else(|| GenerationError::Transport("timed out".into()))
    }
}

const THREE_ITEMS: &str = "<?php\nclass Calc\n{\n    public function add(int $a, int $b): int\n    {\n        return $a + $b;\n    }\n}\n\nfunction helper() {}\n";

#[test]
fn test_partial_failure_is_isolated() {
    let generator = Scripted::new(&[(1, "Simple calculator."), (3, "Helps.")]);

    let events = EventLogger::disabled();
    let out = run(THREE_ITEMS, Some(&generator), RunOptions::default(), &events).unwrap();

    assert_eq!(out.items.len(), 3);
    assert_eq!(*generator.seen.borrow(), [ItemId(1), ItemId(2), ItemId(3)]);

    let generation = out.generation.as_ref().unwrap();
    assert_eq!(generation.missing, [ItemId(2)]);
    assert_eq!(
        generation.docs.keys().copied().collect::<Vec<_>>(),
        [ItemId(1), ItemId(3)]
    );

    let documented = out.documented.as_deref().unwrap();
    assert!(documented.contains("/**\n * Simple calculator.\n */\nclass Calc"));
    assert!(documented.contains("{{doc_2}}\n    public function add"));
    assert!(documented.contains("/**\n * Helps.\n */\nfunction helper()"));
    assert!(documented.starts_with("<?php\n"));
}

#[test]
fn test_transport_and_generation_failures_share_handling() {
    assert_eq!(
        GenerationError::Transport("x".into()).kind(),
        FailureKind::TransportFailure
    );
    assert_eq!(GenerationError::Status(500).kind(), FailureKind::GenerationFailure);
    assert_eq!(GenerationError::EmptyResponse.kind(), FailureKind::GenerationFailure);
}

#[test]
fn test_blank_response_counts_as_missing() {
    let generator = Scripted::new(&[(1, "   \n ")]);
    let out = run(
        "<?php\nfunction a() {}\n",
        Some(&generator),
        RunOptions::default(),
        &EventLogger::disabled(),
    )
    .unwrap();
    let generation = out.generation.unwrap();
    assert!(generation.docs.is_empty());
    assert_eq!(generation.missing, [ItemId(1)]);
    assert_eq!(out.documented.as_deref(), out.placeholder.as_deref());
}

#[test]
fn test_no_generator_leaves_placeholders() {
    let out = run(THREE_ITEMS, None, RunOptions::default(), &EventLogger::disabled()).unwrap();
    assert!(out.generation.is_none());
    assert_eq!(out.prompts.len(), out.items.len());
    assert_eq!(out.documented, out.placeholder);
    let placeholder = out.placeholder.unwrap();
    assert!(placeholder.contains("{{doc_1}}\nclass Calc"));
    assert!(placeholder.contains("{{doc_2}}\n    public function add"));
}

#[test]
fn test_zero_items_still_succeeds() {
    let events = EventLogger::disabled();
    let out = run("<?php\n$x = 1;\n", None, RunOptions::default(), &events).unwrap();
    assert!(out.items.is_empty());
    assert_eq!(out.placeholder.as_deref(), Some("<?php\n$x = 1;\n"));
}

#[test]
fn test_fragment_yields_preview_not_edit() {
    let generator = Scripted::new(&[(2, "First."), (3, "/** Second. */")]);
    let src = "public function first() {}\npublic function second() {}";
    let out = run(src, Some(&generator), RunOptions::default(), &EventLogger::disabled()).unwrap();

    assert!(out.fragment);
    assert!(out.placeholder.is_none());
    assert!(out.documented.is_none());
    assert!(out.items.iter().all(|i| i.kind == DocKind::Method));
    assert_eq!(
        out.items.iter().map(|i| i.line).collect::<Vec<_>>(),
        [1, 2]
    );
    assert_eq!(
        out.preview.as_deref(),
        Some("/**\n * First.\n */\n\n/** Second. */")
    );
}

#[test]
fn test_fragment_without_docs_has_no_preview() {
    let out = run("private $x;", None, RunOptions::default(), &EventLogger::disabled()).unwrap();
    assert!(out.fragment);
    assert_eq!(out.items.len(), 1);
    assert_eq!(out.items[0].kind, DocKind::Property);
    assert!(out.preview.is_none());
}

#[test]
fn test_parse_failure_reports_original_lines() {
    let err = run(
        "public function broken( {}\n",
        None,
        RunOptions::default(),
        &EventLogger::disabled(),
    )
    .unwrap_err();
    let DocGenError::ParseFailure(errors) = err else {
        panic!("expected parse failure");
    };
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e.start_line >= 1));
}

#[test]
fn test_apply_docs_keeps_open_tag_line() {
    let mut docs = docgen_core::item::DocMap::new();
    docs.insert(ItemId(1), "A.".into());
    let out = apply_docs("<?php declare(strict_types=1);\r\n{{doc_1}}\nfunction a() {}", &docs);
    assert!(out.text.starts_with("<?php declare(strict_types=1);\n/**"));
}

#[test]
fn test_fragment_methods_are_not_owned_by_the_scaffold() {
    let out = run(
        "public function f(int $a): int { return $a; }",
        None,
        RunOptions::default(),
        &EventLogger::disabled(),
    )
    .unwrap();
    assert_eq!(out.items[0].qualified_name.as_deref(), Some("f"));
    assert!(out.prompts[0].prompt.contains("Target: method f (lines 1-1)"));
    assert!(!out.prompts[0].prompt.contains("__DocgenTmp__"));
}
