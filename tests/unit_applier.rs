// tests/unit_applier.rs
use docgen_core::applier::apply;
use docgen_core::item::{DocMap, ItemId, ItemPosition};
use docgen_core::placeholder::{inject, InjectOptions};

fn docs(entries: &[(u32, &str)]) -> DocMap {
    entries
        .iter()
        .map(|(id, text)| (ItemId(*id), (*text).to_string()))
        .collect()
}

#[test]
fn test_marker_round_trip_keeps_other_lines() {
    let original = "<?php\nnamespace A;\n\nuse B;\nfunction x() {}\n\n$a = 1;\n$b = 2;\n$c = 3;\n// end";
    let placed = inject(
        original,
        &[ItemPosition {
            id: ItemId(7),
            line: 5,
            doc_span: None,
        }],
        InjectOptions::default(),
    );
    let out = apply(&placed, &docs(&[(7, "Does X.")]));

    let before: Vec<&str> = original.lines().collect();
    let after: Vec<&str> = out.text.lines().collect();
    assert_eq!(&after[..4], &before[..4]);
    assert_eq!(&after[4..7], ["/**", " * Does X.", " */"]);
    assert_eq!(&after[7..], &before[4..]);
    assert_eq!(out.replaced, [ItemId(7)]);
}

#[test]
fn test_flush_left_marker_inherits_next_indent() {
    let text = "class A {\n{{doc_1}}\n\n\n    public function f() {}\n}";
    let out = apply(text, &docs(&[(1, "Runs f.\nTwice.")]));
    let block: Vec<&str> = out.text.lines().skip(1).take(4).collect();
    assert_eq!(block, ["    /**", "     * Runs f.", "     * Twice.", "     */"]);
    assert!(block.iter().all(|l| l.starts_with("    ")));
}

#[test]
fn test_own_indent_wins() {
    let out = apply("\t{{doc_1}}\n        $x = 1;", &docs(&[(1, "Tabbed.")]));
    assert!(out.text.starts_with("\t/**\n\t * Tabbed.\n\t */\n"));
}

#[test]
fn test_last_line_marker_uses_no_indent() {
    let out = apply("<?php\n{{doc_1}}", &docs(&[(1, "Tail.")]));
    assert_eq!(out.text, "<?php\n/**\n * Tail.\n */");
}

#[test]
fn test_unmatched_markers_stay_literal() {
    let text = "<?php\n{{doc_1}}\nfunction a() {}\n  {{doc_2}}\nfunction b() {}";
    let out = apply(text, &docs(&[(1, "A.")]));
    assert!(out.text.contains("\n  {{doc_2}}\n"));
    assert_eq!(out.unmatched, [ItemId(2)]);
}

#[test]
fn test_lines_that_only_mention_a_marker_are_untouched() {
    let text = "<?php\n$s = '{{doc_1}}';\n// {{doc_1}}";
    let out = apply(text, &docs(&[(1, "A.")]));
    assert_eq!(out.text, text);
    assert!(out.replaced.is_empty());
}

#[test]
fn test_ready_block_is_reindented_not_rewrapped() {
    let text = "{{doc_1}}\n  function a() {}";
    let out = apply(text, &docs(&[(1, "/**\n * Ready.\n * @return void\n */")]));
    assert_eq!(
        out.text,
        "  /**\n   * Ready.\n   * @return void\n   */\n  function a() {}"
    );
}

#[test]
fn test_bulleted_prose_loses_its_bullets() {
    let out = apply("{{doc_1}}\nfunction a() {}", &docs(&[(1, "- Adds.\n* Returns.")]));
    assert!(out.text.starts_with("/**\n * Adds.\n * Returns.\n */\n"));
}

#[test]
fn test_crlf_output_uses_single_newline_style() {
    let out = apply("<?php\r\n{{doc_1}}\r\nfunction a() {}\r\n", &docs(&[(1, "A.")]));
    assert!(!out.text.contains('\r'));
    assert_eq!(out.text, "<?php\n/**\n * A.\n */\nfunction a() {}\n");
}
