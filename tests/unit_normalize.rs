// tests/unit_normalize.rs
use docgen_core::events::EventLogger;
use docgen_core::normalize::{normalize, FragmentRule, SYNTHETIC_CLASS, SYNTHETIC_FUNCTION};
use docgen_core::pipeline::map_source;

/// 1-based line of the first original line containing `needle`.
fn line_of(raw: &str, needle: &str) -> usize {
    raw.lines().position(|l| l.contains(needle)).unwrap() + 1
}

#[test]
fn test_complete_unit_is_unchanged() {
    let raw = "<?php\nfunction a() {}\n";
    let n = normalize(raw);
    assert_eq!(n.rule, FragmentRule::CompleteUnit);
    assert!(!n.is_fragment);
    assert_eq!(n.added_lines, 0);
    assert_eq!(n.text, raw);
}

#[test]
fn test_open_tag_is_case_insensitive_after_whitespace() {
    let n = normalize("\n  <?PHP\nclass A {}\n");
    assert_eq!(n.rule, FragmentRule::CompleteUnit);
    assert!(!n.is_fragment);
}

#[test]
fn test_declarations_get_open_tag_only() {
    for raw in [
        "namespace App;\nclass A {}",
        "use Foo\\Bar;\nfunction f() {}",
        "class A {}",
        "final class A {}",
        "abstract class A { abstract function f(); }",
        "interface I {}",
        "trait T {}",
        "enum Suit { case Hearts; }",
        "function &refs() {}",
        "declare(strict_types=1);\nfunction f() {}",
    ] {
        let n = normalize(raw);
        assert_eq!(n.rule, FragmentRule::Declaration, "{raw}");
        assert!(n.is_fragment);
        assert_eq!(n.added_lines, 1);
        assert_eq!(n.text, format!("<?php\n{raw}"));
    }
}

#[test]
fn test_visibility_function_is_method_like() {
    let n = normalize("public static function make() {}");
    assert_eq!(n.rule, FragmentRule::MethodLike);
    assert_eq!(n.added_lines, 2);
    assert!(n.text.contains(&format!("class {SYNTHETIC_CLASS} {{")));
}

#[test]
fn test_attributes_and_comments_do_not_hide_the_head() {
    let n = normalize("// helper\n#[Pure]\nprivate function x(): int { return 1; }");
    assert_eq!(n.rule, FragmentRule::MethodLike);
}

#[test]
fn test_members_that_are_not_functions() {
    for raw in [
        "private int $count = 0;",
        "protected static $cache = [];",
        "var $legacy;",
        "const LIMIT = 10;",
        "public const LIMIT = 10;",
    ] {
        let n = normalize(raw);
        assert_eq!(n.rule, FragmentRule::MemberLike, "{raw}");
        assert_eq!(n.added_lines, 2);
    }
}

#[test]
fn test_statements_are_wrapped_in_a_function() {
    let n = normalize("$a = 1;\necho $a;");
    assert_eq!(n.rule, FragmentRule::Statements);
    assert_eq!(n.added_lines, 2);
    assert!(n.text.contains(&format!("function {SYNTHETIC_FUNCTION}() {{")));
}

#[test]
fn test_fallback_prepends_open_tag() {
    let n = normalize("just words");
    assert_eq!(n.rule, FragmentRule::Fallback);
    assert!(n.is_fragment);
    assert_eq!(n.added_lines, 1);
    assert_eq!(n.text, "<?php\njust words");
}

#[test]
fn test_added_lines_precede_first_original_line() {
    for raw in [
        "class A {}",
        "public function a() {}",
        "private $x;",
        "$x = 1;",
        "words",
    ] {
        let n = normalize(raw);
        let first = n.text.lines().nth(n.added_lines);
        assert_eq!(first, Some(raw), "{raw}");
    }
}

#[test]
fn test_corrected_lines_match_original_for_method_fragment() {
    let raw = "public function first() {}\n\n/** Second. */\npublic function second(int $a) {\n    return $a;\n}\n";
    let map = map_source(raw, &EventLogger::disabled()).unwrap();

    let lines: Vec<usize> = map.items.iter().map(|i| i.line).collect();
    assert_eq!(lines, [line_of(raw, "first"), line_of(raw, "second")]);

    let second = &map.items[1];
    assert_eq!(second.end_line, Some(6));
    let span = second.doc_span.unwrap();
    assert_eq!((span.start_line, span.end_line), (3, 3));
}

#[test]
fn test_corrected_lines_match_original_for_declaration_fragment() {
    let raw = "namespace App;\n\nclass Repo {\n    public function find() {}\n}\n\nfunction helper() {}\n";
    let map = map_source(raw, &EventLogger::disabled()).unwrap();

    // Class-likes are dropped in fragment mode.
    let found: Vec<(&str, usize)> = map
        .items
        .iter()
        .map(|i| (i.name.as_deref().unwrap(), i.line))
        .collect();
    assert_eq!(
        found,
        [
            ("find", line_of(raw, "find")),
            ("helper", line_of(raw, "helper"))
        ]
    );
}

#[test]
fn test_corrected_lines_match_original_for_statement_fragment() {
    let raw = "$x = 1;\nfunction inner($y) {\n    return $y;\n}\n";
    let map = map_source(raw, &EventLogger::disabled()).unwrap();

    assert_eq!(map.items.len(), 1);
    assert_eq!(map.items[0].name.as_deref(), Some("inner"));
    assert_eq!(map.items[0].line, line_of(raw, "inner"));
}
