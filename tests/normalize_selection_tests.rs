use pretty_assertions::assert_eq;
use pyrepl_tools::normalizer::normalize_selection;

/// Count top-level statements the interpreter would see in a block.
fn top_level_statement_count(source: &str) -> usize {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .expect("python grammar");
    let tree = parser.parse(source, None).expect("parse");
    let root = tree.root_node();
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .count()
}

#[test]
fn single_line_statements_stay_adjacent() {
    assert_eq!(normalize_selection("x = 1\ny = 2\n"), "x = 1\ny = 2\n");
}

#[test]
fn blank_line_inserted_after_multiline_block() {
    assert_eq!(
        normalize_selection("if True:\n    x = 1\ny = 2\n"),
        "if True:\n    x = 1\n\ny = 2\n"
    );
}

#[test]
fn normalization_is_idempotent() {
    let once = normalize_selection("if True:\n    x = 1\ny = 2\n");
    assert_eq!(normalize_selection(&once), once);

    let once = normalize_selection("x = 1\ny = 2\n");
    assert_eq!(normalize_selection(&once), once);
}

#[test]
fn blank_lines_inside_blocks_are_removed() {
    assert_eq!(
        normalize_selection("def f():\n\n    return 1\n\nprint(f())\n"),
        "def f():\n    return 1\n\nprint(f())\n"
    );
}

#[test]
fn common_indentation_is_removed() {
    // A selection lifted from inside a function body.
    assert_eq!(normalize_selection("    x = 1\n    y = 2\n"), "x = 1\ny = 2\n");
}

#[test]
fn carriage_returns_are_handled() {
    assert_eq!(normalize_selection("x = 1\r\ny = 2\r\n"), "x = 1\ny = 2\n");
}

#[test]
fn unparsable_input_falls_back_to_raw_plus_two_newlines() {
    assert_eq!(normalize_selection("def f(:"), "def f(:\n\n");
    assert_eq!(normalize_selection("x = (1"), "x = (1\n\n");
}

#[test]
fn trailing_brace_drops_final_newline() {
    assert_eq!(
        normalize_selection("x = {\n    'a': 1,\n}\n"),
        "x = {\n    'a': 1,\n}\n"
    );
}

#[test]
fn leading_comments_are_discarded() {
    assert_eq!(normalize_selection("# setup\nx = 1\n"), "x = 1\n");
}

#[test]
fn interior_comment_attaches_to_preceding_statement() {
    assert_eq!(
        normalize_selection("def f():\n    return 1\n# done\nx = 2\n"),
        "def f():\n    return 1\n# done\n\nx = 2\n"
    );
}

#[test]
fn decorator_stays_inside_its_statement() {
    assert_eq!(
        normalize_selection("@dec\ndef f():\n    return 1\nx = 2\n"),
        "@dec\ndef f():\n    return 1\n\nx = 2\n"
    );
}

#[test]
fn empty_selection_yields_single_newline() {
    assert_eq!(normalize_selection(""), "\n");
}

#[test]
fn statement_count_is_preserved() {
    let inputs = [
        "x = 1\ny = 2\n",
        "if True:\n    x = 1\ny = 2\n",
        "def f():\n\n    return 1\n\nprint(f())\nz = 3\n",
        "@dec\ndef f():\n    return 1\nx = 2\n",
    ];

    for input in inputs {
        let normalized = normalize_selection(input);
        assert_eq!(
            top_level_statement_count(&normalized),
            top_level_statement_count(input),
            "statement count changed for {input:?}"
        );
    }
}
