use super::blocks::normalize_selection;
use super::parse::{self, node_span};
use super::types::{SmartSelection, Span};
use crate::error::Result;
use tree_sitter::Node;

/// Compound statement kinds whose direct body statements are also selection
/// candidates, one level below the module.
const COMPOUND_KINDS: &[&str] = &[
    "function_definition",
    "class_definition",
    "decorated_definition",
    "for_statement",
    "while_statement",
    "if_statement",
    "with_statement",
    "try_statement",
];

/// Expand an editor cursor range to the nearest top-level construct(s).
///
/// `start_line` and `end_line` are 1-indexed inclusive. An exact span match
/// against any candidate wins and is returned verbatim; otherwise every
/// module-level statement fully contained in the range is selected and fed
/// through the normalizer. A range that matches nothing yields an empty
/// selection, which callers treat as a no-op.
///
/// The file is assumed to be open in an editor and therefore parseable; a
/// file that fails to parse is a hard error, not a guess.
pub fn select_smart_range(
    file: &str,
    start_line: usize,
    end_line: usize,
) -> Result<SmartSelection> {
    let tree = parse::parse_valid_module(file)?;
    let root = tree.root_node();
    let candidates = collect_candidates(root);

    let mut selected: Vec<Span> = Vec::new();
    let mut code = String::new();

    let exact: Vec<Node> = candidates
        .iter()
        .copied()
        .filter(|node| node_span(*node).matches(start_line, end_line))
        .collect();

    if !exact.is_empty() {
        // Every candidate sharing the exact span is emitted, in traversal
        // order, without a normalization pass.
        for node in exact {
            selected.push(node_span(node));
            code.push_str(node_text(node, file));
            code.push('\n');
        }
    } else {
        for node in parse::module_statements(root) {
            let span = node_span(node);
            if span.matches(start_line, end_line) {
                selected.push(span);
                code.push_str(node_text(node, file));
                code.push('\n');
                break;
            }
            if start_line <= span.start && span.end <= end_line {
                selected.push(span);
                code.push_str(node_text(node, file));
                code.push('\n');
            }
        }
        if selected.is_empty() {
            // The range matched nothing and contained nothing: report a
            // no-op so the caller leaves the cursor where it is.
            return Ok(SmartSelection {
                code: String::new(),
                next_block_line: 0,
            });
        }
        code = normalize_selection(&code);
    }

    let last_end = selected[selected.len() - 1].end;
    let next_block_line = next_block_start(&candidates, last_end).unwrap_or(last_end) - 1;

    Ok(SmartSelection {
        code,
        next_block_line,
    })
}

/// Candidate set: every module child plus the direct body statements of any
/// compound module child. Built fresh per call.
fn collect_candidates(root: Node<'_>) -> Vec<Node<'_>> {
    let mut candidates = Vec::new();
    for child in parse::module_statements(root) {
        candidates.push(child);
        if COMPOUND_KINDS.contains(&child.kind()) {
            if let Some(block) = body_block(child) {
                let mut cursor = block.walk();
                for stmt in block.named_children(&mut cursor) {
                    if stmt.kind() != "comment" {
                        candidates.push(stmt);
                    }
                }
            }
        }
    }
    candidates
}

/// The block holding a compound statement's direct body. Decorated
/// definitions delegate to the wrapped definition; `if` keeps its body in
/// the `consequence` field.
fn body_block(node: Node<'_>) -> Option<Node<'_>> {
    let target = if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition")?
    } else {
        node
    };
    match target.kind() {
        "if_statement" => target.child_by_field_name("consequence"),
        _ => target.child_by_field_name("body"),
    }
}

/// Start line of the first candidate strictly after `after`, if any.
fn next_block_start(candidates: &[Node<'_>], after: usize) -> Option<usize> {
    candidates
        .iter()
        .map(|node| node_span(*node).start)
        .filter(|&start| start > after)
        .min()
}

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}
