use super::types::Span;
use crate::error::{Result, ToolError};
use tree_sitter::{Node, Parser, Tree};

/// Parse source text as a Python module.
pub fn parse_module(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ToolError::Grammar(format!("failed to load python grammar: {e}")))?;
    parser
        .parse(source, None)
        .ok_or_else(|| ToolError::parse("parser produced no tree"))
}

/// Parse source text, rejecting any tree that contains a syntax error.
pub fn parse_valid_module(source: &str) -> Result<Tree> {
    let tree = parse_module(source)?;
    if tree.root_node().has_error() {
        return Err(ToolError::parse(
            "source is not valid as a standalone module",
        ));
    }
    Ok(tree)
}

/// Whether source parses cleanly as a standalone module.
pub fn is_valid_module(source: &str) -> bool {
    parse_valid_module(source).is_ok()
}

/// Top-level statement nodes of a module, in source order. Comment nodes are
/// not statements.
pub fn module_statements(root: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        .filter(|node| node.kind() != "comment")
        .collect()
}

/// 1-indexed inclusive line span of a node.
pub fn node_span(node: Node<'_>) -> Span {
    Span {
        start: node.start_position().row + 1,
        end: node.end_position().row + 1,
    }
}
