use super::lines::{dedent, split_nonblank_lines};
use super::parse;
use crate::error::Result;

/// Partition dedented source into its top-level statement fragments.
///
/// Each fragment starts at its statement's first line and runs to the line
/// before the next statement starts; the final fragment extends to the last
/// line. Decorators sit inside their statement's span, and comment lines
/// between statements attach to the preceding fragment. Fragments spanning
/// more than one line get a trailing blank line so an interactive
/// interpreter sees the block terminated.
fn statement_fragments(source: &str) -> Result<Vec<String>> {
    let tree = parse::parse_valid_module(source)?;
    let lines: Vec<&str> = source.split('\n').collect();

    let starts: Vec<usize> = parse::module_statements(tree.root_node())
        .iter()
        .map(|node| node.start_position().row)
        .collect();

    let mut fragments = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(lines.len());
        let mut block = lines[start..end].join("\n");
        if end - start > 1 {
            block.push('\n');
        }
        fragments.push(block);
    }
    Ok(fragments)
}

/// Normalize an explicit selection for submission to an interactive
/// interpreter: drop blank lines, dedent, and re-join the top-level
/// statements with a blank line after each multi-line block and none after
/// single-line statements.
///
/// A selection that does not parse as standalone code is returned untouched
/// with two newlines appended, which still terminates the open block at the
/// interpreter prompt.
pub fn normalize_selection(selection: &str) -> String {
    let lines = split_nonblank_lines(selection);
    let dedented = dedent(&lines).join("\n");

    let mut source = match statement_fragments(&dedented) {
        Ok(fragments) => fragments.join("\n") + "\n",
        Err(_) => return format!("{selection}\n\n"),
    };

    // A closing brace on the last line already terminates the statement; the
    // appended newline would show up as a spurious blank prompt.
    if selection.chars().rev().nth(1) == Some('}') {
        source.pop();
    }

    source
}
