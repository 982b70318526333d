use serde::{Deserialize, Serialize};

/// 1-indexed inclusive line span of a parsed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn matches(&self, start: usize, end: usize) -> bool {
        self.start == start && self.end == end
    }
}

/// Result of expanding a cursor range to the enclosing top-level construct(s).
#[derive(Debug)]
pub struct SmartSelection {
    pub code: String,
    /// 0-indexed line immediately preceding the next top-level block, for
    /// cursor advancement.
    pub next_block_line: usize,
}

/// Request sent by the host editor as a single JSON object on stdin.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    /// Raw selection text for direct normalization.
    #[serde(default)]
    pub code: Option<String>,
    /// Whole file content for smart selection.
    #[serde(default)]
    pub whole_file_content: Option<String>,
    /// First line of the editor selection (0-indexed).
    #[serde(default)]
    pub start_line: usize,
    /// Last line of the editor selection (0-indexed).
    #[serde(default)]
    pub end_line: usize,
    /// True when the user did not highlight an explicit range.
    #[serde(default)]
    pub empty_highlight: bool,
}

/// Reply written back to the editor as a single JSON object on stdout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReply {
    pub normalized: String,
    /// Meaningful only for smart selection; 0 for direct normalization.
    pub next_block_lineno: usize,
}
