mod blocks;
mod lines;
mod parse;
mod smart;
mod types;

pub use blocks::normalize_selection;
pub use lines::{dedent, split_nonblank_lines};
pub use parse::is_valid_module;
pub use smart::select_smart_range;
pub use types::{NormalizedReply, SelectionRequest, SmartSelection, Span};

use crate::error::Result;

/// Answer one editor request: smart selection when the highlight was empty
/// and the whole file was provided, direct normalization otherwise. Editor
/// line numbers arrive 0-indexed and are converted to 1-indexed inclusive.
pub fn handle_request(request: &SelectionRequest) -> Result<NormalizedReply> {
    if request.empty_highlight {
        if let Some(file) = &request.whole_file_content {
            let selection =
                select_smart_range(file, request.start_line + 1, request.end_line + 1)?;
            return Ok(NormalizedReply {
                normalized: selection.code,
                next_block_lineno: selection.next_block_line,
            });
        }
    }

    let code = request.code.as_deref().unwrap_or_default();
    Ok(NormalizedReply {
        normalized: normalize_selection(code),
        next_block_lineno: 0,
    })
}
