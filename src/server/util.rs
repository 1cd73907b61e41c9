//! Conversions between LSP positions and byte offsets.
//!
//! Positions count UTF-16 code units within a line, the LSP default
//! encoding; offsets are UTF-8 bytes.

use crate::types::TextRange;
use ropey::Rope;
use tower_lsp::lsp_types::{Position, Range};

/// Byte offset of `position`, or `None` if it lies beyond the document.
///
/// A character past the end of a line is clamped to the line end.
pub fn position_to_offset(content: &str, position: Position) -> Option<usize> {
    let rope = Rope::from_str(content);
    let line_idx = position.line as usize;
    if line_idx >= rope.len_lines() {
        return None;
    }

    let line = rope.line(line_idx);
    let mut line_chars = line.len_chars();
    // Stop before the line terminator.
    while line_chars > 0 && matches!(line.char(line_chars - 1), '\n' | '\r') {
        line_chars -= 1;
    }

    let line_start = rope.line_to_char(line_idx);
    let start_cu = rope.char_to_utf16_cu(line_start);
    let end_cu = rope.char_to_utf16_cu(line_start + line_chars);
    let cu = (start_cu + position.character as usize).min(end_cu);
    Some(rope.char_to_byte(rope.utf16_cu_to_char(cu)))
}

/// Position of byte `offset`. `offset == content.len()` maps to the end of the document.
pub fn offset_to_position(content: &str, offset: usize) -> Position {
    let rope = Rope::from_str(content);
    let offset = offset.min(content.len());

    let line_idx = rope.byte_to_line(offset);
    let line_start_cu = rope.char_to_utf16_cu(rope.line_to_char(line_idx));
    let col_cu = rope.char_to_utf16_cu(rope.byte_to_char(offset)) - line_start_cu;

    Position::new(line_idx as u32, col_cu as u32)
}

pub fn text_range_to_range(content: &str, range: TextRange) -> Range {
    Range::new(
        offset_to_position(content, range.from),
        offset_to_position(content, range.to),
    )
}
