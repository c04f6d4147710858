use crate::iter::OffsetIter;
use crate::key::{KeyCode, KeyEvent};
use crate::traits::{AutoIndenter, IndentEdit, TextBuffer};

/// Auto-indenter that repeats the leading whitespace of the nearest
/// non-blank line above (or below, on the first line).
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyIndent;

impl CopyIndent {
    fn leading_whitespace(buffer: &dyn TextBuffer, line: usize) -> String {
        let start = buffer.line_start(line);
        buffer.slice(start, buffer.first_non_blank(line))
    }

    fn reference_line(buffer: &dyn TextBuffer, line: usize) -> Option<usize> {
        let blank = |l: usize| buffer.first_non_blank(l) == buffer.line_end(l);
        (0..line)
            .rev()
            .find(|&l| !blank(l))
            .or_else(|| (line + 1..buffer.line_count()).find(|&l| !blank(l)))
    }
}

impl AutoIndenter for CopyIndent {
    fn is_trigger(&self, key: &KeyEvent) -> bool {
        key.code == KeyCode::Enter
    }

    fn format(
        &mut self,
        buffer: &dyn TextBuffer,
        begin: usize,
        end: usize,
        _key: &KeyEvent,
    ) -> Option<IndentEdit> {
        let line = buffer.line_of(begin);
        let indent = Self::leading_whitespace(buffer, Self::reference_line(buffer, line)?);
        if indent.is_empty() {
            return None;
        }
        Some(IndentEdit {
            begin,
            end,
            text: indent,
            cursor_offset: 0,
        })
    }
}
