use crate::anchor::SelectionAnchor;
use crate::engine::Vim;
use crate::iter::OffsetIter;
use crate::registry::{self, CommandFlags, CommandKind};
use crate::types::{EngineEvent, Position, Viewport, VisualKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageDirection {
    HalfUp,
    HalfDown,
    Up,
    Down,
}

impl Vim<'_> {
    /// `(insert, bound, has_selection)`, unordered.
    pub(crate) fn selection_bounds(&self) -> (usize, usize, bool) {
        let insert = self.buf.cursor();
        let bound = self.buf.selection_bound();
        (insert, bound, insert != bound)
    }

    /// The selection as an ordered `(begin, end)` pair.
    pub(crate) fn ordered_selection(&self) -> (usize, usize) {
        let (insert, bound, _) = self.selection_bounds();
        (insert.min(bound), insert.max(bound))
    }

    /// Selects `(insert, bound)`. When that covers exactly the character
    /// after `bound`, the cursor is kept in front of it, like visual mode.
    pub(crate) fn select_range(&mut self, insert: usize, bound: usize) {
        if insert == bound + 1 {
            self.buf.select_range(bound, insert);
        } else {
            self.buf.select_range(insert, bound);
        }
    }

    pub(crate) fn update_target_column(&mut self) {
        self.state.target_column = self.buf.line_offset(self.buf.cursor());
    }

    /// Ends every motion: extend the selection (keeping the anchor in it) or
    /// just move the cursor.
    fn extend_or_move(&mut self, iter: usize, selection: usize, has_selection: bool) {
        if has_selection {
            self.select_range(iter, selection);
            self.ensure_anchor_selected();
        } else {
            self.buf.place_cursor(iter);
        }
    }

    pub(crate) fn set_selection_anchor(&mut self, a: usize, b: usize, kind: VisualKind) {
        match self.state.anchor.as_mut() {
            Some(anchor) if anchor.bounds(&*self.buf).is_some() => {
                anchor.reset(&mut *self.buf, a, b, kind);
            }
            _ => self.state.anchor = Some(SelectionAnchor::set(&mut *self.buf, a, b, kind)),
        }
    }

    pub(crate) fn ensure_anchor_selected(&mut self) {
        let Some(anchor) = self.state.anchor else {
            return;
        };
        if anchor.bounds(&*self.buf).is_none() {
            self.state.anchor = None;
            return;
        }
        let (insert, bound, _) = self.selection_bounds();
        if let Some((insert, bound)) = anchor.clamp(&*self.buf, insert, bound) {
            self.select_range(insert, bound);
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        if self.buf.has_selection() {
            let cursor = self.buf.cursor();
            self.buf.place_cursor(cursor);
        }
        if let Some(anchor) = self.state.anchor.take() {
            anchor.release(&mut *self.buf);
        }
        self.update_target_column();
    }

    pub(crate) fn save_position(&mut self) {
        let (begin, _) = self.ordered_selection();
        let line = self.buf.line_of(begin);
        self.state.stash = Position::new(line as u32, self.buf.line_offset(begin) as u32);
    }

    pub(crate) fn restore_position(&mut self) {
        let Position { line, col } = self.state.stash;
        let iter = self.buf.iter_at_line_offset(line as usize, col as usize);
        self.buf.place_cursor(iter);
        self.update_target_column();
    }

    pub(crate) fn is_single_line_selection(&self, a: usize, b: usize) -> bool {
        let (begin, end) = (a.min(b), a.max(b));
        self.buf.line_offset(begin) == 0
            && self.buf.line_offset(end) == 0
            && self.buf.line_of(begin) + 1 == self.buf.line_of(end)
    }

    pub(crate) fn is_single_char_selection(&self, a: usize, b: usize) -> bool {
        let len = self.buf.len_chars();
        (a + 1 == b && b != len) || (b + 1 == a && a != len)
    }

    pub(crate) fn move_line0(&mut self) {
        let (iter, selection, has_selection) = self.selection_bounds();
        let iter = self.buf.line_start(self.buf.line_of(iter));
        self.extend_or_move(iter, selection, has_selection);
        self.update_target_column();
    }

    /// Moves to the first non-blank of the line. Unless `can_move_forward`,
    /// a blank line or a cursor already there falls back to column 0.
    pub(crate) fn move_line_start(&mut self, can_move_forward: bool) {
        let (original, selection, has_selection) = self.selection_bounds();
        let mut iter = self.buf.line_start(self.buf.line_of(original));

        while !self.buf.ends_line(iter) && self.buf.char_or_nul(iter).is_whitespace() {
            if !self.buf.forward_char(&mut iter) {
                break;
            }
        }

        if !can_move_forward && (self.buf.char_or_nul(iter).is_whitespace() || iter == original) {
            self.move_line0();
            return;
        }

        if has_selection {
            if iter > selection {
                self.buf.forward_char(&mut iter);
            }
            self.select_range(iter, selection);
            self.ensure_anchor_selected();
        } else {
            self.buf.place_cursor(iter);
        }
        self.update_target_column();
    }

    pub(crate) fn move_line_end(&mut self) {
        let (mut iter, selection, has_selection) = self.selection_bounds();
        while !self.buf.ends_line(iter) {
            if !self.buf.forward_char(&mut iter) {
                break;
            }
        }
        self.extend_or_move(iter, selection, has_selection);
        self.update_target_column();
    }

    pub(crate) fn move_backward(&mut self) {
        let (start, mut selection, has_selection) = self.selection_bounds();
        let line = self.buf.line_of(start);
        let Some(mut iter) = self.buf.grapheme_backward(start) else {
            return;
        };
        if self.buf.line_of(iter) != line {
            return;
        }

        if has_selection {
            if iter == selection {
                self.buf.backward_char(&mut iter);
                self.buf.forward_char(&mut selection);
            }
            self.select_range(iter, selection);
            self.ensure_anchor_selected();
        } else {
            self.buf.place_cursor(iter);
        }
        self.update_target_column();
    }

    pub(crate) fn move_forward(&mut self) {
        let (start, mut selection, has_selection) = self.selection_bounds();
        let line = self.buf.line_of(start);
        let mut iter = self.buf.grapheme_forward(start);
        if self.buf.line_of(iter) != line {
            return;
        }

        if has_selection {
            if iter == selection {
                self.buf.forward_char(&mut iter);
                self.buf.backward_char(&mut selection);
            }
            self.select_range(iter, selection);
            self.ensure_anchor_selected();
        } else {
            self.buf.place_cursor(iter);
        }
        self.update_target_column();
    }

    pub(crate) fn move_backward_word(&mut self) {
        let (mut iter, selection, has_selection) = self.selection_bounds();
        if !self.buf.backward_vim_word(&mut iter) {
            iter = 0;
        }

        if has_selection {
            if iter == selection {
                self.buf.backward_vim_word(&mut iter);
            }
            self.select_range(iter, selection);
            self.ensure_anchor_selected();
        } else {
            self.buf.place_cursor(iter);
        }
        self.update_target_column();
    }

    pub(crate) fn move_forward_word(&mut self) {
        let (mut iter, selection, has_selection) = self.selection_bounds();
        let len = self.buf.len_chars();
        if !self.buf.forward_vim_word(&mut iter) {
            iter = len;
        }

        // A visual selection includes the character under the cursor.
        if has_selection && !self.buf.forward_char(&mut iter) {
            iter = len;
        }
        self.extend_or_move(iter, selection, has_selection);
        self.update_target_column();
    }

    pub(crate) fn move_forward_word_end(&mut self) {
        let (mut iter, selection, has_selection) = self.selection_bounds();
        let len = self.buf.len_chars();
        if !self.buf.forward_vim_word_end(&mut iter) {
            iter = len;
        }

        if has_selection && !self.buf.forward_char(&mut iter) {
            iter = len;
        }
        self.extend_or_move(iter, selection, has_selection);
        self.update_target_column();
    }

    pub(crate) fn move_matching_bracket(&mut self) {
        let (mut iter, selection, has_selection) = self.selection_bounds();
        let from = self.buf.char_or_nul(iter);
        let (to, forward) = match from {
            '{' => ('}', true),
            '[' => (']', true),
            '(' => (')', true),
            '}' => ('{', false),
            ']' => ('[', false),
            ')' => ('(', false),
            _ => return,
        };

        let mut depth = 1;
        let balanced = |ch: char| {
            if ch == from {
                depth += 1;
            } else if ch == to {
                depth -= 1;
            }
            depth == 0
        };
        let found = if forward {
            self.buf.forward_find_char(&mut iter, balanced)
        } else {
            self.buf.backward_find_char(&mut iter, balanced)
        };

        if found {
            self.extend_or_move(iter, selection, has_selection);
            self.update_target_column();
        }
    }

    pub(crate) fn move_forward_paragraph(&mut self) {
        let (mut iter, selection, has_selection) = self.selection_bounds();

        // Leave the blank lines we are on, then find the next blank line.
        while self.buf.is_empty_line(iter) {
            if !self.buf.forward_line(&mut iter) {
                break;
            }
        }
        while self.buf.forward_line(&mut iter) {
            if self.buf.is_empty_line(iter) {
                break;
            }
        }

        self.extend_or_move(iter, selection, has_selection);
        self.update_target_column();
    }

    pub(crate) fn move_backward_paragraph(&mut self) {
        let (mut iter, mut selection, has_selection) = self.selection_bounds();

        while self.buf.is_empty_line(iter) {
            if !self.buf.backward_line(&mut iter) {
                break;
            }
        }
        while self.buf.backward_line(&mut iter) {
            if self.buf.is_empty_line(iter) {
                break;
            }
        }

        if has_selection {
            if iter == selection {
                self.buf.forward_char(&mut selection);
            }
            self.select_range(iter, selection);
            self.ensure_anchor_selected();
        } else {
            self.buf.place_cursor(iter);
        }
        self.update_target_column();
    }

    /// Walks `column` characters into `line` without leaving it.
    fn column_in_line(&self, line: usize, column: usize) -> usize {
        let mut iter = self.buf.line_start(line);
        for _ in 0..column {
            if self.buf.ends_line(iter) || !self.buf.forward_char(&mut iter) {
                break;
            }
        }
        iter
    }

    pub(crate) fn move_down(&mut self) {
        let (mut iter, mut selection, has_selection) = self.selection_bounds();
        let line = self.buf.line_of(iter);
        let line_count = self.buf.line_count();
        let mut column = self.state.target_column;

        // A whole-line selection (from `V`) grows by whole lines.
        if self.is_single_line_selection(iter, selection) {
            if iter < selection {
                std::mem::swap(&mut iter, &mut selection);
            }
            let target_line = self.buf.line_of(iter) + 1;
            let iter = if target_line < line_count {
                self.buf.line_start(target_line)
            } else {
                self.buf.len_chars()
            };
            self.select_range(iter, selection);
            self.ensure_anchor_selected();
            return;
        }

        if self.is_single_char_selection(iter, selection) && iter < selection {
            column += 1;
            self.state.target_column = column;
        }

        if line + 1 < line_count {
            let iter = self.column_in_line(line + 1, column);
            self.extend_or_move(iter, selection, has_selection);
        } else if has_selection {
            let end = self.buf.len_chars();
            self.select_range(end, selection);
            self.ensure_anchor_selected();
        }
    }

    pub(crate) fn move_up(&mut self) {
        let (mut iter, mut selection, has_selection) = self.selection_bounds();
        let line = self.buf.line_of(iter);
        let mut column = self.state.target_column;

        if line == 0 {
            return;
        }

        if self.is_single_line_selection(iter, selection) {
            if iter > selection {
                std::mem::swap(&mut iter, &mut selection);
            }
            let Some(target_line) = self.buf.line_of(iter).checked_sub(1) else {
                return;
            };
            let iter = self.buf.line_start(target_line);
            self.select_range(iter, selection);
            self.ensure_anchor_selected();
            return;
        }

        if self.is_single_char_selection(iter, selection) && iter > selection {
            column = column.saturating_sub(1);
            self.state.target_column = column;
        }

        let mut iter = self.column_in_line(line - 1, column);
        if has_selection {
            if iter == selection {
                self.buf.backward_char(&mut iter);
            }
            self.select_range(iter, selection);
            self.ensure_anchor_selected();
        } else {
            self.buf.place_cursor(iter);
        }
    }

    pub(crate) fn move_to_line_n(&mut self, line: usize) {
        let (_, selection, has_selection) = self.selection_bounds();
        let mut iter = self.buf.line_start(line);
        if self.is_single_line_selection(self.buf.cursor(), selection) && iter > selection {
            self.buf.forward_line(&mut iter);
        }
        self.extend_or_move(iter, selection, has_selection);
        self.update_target_column();
    }

    pub(crate) fn move_to_end(&mut self) {
        let (_, selection, has_selection) = self.selection_bounds();
        let end = self.buf.len_chars();
        self.extend_or_move(end, selection, has_selection);
        self.update_target_column();
    }

    /// Moves the cursor (or the live end of a selection) and asks the host to
    /// scroll `iter` to `yalign`.
    pub(crate) fn move_to_iter(&mut self, iter: usize, yalign: f32) {
        if self.buf.has_selection() {
            let bound = self.buf.selection_bound();
            self.buf.select_range(iter, bound);
            self.ensure_anchor_selected();
        } else {
            self.buf.place_cursor(iter);
        }
        self.emit(EngineEvent::ScrollTo {
            offset: iter,
            yalign,
        });
    }

    pub(crate) fn move_page(&mut self, direction: PageDirection) {
        let Viewport {
            top_line: top,
            bottom_line,
        } = self.state.viewport.unwrap_or(Viewport {
            top_line: 0,
            bottom_line: self.config.page_lines,
        });
        let bottom = bottom_line.max(top);
        let (begin, _) = self.ordered_selection();
        let current = self.buf.line_of(begin);
        let height = bottom - top;
        let scroll_off = self.config.scroll_off;

        // Half pages keep the cursor where it sits within the view.
        let mut yalign = if height > 0 {
            (current.saturating_sub(top) as f32 / height as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let line = match direction {
            PageDirection::HalfUp => current.saturating_sub(height / 2),
            PageDirection::HalfDown => current + height / 2,
            PageDirection::Up => {
                yalign = 1.0;
                top + scroll_off
            }
            PageDirection::Down => {
                yalign = 0.0;
                bottom.saturating_sub(scroll_off + 1)
            }
        };

        let line = line.min(self.buf.line_count().saturating_sub(1));
        let iter = self.column_in_line(line, self.state.target_column);
        self.move_to_iter(iter, yalign);
    }

    /// Selects the cursor line including its newline. The last line has no
    /// newline after it, so the one before it is taken instead.
    pub(crate) fn select_line(&mut self) {
        let cursor = self.buf.cursor();
        let line = self.buf.line_of(cursor);
        let mut begin = self.buf.line_start(line);
        let mut end = self.buf.line_end(line);

        if end < self.buf.len_chars() {
            end += 1;
        } else {
            self.buf.backward_char(&mut begin);
        }

        self.buf.select_range(begin, end);
        self.set_selection_anchor(begin, end, VisualKind::LineWise);
        self.state.target_column = 0;
    }

    /// Selects `count` whole lines starting at the cursor line, clamped at the
    /// end of the buffer.
    pub(crate) fn select_lines(&mut self, count: u32) {
        let cursor = self.buf.cursor();
        let first = self.buf.line_of(cursor);
        let last_line = self.buf.line_count().saturating_sub(1);
        let last = (first + count.max(1) as usize - 1).min(last_line);

        let mut begin = self.buf.line_start(first);
        let mut end = self.buf.line_end(last);
        if end < self.buf.len_chars() {
            end += 1;
        } else {
            self.buf.backward_char(&mut begin);
        }

        self.buf.select_range(begin, end);
        self.set_selection_anchor(begin, end, VisualKind::LineWise);
        self.state.target_column = 0;
    }

    pub(crate) fn select_char(&mut self) {
        let (mut iter, mut selection, has_selection) = self.selection_bounds();
        let len = self.buf.len_chars();
        let target = if has_selection {
            &mut iter
        } else {
            &mut selection
        };
        if !self.buf.forward_char(target) {
            *target = len;
        }

        self.select_range(iter, selection);
        self.set_selection_anchor(iter, selection, VisualKind::CharWise);
        self.update_target_column();
    }

    /// Selects the text covered by `count` repetitions of the motion bound to
    /// `key`. Returns `false`, leaving the buffer untouched, when `key` is not
    /// a motion or covers nothing.
    pub(crate) fn apply_motion(&mut self, key: char, count: u32) -> bool {
        let Some(command) = registry::lookup(key) else {
            return false;
        };
        if command.kind != CommandKind::Movement {
            return false;
        }

        if command.flags.contains(CommandFlags::MOTION_EXCLUSIVE) {
            return self.apply_exclusive_motion(command.handler, count);
        }

        let linewise = command.flags.contains(CommandFlags::MOTION_LINEWISE);
        if linewise {
            self.select_line();
        } else {
            self.select_char();
        }
        (command.handler)(self, count, None);

        // Nothing but the newline of an empty line: the motion went nowhere.
        let (begin, end) = self.ordered_selection();
        let bare_newline = !linewise && end == begin + 1 && self.buf.char_at(begin) == Some('\n');
        if begin == end || bare_newline {
            self.clear_selection();
            return false;
        }
        true
    }

    /// Exclusive motions are measured from where the bare motion lands, so
    /// the character at the target is never included.
    fn apply_exclusive_motion(&mut self, handler: registry::Handler, count: u32) -> bool {
        self.clear_selection();
        let origin = self.buf.cursor();
        handler(self, count, None);
        let target = self.buf.cursor();
        let (mut begin, mut end) = (origin.min(target), origin.max(target));
        if begin == end {
            self.buf.place_cursor(origin);
            return false;
        }

        let mut kind = VisualKind::CharWise;
        if self.buf.line_offset(end) == 0 {
            // Ending in column 0 ends on the previous line instead; starting
            // at or before the first non-blank makes the motion linewise.
            self.buf.backward_char(&mut end);
            let line = self.buf.line_of(begin);
            if begin <= self.buf.first_non_blank(line) {
                begin = self.buf.line_start(line);
                while !self.buf.starts_line(end) {
                    if !self.buf.forward_char(&mut end) {
                        break;
                    }
                }
                kind = VisualKind::LineWise;
            }
        }
        if begin == end {
            self.buf.place_cursor(origin);
            return false;
        }

        self.buf.select_range(end, begin);
        self.set_selection_anchor(begin, end, kind);
        true
    }
}
