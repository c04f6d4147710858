//! Normal-mode command handlers and the edits they share.
//!
//! Every handler has the [`Handler`](crate::registry::Handler) signature and
//! receives the raw count (0 when none was typed) and the modifier key.

use crate::engine::Vim;
use crate::iter::OffsetIter;
use crate::key::{KeyCode, KeyEvent};
use crate::traits::SearchSettings;
use crate::types::{EngineEvent, Mode, VisualKind};

fn times(count: u32) -> u32 {
    count.max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaseChange {
    Toggle,
    Lower,
    Upper,
}

impl CaseChange {
    fn apply(self, text: &str) -> String {
        text.chars()
            .flat_map(|c| -> Box<dyn Iterator<Item = char>> {
                match self {
                    CaseChange::Lower => Box::new(c.to_lowercase()),
                    CaseChange::Upper => Box::new(c.to_uppercase()),
                    CaseChange::Toggle if c.is_uppercase() => Box::new(c.to_lowercase()),
                    CaseChange::Toggle => Box::new(c.to_uppercase()),
                }
            })
            .collect()
    }
}

impl Vim<'_> {
    fn is_linewise_selection(&self) -> bool {
        self.state
            .anchor
            .is_some_and(|anchor| anchor.kind == VisualKind::LineWise)
    }

    /// The text of `[begin, end)` as it goes to the clipboard. Whole-line
    /// text always ends in exactly one newline; that is what marks it as
    /// linewise when pasted.
    fn register_text(&self, begin: usize, end: usize, linewise: bool) -> String {
        let mut text = self.buf.slice(begin, end);
        if linewise && !text.ends_with('\n') {
            // The last line was taken together with the newline before it.
            if text.starts_with('\n') {
                text.remove(0);
            }
            text.push('\n');
        }
        text
    }

    /// Whole lines that run to the end of the buffer have no newline after
    /// them, so the one before the first line goes with them. A selection
    /// made on the last line already starts on that newline.
    fn linewise_delete_begin(&self, begin: usize, end: usize) -> usize {
        let len = self.buf.len_chars();
        if end != len || begin == 0 || !self.buf.starts_line(begin) {
            return begin;
        }
        if self.buf.char_at(len - 1) == Some('\n') {
            return begin;
        }
        let started_on_last_line = self
            .state
            .anchor
            .and_then(|anchor| anchor.bounds(&*self.buf))
            .is_some_and(|(anchor_begin, anchor_end)| anchor_begin == begin && anchor_end == len);
        if started_on_last_line {
            begin
        } else {
            begin - 1
        }
    }

    /// Cuts the selection to the clipboard. Without a selection the
    /// character under the cursor goes, or the one before it at the end of
    /// a line; an empty line is left alone.
    pub(crate) fn delete_selection(&mut self) {
        self.cut_selection(true);
    }

    /// Cuts the selection to make room for typing. Whole lines at the end
    /// of the buffer leave an empty line behind.
    fn change_selection(&mut self) {
        self.cut_selection(false);
    }

    fn cut_selection(&mut self, join_last_line: bool) {
        let (mut begin, mut end) = self.ordered_selection();
        let linewise = begin != end && self.is_linewise_selection();
        if linewise && join_last_line {
            begin = self.linewise_delete_begin(begin, end);
        }

        if begin == end {
            let starts = self.buf.starts_line(begin);
            let ends = self.buf.ends_line(end);
            if starts && ends {
                return;
            } else if !ends {
                end += 1;
            } else if !self.buf.backward_char(&mut begin) {
                return;
            }
        }

        let text = self.register_text(begin, end, linewise);
        tracing::trace!(begin, end, linewise, "delete");
        self.clipboard.set(text);

        self.buf.begin_user_action();
        self.buf.delete(begin, end);
        self.buf.end_user_action();

        if linewise {
            let line = self.buf.line_of(begin.min(self.buf.len_chars()));
            let first = self.buf.first_non_blank(line);
            self.buf.place_cursor(first);
        } else {
            self.buf.place_cursor(begin);
        }
        if let Some(anchor) = self.state.anchor.take() {
            anchor.release(&mut *self.buf);
        }
        self.update_target_column();
    }

    /// Copies the selection to the clipboard and collapses it to its start.
    pub(crate) fn yank(&mut self) {
        let (begin, end) = self.ordered_selection();
        let text = self.register_text(begin, end, self.is_linewise_selection());
        self.clipboard.set(text);
        self.buf.place_cursor(begin);
        self.update_target_column();
    }

    /// Selects what `d{modifier}` acts on and deletes it. Returns whether
    /// anything was selected.
    fn delete_with(&mut self, count: u32, modifier: Option<char>) -> bool {
        if !self.select_operand(count, modifier) {
            return false;
        }
        self.delete_selection();
        true
    }

    fn change_with(&mut self, count: u32, modifier: Option<char>) -> bool {
        if !self.select_operand(count, modifier) {
            return false;
        }
        self.change_selection();
        true
    }

    /// Selects what an operator with `modifier` acts on, unless a selection
    /// already exists.
    fn select_operand(&mut self, count: u32, modifier: Option<char>) -> bool {
        if !self.buf.has_selection() {
            match modifier {
                Some('d') => self.select_lines(count),
                Some(motion) => {
                    if !self.apply_motion(motion, count) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// Empties `count` lines but keeps them as one line to type into.
    fn change_lines(&mut self, count: u32) {
        self.clear_selection();
        let first = self.buf.line_of(self.buf.cursor());
        let last = (first + times(count) as usize - 1).min(self.buf.line_count() - 1);
        let line_start = self.buf.line_start(first);
        let end = self.buf.line_end(last);

        let mut text = self.buf.slice(line_start, end);
        text.push('\n');
        self.clipboard.set(text);

        let begin = if self.config.auto_indent {
            self.buf.first_non_blank(first)
        } else {
            line_start
        };
        self.buf.begin_user_action();
        self.buf.delete(begin, end);
        self.buf.end_user_action();
        self.buf.place_cursor(begin);
    }

    fn delete_to_end(&mut self, count: u32) {
        self.clear_selection();
        let cursor = self.buf.cursor();
        let line = self.buf.line_of(cursor);
        let last = (line + times(count) as usize - 1).min(self.buf.line_count() - 1);
        let end = self.buf.line_end(last);
        if cursor >= end {
            return;
        }
        self.buf.select_range(end, cursor);
        self.delete_selection();
    }

    /// Rewrites `[begin, end)` with its case changed and returns the new end.
    pub(crate) fn change_case(&mut self, begin: usize, end: usize, change: CaseChange) -> usize {
        let original = self.buf.slice(begin, end);
        let changed = change.apply(&original);
        if changed == original {
            return end;
        }
        self.buf.begin_user_action();
        self.buf.delete(begin, end);
        self.buf.insert(begin, &changed);
        self.buf.end_user_action();
        begin + changed.chars().count()
    }

    fn toggle_case(&mut self, count: u32) {
        if self.buf.has_selection() {
            let (begin, end) = self.ordered_selection();
            self.change_case(begin, end, CaseChange::Toggle);
            self.buf.place_cursor(begin);
            self.clear_selection();
        } else {
            let cursor = self.buf.cursor();
            let end = (cursor + times(count) as usize).min(self.buf.line_end_at(cursor));
            if end == cursor {
                return;
            }
            let end = self.change_case(cursor, end, CaseChange::Toggle);
            self.buf.place_cursor(end);
        }
        self.update_target_column();
    }

    /// Replaces every character of the selection, or `count` characters from
    /// the cursor, with `ch`. Newlines are kept and the clipboard is untouched.
    fn replace(&mut self, count: u32, ch: char) {
        let has_selection = self.buf.has_selection();
        let (begin, end) = if has_selection {
            self.ordered_selection()
        } else {
            let cursor = self.buf.cursor();
            let end = cursor + times(count) as usize;
            if end > self.buf.line_end_at(cursor) {
                return;
            }
            (cursor, end)
        };
        if begin == end {
            return;
        }

        let text: String = self
            .buf
            .slice(begin, end)
            .chars()
            .map(|c| if c == '\n' { c } else { ch })
            .collect();

        self.buf.begin_user_action();
        self.buf.delete(begin, end);
        self.buf.insert(begin, &text);
        self.buf.end_user_action();

        self.buf.place_cursor(if has_selection { begin } else { end - 1 });
        self.update_target_column();
    }

    /// Joins `count` lines (at least two) starting at the cursor line, or the
    /// lines of the selection.
    fn join(&mut self, count: u32) {
        let (first, mut last) = if self.buf.has_selection() {
            let (begin, end) = self.ordered_selection();
            let mut last = self.buf.line_of(end);
            if end > begin && self.buf.starts_line(end) {
                last -= 1;
            }
            (self.buf.line_of(begin), last)
        } else {
            let first = self.buf.line_of(self.buf.cursor());
            (first, first + count.max(2) as usize - 1)
        };
        last = last.max(first + 1).min(self.buf.line_count() - 1);
        if last <= first {
            return;
        }

        let begin = self.buf.line_start(first);
        let end = self.buf.line_end(last);
        let text = self.buf.slice(begin, end);
        let mut lines = text.split('\n');
        let mut joined = lines.next().unwrap_or_default().to_owned();
        let mut join_at = joined.chars().count();

        for line in lines {
            let part = line.trim_start();
            join_at = joined.chars().count();
            if part.is_empty() {
                continue;
            }
            if !joined.is_empty() && !joined.ends_with([' ', '\t']) && !part.starts_with(')') {
                joined.push(' ');
            }
            joined.push_str(part);
        }

        self.buf.begin_user_action();
        self.buf.delete(begin, end);
        self.buf.insert(begin, &joined);
        self.buf.end_user_action();

        self.clear_selection();
        self.buf.place_cursor(begin + join_at);
        self.update_target_column();
    }

    /// Shifts whole lines by one `shiftwidth`, `times` over.
    fn shift_lines(&mut self, count: u32, outdent: bool) {
        let (first, last, repeat) = if self.buf.has_selection() {
            let (begin, end) = self.ordered_selection();
            let mut last = self.buf.line_of(end);
            if end > begin && self.buf.starts_line(end) {
                last -= 1;
            }
            (self.buf.line_of(begin), last, times(count))
        } else {
            let first = self.buf.line_of(self.buf.cursor());
            let last = (first + times(count) as usize - 1).min(self.buf.line_count() - 1);
            (first, last, 1)
        };

        let unit = self.config.indent_unit();
        let width = self.config.effective_shift_width();

        self.buf.begin_user_action();
        for _ in 0..repeat {
            for line in first..=last {
                let start = self.buf.line_start(line);
                if outdent {
                    let mut end = start;
                    let mut columns = 0;
                    while columns < width {
                        match self.buf.char_at(end) {
                            Some(' ') => columns += 1,
                            Some('\t') => columns = width,
                            _ => break,
                        }
                        end += 1;
                    }
                    if end > start {
                        self.buf.delete(start, end);
                    }
                } else if !self.buf.ends_line(start) {
                    self.buf.insert(start, &unit);
                }
            }
        }
        self.buf.end_user_action();

        self.clear_selection();
        let first_non_blank = self.buf.first_non_blank(first);
        self.buf.place_cursor(first_non_blank);
        self.update_target_column();
        tracing::debug!(first, last, outdent, "shifted lines");
    }

    fn paste(&mut self, before: bool) {
        let Some(text) = self.clipboard.get() else {
            return;
        };
        if text.is_empty() {
            return;
        }

        self.clear_selection();
        let cursor = self.buf.cursor();
        let line = self.buf.line_of(cursor);

        self.buf.begin_user_action();
        if let Some(body) = text.strip_suffix('\n') {
            let target_line = if before {
                let start = self.buf.line_start(line);
                self.buf.insert(start, &text);
                line
            } else {
                let end = self.buf.line_end(line);
                self.buf.insert(end, &format!("\n{body}"));
                line + 1
            };
            let first = self.buf.first_non_blank(target_line);
            self.buf.place_cursor(first);
        } else {
            let at = if before || self.buf.ends_line(cursor) {
                cursor
            } else {
                cursor + 1
            };
            self.buf.insert(at, &text);
            self.buf.place_cursor(at + text.chars().count() - 1);
        }
        self.buf.end_user_action();
        self.update_target_column();
    }

    /// Opens a line below the cursor line and puts the cursor on it.
    fn insert_nl_after(&mut self, auto_indent: bool) {
        let end = self.buf.line_end_at(self.buf.cursor());
        self.buf.insert(end, "\n");
        self.buf.place_cursor(end + 1);
        if auto_indent {
            self.maybe_auto_indent();
        }
        self.update_target_column();
    }

    /// Opens a line above the cursor line and puts the cursor on it.
    fn insert_nl_before(&mut self) {
        let line = self.buf.line_of(self.buf.cursor());
        let start = self.buf.line_start(line);
        self.buf.insert(start, "\n");
        self.buf.place_cursor(start);
        self.maybe_auto_indent();
        self.update_target_column();
    }

    /// Lets the auto-indenter format the cursor position as if Enter had
    /// just been typed there.
    fn maybe_auto_indent(&mut self) {
        if !self.config.auto_indent {
            return;
        }
        let Some(indenter) = self.indenter.as_deref_mut() else {
            return;
        };
        let key = KeyEvent::new(KeyCode::Enter);
        if !indenter.is_trigger(&key) {
            return;
        }

        let cursor = self.buf.cursor();
        let Some(edit) = indenter.format(&*self.buf, cursor, cursor, &key) else {
            return;
        };

        self.buf.begin_user_action();
        if edit.begin != edit.end {
            self.buf.delete(edit.begin, edit.end);
        }
        self.buf.insert(edit.begin, &edit.text);
        self.buf.end_user_action();

        let after = edit.begin + edit.text.chars().count();
        let cursor = after
            .saturating_add_signed(edit.cursor_offset)
            .min(self.buf.len_chars());
        self.buf.place_cursor(cursor);
    }

    pub(crate) fn undo(&mut self) {
        if self.buf.can_undo() {
            self.buf.undo();
        }
        let (_, bound, has_selection) = self.selection_bounds();
        if has_selection {
            self.buf.select_range(bound, bound);
        }
        self.clear_selection();
    }

    pub(crate) fn redo(&mut self) {
        if self.buf.can_redo() {
            self.buf.redo();
        }
        self.clear_selection();
    }

    /// Adds `by` to the decimal number under (or after) the cursor.
    pub(crate) fn increment(&mut self, by: i64) {
        let cursor = self.buf.cursor();
        let lookup = if self.buf.char_at(cursor) == Some('-') {
            cursor + 1
        } else {
            cursor
        };
        let Some((mut begin, end)) = self.buf.word_bounds_at(lookup) else {
            return;
        };
        if begin > 0 && self.buf.char_at(begin - 1) == Some('-') {
            begin -= 1;
        }

        let text = self.buf.slice(begin, end);
        let Ok(value) = text.parse::<i64>() else {
            tracing::debug!(%text, "no number under cursor");
            return;
        };
        let Some(value) = value.checked_add(by) else {
            return;
        };
        let replacement = value.to_string();

        self.buf.begin_user_action();
        self.buf.delete(begin, end);
        self.buf.insert(begin, &replacement);
        self.buf.end_user_action();

        self.buf.place_cursor(begin + replacement.len() - 1);
        self.update_target_column();
    }

    /// Deletes back to the first non-blank, or to the line start when the
    /// cursor is already there, or the preceding newline at column 0.
    pub(crate) fn delete_to_line_start(&mut self) {
        self.clear_selection();
        let end = self.buf.cursor();
        let begin = if self.buf.starts_line(end) {
            match end.checked_sub(1) {
                Some(begin) => begin,
                None => return,
            }
        } else {
            let line = self.buf.line_of(end);
            let first_non_blank = self.buf.first_non_blank(line);
            if first_non_blank < end {
                first_non_blank
            } else {
                self.buf.line_start(line)
            }
        };

        self.buf.begin_user_action();
        self.buf.delete(begin, end);
        self.buf.end_user_action();
        self.buf.place_cursor(begin);
        self.update_target_column();
    }

    /// Starts a whole-word search for the selection or the word at the cursor.
    fn search_word(&mut self, forward: bool) {
        let (begin, end) = if self.buf.has_selection() {
            self.ordered_selection()
        } else {
            match self.buf.word_bounds_at(self.buf.cursor()) {
                Some(bounds) => bounds,
                None => return,
            }
        };

        let text = self.buf.slice(begin, end);
        tracing::debug!(%text, forward, "searching word");
        self.search.set_settings(SearchSettings {
            text,
            at_word_boundaries: true,
            case_sensitive: true,
            wrap_around: true,
        });
        self.search.set_highlight(true);
        self.issue_search(if forward { end } else { begin }, forward);
    }
}

pub(crate) fn cmd_repeat(_vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    tracing::trace!(count, "repeat is not supported");
}

pub(crate) fn cmd_begin_search(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.search.set_highlight(false);
    let text = vim.buf.has_selection().then(|| {
        let (begin, end) = vim.ordered_selection();
        vim.buf.slice(begin, end)
    });
    vim.emit(EngineEvent::BeginSearch(text));
}

pub(crate) fn cmd_line_end(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.move_line_end();
}

pub(crate) fn cmd_line0(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.move_line0();
}

pub(crate) fn cmd_line_start(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.move_line_start(false);
}

pub(crate) fn cmd_forward_paragraph(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.move_forward_paragraph();
    }
}

pub(crate) fn cmd_backward_paragraph(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.move_backward_paragraph();
    }
}

// A count does not repeat a search: each request supersedes the last.
pub(crate) fn cmd_match_backward(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.search_word(false);
}

pub(crate) fn cmd_match_forward(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.search_word(true);
}

pub(crate) fn cmd_indent(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.shift_lines(count, false);
}

pub(crate) fn cmd_unindent(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.shift_lines(count, true);
}

pub(crate) fn cmd_matching_bracket(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.move_matching_bracket();
}

pub(crate) fn cmd_toggle_case(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.toggle_case(count);
}

pub(crate) fn cmd_insert_end(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.set_mode(Mode::Insert);
    vim.move_line_end();
}

pub(crate) fn cmd_insert_after(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.set_mode(Mode::Insert);
    vim.move_forward();
}

pub(crate) fn cmd_backward_word(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.move_backward_word();
    }
}

pub(crate) fn cmd_change(vim: &mut Vim<'_>, count: u32, modifier: Option<char>) {
    let changed = match modifier {
        Some('c') => {
            vim.change_lines(count);
            true
        }
        // `cd` is not a change.
        Some('d') => false,
        Some('w') => vim.change_with(count, Some('e')),
        Some('W') => vim.change_with(count, Some('E')),
        modifier => vim.change_with(count, modifier),
    };
    if changed {
        vim.set_mode(Mode::Insert);
    }
}

pub(crate) fn cmd_change_to_end(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.delete_to_end(count);
    vim.set_mode(Mode::Insert);
}

pub(crate) fn cmd_delete(vim: &mut Vim<'_>, count: u32, modifier: Option<char>) {
    vim.delete_with(count, modifier);
}

pub(crate) fn cmd_delete_to_end(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.delete_to_end(count);
}

pub(crate) fn cmd_forward_word_end(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.move_forward_word_end();
    }
}

pub(crate) fn cmd_goto_line(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    if count > 0 {
        vim.move_to_line_n(count as usize - 1);
    } else if vim.buf.has_selection() {
        vim.move_to_end();
    } else {
        let last = vim.buf.line_count() - 1;
        vim.move_to_line_n(last);
    }
}

pub(crate) fn cmd_g(vim: &mut Vim<'_>, count: u32, modifier: Option<char>) {
    let change = match modifier {
        Some('g') => {
            vim.move_to_line_n(count.saturating_sub(1) as usize);
            return;
        }
        Some('~') => CaseChange::Toggle,
        Some('u') => CaseChange::Lower,
        Some('U') => CaseChange::Upper,
        _ => return,
    };

    if !vim.buf.has_selection() {
        return;
    }
    let (begin, end) = vim.ordered_selection();
    vim.change_case(begin, end, change);
    vim.clear_selection();
    vim.buf.place_cursor(begin);
    vim.update_target_column();
}

pub(crate) fn cmd_move_backward(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.move_backward();
    }
}

pub(crate) fn cmd_insert_start(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.set_mode(Mode::Insert);
    vim.move_line_start(true);
}

pub(crate) fn cmd_insert(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.set_mode(Mode::Insert);
}

pub(crate) fn cmd_move_down(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.move_down();
    }
}

pub(crate) fn cmd_join(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.join(count);
}

pub(crate) fn cmd_move_up(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.move_up();
    }
}

pub(crate) fn cmd_jump_to_doc(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    let Some((begin, end)) = vim.buf.word_bounds_at(vim.buf.cursor()) else {
        return;
    };
    let word = vim.buf.slice(begin, end);
    vim.emit(EngineEvent::JumpToDoc(word));
    vim.clear_selection();
    vim.buf.place_cursor(begin);
    vim.update_target_column();
}

pub(crate) fn cmd_move_forward(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.move_forward();
    }
}

pub(crate) fn cmd_insert_before_line(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.set_mode(Mode::Insert);
    vim.insert_nl_before();
}

pub(crate) fn cmd_insert_after_line(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.set_mode(Mode::Insert);
    vim.insert_nl_after(true);
}

pub(crate) fn cmd_paste_after(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.buf.begin_user_action();
    for _ in 0..times(count) {
        vim.paste(false);
    }
    vim.buf.end_user_action();
}

pub(crate) fn cmd_paste_before(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.buf.begin_user_action();
    for _ in 0..times(count) {
        vim.paste(true);
    }
    vim.buf.end_user_action();
}

pub(crate) fn cmd_overwrite(vim: &mut Vim<'_>, _count: u32, _modifier: Option<char>) {
    vim.set_mode(Mode::Insert);
    vim.emit(EngineEvent::Overwrite(true));
}

pub(crate) fn cmd_replace(vim: &mut Vim<'_>, count: u32, modifier: Option<char>) {
    if let Some(ch) = modifier {
        vim.replace(count, ch);
    }
    vim.clear_selection();
}

pub(crate) fn cmd_substitute(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    if vim.buf.has_selection() || vim.apply_motion('l', count) {
        vim.change_selection();
    }
    vim.set_mode(Mode::Insert);
}

pub(crate) fn cmd_undo(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.undo();
    }
}

pub(crate) fn cmd_select_line(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.select_line();
    for _ in 1..times(count) {
        vim.move_down();
    }
}

pub(crate) fn cmd_select(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    vim.select_char();
    for _ in 1..times(count) {
        vim.move_forward();
    }
}

pub(crate) fn cmd_forward_word(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    for _ in 0..times(count) {
        vim.move_forward_word();
    }
}

pub(crate) fn cmd_delete_selection(vim: &mut Vim<'_>, count: u32, _modifier: Option<char>) {
    if !vim.buf.has_selection() {
        let cursor = vim.buf.cursor();
        let end = (cursor + times(count) as usize).min(vim.buf.line_end_at(cursor));
        if end > cursor {
            vim.buf.select_range(end, cursor);
        }
    }
    vim.delete_selection();
}

pub(crate) fn cmd_yank(vim: &mut Vim<'_>, count: u32, modifier: Option<char>) {
    vim.save_position();

    if !vim.buf.has_selection() {
        let selected = match modifier {
            Some('y') => {
                vim.select_lines(count);
                true
            }
            Some(motion) => vim.apply_motion(motion, count),
            None => false,
        };
        if !selected {
            vim.restore_position();
            return;
        }
    }

    vim.yank();
    vim.clear_selection();
    vim.restore_position();
}

pub(crate) fn cmd_center(vim: &mut Vim<'_>, _count: u32, modifier: Option<char>) {
    let yalign = match modifier {
        Some('z') => 0.5,
        Some('t') => 0.0,
        Some('b') => 1.0,
        _ => return,
    };
    let offset = vim.buf.cursor();
    vim.emit(EngineEvent::ScrollTo { offset, yalign });
}
