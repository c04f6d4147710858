use std::collections::VecDeque;

use ropey::Rope;

use crate::traits::{Gravity, MarkId, TextBuffer};

#[derive(Debug, Clone)]
struct Snapshot {
    rope: Rope,
    cursor: usize,
}

#[derive(Debug, Clone)]
struct MarkSlot {
    generation: u32,
    mark: Option<(usize, Gravity)>,
}

/// Undo steps a buffer keeps unless told otherwise.
pub const DEFAULT_UNDO_LIMIT: usize = 1000;

/// A rope-backed [`TextBuffer`] with marks, selection and snapshot undo.
///
/// Every user action (or every bare edit outside one) becomes a single undo
/// step. Snapshots share structure with the live rope, so they are cheap.
/// Past the undo limit the oldest step is forgotten.
#[derive(Debug, Clone)]
pub struct RopeBuffer {
    rope: Rope,
    insert: usize,
    bound: usize,
    marks: Vec<MarkSlot>,
    action_depth: usize,
    action_start: Option<Snapshot>,
    action_dirty: bool,
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    undo_limit: Option<usize>,
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self {
            rope: Rope::new(),
            insert: 0,
            bound: 0,
            marks: Vec::new(),
            action_depth: 0,
            action_start: None,
            action_dirty: false,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            undo_limit: Some(DEFAULT_UNDO_LIMIT),
        }
    }
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::default()
        }
    }

    /// Caps the undo history at `limit` steps; `None` keeps every step.
    pub fn with_undo_limit(mut self, limit: Option<usize>) -> Self {
        self.undo_limit = limit;
        self.trim_undo();
        self
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The selection as an ordered `(begin, end)` pair.
    pub fn selection(&self) -> (usize, usize) {
        (self.insert.min(self.bound), self.insert.max(self.bound))
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            rope: self.rope.clone(),
            cursor: self.insert,
        }
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        self.trim_undo();
    }

    fn trim_undo(&mut self) {
        if let Some(limit) = self.undo_limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.rope = snapshot.rope;
        let len = self.rope.len_chars();
        let cursor = snapshot.cursor.min(len);
        self.insert = cursor;
        self.bound = cursor;
        for slot in &mut self.marks {
            if let Some((offset, _)) = slot.mark.as_mut() {
                *offset = (*offset).min(len);
            }
        }
    }

    fn edit(&mut self, apply: impl FnOnce(&mut Self)) {
        self.begin_user_action();
        self.action_dirty = true;
        apply(self);
        self.end_user_action();
    }

    fn slot(&self, mark: MarkId) -> Option<&MarkSlot> {
        self.marks
            .get(mark.index as usize)
            .filter(|slot| slot.generation == mark.generation)
    }
}

fn shift_for_insert(offset: &mut usize, gravity: Gravity, at: usize, count: usize) {
    if *offset > at || (*offset == at && gravity == Gravity::Right) {
        *offset += count;
    }
}

fn shift_for_delete(offset: &mut usize, begin: usize, end: usize) {
    if *offset >= end {
        *offset -= end - begin;
    } else if *offset > begin {
        *offset = begin;
    }
}

impl TextBuffer for RopeBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        (offset < self.rope.len_chars()).then(|| self.rope.char(offset))
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_of(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    fn line_start(&self, line: usize) -> usize {
        let last = self.rope.len_lines().saturating_sub(1);
        self.rope.line_to_char(line.min(last))
    }

    fn slice(&self, begin: usize, end: usize) -> String {
        let len = self.rope.len_chars();
        let end = end.min(len);
        let begin = begin.min(end);
        self.rope.slice(begin..end).to_string()
    }

    fn insert(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = offset.min(self.rope.len_chars());
        let count = text.chars().count();
        self.edit(|buf| {
            buf.rope.insert(at, text);
            shift_for_insert(&mut buf.insert, Gravity::Right, at, count);
            shift_for_insert(&mut buf.bound, Gravity::Right, at, count);
            for slot in &mut buf.marks {
                if let Some((offset, gravity)) = slot.mark.as_mut() {
                    shift_for_insert(offset, *gravity, at, count);
                }
            }
        });
    }

    fn delete(&mut self, begin: usize, end: usize) {
        let len = self.rope.len_chars();
        let (begin, end) = (begin.min(end).min(len), begin.max(end).min(len));
        if begin == end {
            return;
        }
        self.edit(|buf| {
            buf.rope.remove(begin..end);
            shift_for_delete(&mut buf.insert, begin, end);
            shift_for_delete(&mut buf.bound, begin, end);
            for slot in &mut buf.marks {
                if let Some((offset, _)) = slot.mark.as_mut() {
                    shift_for_delete(offset, begin, end);
                }
            }
        });
    }

    fn create_mark(&mut self, offset: usize, gravity: Gravity) -> MarkId {
        let offset = offset.min(self.rope.len_chars());
        if let Some(index) = self.marks.iter().position(|slot| slot.mark.is_none()) {
            let slot = &mut self.marks[index];
            slot.generation = slot.generation.wrapping_add(1);
            slot.mark = Some((offset, gravity));
            return MarkId {
                index: index as u32,
                generation: slot.generation,
            };
        }
        self.marks.push(MarkSlot {
            generation: 0,
            mark: Some((offset, gravity)),
        });
        MarkId {
            index: (self.marks.len() - 1) as u32,
            generation: 0,
        }
    }

    fn move_mark(&mut self, mark: MarkId, offset: usize) {
        let offset = offset.min(self.rope.len_chars());
        if let Some(slot) = self.marks.get_mut(mark.index as usize)
            && slot.generation == mark.generation
            && let Some((current, _)) = slot.mark.as_mut()
        {
            *current = offset;
        }
    }

    fn mark_offset(&self, mark: MarkId) -> Option<usize> {
        self.slot(mark).and_then(|slot| slot.mark).map(|(offset, _)| offset)
    }

    fn delete_mark(&mut self, mark: MarkId) {
        if let Some(slot) = self.marks.get_mut(mark.index as usize)
            && slot.generation == mark.generation
        {
            slot.mark = None;
        }
    }

    fn cursor(&self) -> usize {
        self.insert
    }

    fn selection_bound(&self) -> usize {
        self.bound
    }

    fn select_range(&mut self, insert: usize, bound: usize) {
        let len = self.rope.len_chars();
        self.insert = insert.min(len);
        self.bound = bound.min(len);
    }

    fn begin_user_action(&mut self) {
        if self.action_depth == 0 {
            self.action_start = Some(self.snapshot());
            self.action_dirty = false;
        }
        self.action_depth += 1;
    }

    fn end_user_action(&mut self) {
        if self.action_depth == 0 {
            return;
        }
        self.action_depth -= 1;
        if self.action_depth == 0
            && let Some(start) = self.action_start.take()
            && self.action_dirty
        {
            self.push_undo(start);
            self.redo_stack.clear();
        }
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn undo(&mut self) {
        if let Some(snapshot) = self.undo_stack.pop_back() {
            let current = self.snapshot();
            self.redo_stack.push(current);
            self.restore(snapshot);
        }
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn redo(&mut self) {
        if let Some(snapshot) = self.redo_stack.pop() {
            let current = self.snapshot();
            self.push_undo(current);
            self.restore(snapshot);
        }
    }
}
