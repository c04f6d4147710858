use crate::error::SearchError;
use crate::key::KeyEvent;

/// Opaque handle to a mark owned by a [`TextBuffer`].
///
/// Handles carry a generation so a handle to a deleted mark never aliases a
/// mark created later in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkId {
    pub index: u32,
    pub generation: u32,
}

/// Which side a mark sticks to when text is inserted exactly at its offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    /// Stays before the inserted text.
    Left,
    /// Moves after the inserted text.
    Right,
}

/// The text storage the engine edits.
///
/// All offsets are character offsets from the start of the buffer; `len_chars()`
/// is the valid "end" position. Only `'\n'` terminates lines.
pub trait TextBuffer {
    // Basic queries
    fn len_chars(&self) -> usize;
    fn char_at(&self, offset: usize) -> Option<char>;
    fn line_count(&self) -> usize;
    fn line_of(&self, offset: usize) -> usize;
    fn line_start(&self, line: usize) -> usize; // clamps past-the-end lines to the last line
    fn slice(&self, begin: usize, end: usize) -> String;

    // Mutation; marks and the selection follow their gravity
    fn insert(&mut self, offset: usize, text: &str);
    fn delete(&mut self, begin: usize, end: usize);

    // Marks
    fn create_mark(&mut self, offset: usize, gravity: Gravity) -> MarkId;
    fn move_mark(&mut self, mark: MarkId, offset: usize);
    fn mark_offset(&self, mark: MarkId) -> Option<usize>;
    fn delete_mark(&mut self, mark: MarkId);

    // Selection: the insert mark is the cursor, the bound is the other end
    fn cursor(&self) -> usize;
    fn selection_bound(&self) -> usize;
    fn select_range(&mut self, insert: usize, bound: usize);

    fn has_selection(&self) -> bool {
        self.cursor() != self.selection_bound()
    }

    fn place_cursor(&mut self, offset: usize) {
        self.select_range(offset, offset);
    }

    // Transactions: nested actions collapse into the outermost one
    fn begin_user_action(&mut self);
    fn end_user_action(&mut self);

    // History
    fn can_undo(&self) -> bool;
    fn undo(&mut self);
    fn can_redo(&self) -> bool;
    fn redo(&mut self);
}

pub trait Clipboard {
    fn get(&mut self) -> Option<String>;
    fn set(&mut self, text: String);
}

/// Identifies one asynchronous search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchTicket(pub u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSettings {
    pub text: String,
    pub at_word_boundaries: bool,
    pub case_sensitive: bool,
    pub wrap_around: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub begin: usize,
    pub end: usize,
}

pub type SearchOutcome = Result<Option<SearchMatch>, SearchError>;

/// Literal text search over a buffer.
///
/// Requests are fire-and-forget: the result for a ticket is later returned
/// by `poll`. A provider may resolve immediately and queue the result.
pub trait SearchProvider {
    fn set_settings(&mut self, settings: SearchSettings);
    fn settings(&self) -> &SearchSettings;
    fn set_highlight(&mut self, enabled: bool);
    fn highlight(&self) -> bool;

    fn forward_async(&mut self, buffer: &dyn TextBuffer, from: usize, ticket: SearchTicket);
    fn backward_async(&mut self, buffer: &dyn TextBuffer, from: usize, ticket: SearchTicket);
    fn cancel(&mut self, ticket: SearchTicket);
    fn poll(&mut self) -> Option<(SearchTicket, SearchOutcome)>;

    /// Replace every match of the current settings; returns the number replaced.
    fn replace_all(
        &mut self,
        buffer: &mut dyn TextBuffer,
        replacement: &str,
    ) -> Result<usize, SearchError>;
}

/// A reindent of a buffer region computed by an [`AutoIndenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentEdit {
    /// Range to replace.
    pub begin: usize,
    pub end: usize,
    /// Replacement text.
    pub text: String,
    /// Cursor adjustment relative to the end of the inserted text.
    pub cursor_offset: isize,
}

pub trait AutoIndenter {
    /// Whether `key` should trigger reindentation.
    fn is_trigger(&self, key: &KeyEvent) -> bool;

    fn format(
        &mut self,
        buffer: &dyn TextBuffer,
        begin: usize,
        end: usize,
        key: &KeyEvent,
    ) -> Option<IndentEdit>;
}
