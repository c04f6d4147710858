use std::collections::VecDeque;

use crate::classify::CharClass;
use crate::error::SearchError;
use crate::traits::{
    SearchMatch, SearchOutcome, SearchProvider, SearchSettings, SearchTicket, TextBuffer,
};

/// Literal search over the buffer's text.
///
/// Requests resolve immediately; their results wait in a queue until
/// [`SearchProvider::poll`] collects them, so callers see the same flow as
/// with a provider that searches on another thread.
#[derive(Debug, Default)]
pub struct BufferSearch {
    settings: SearchSettings,
    highlight: bool,
    completed: VecDeque<(SearchTicket, SearchOutcome)>,
}

impl BufferSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin offsets of every non-overlapping match, in buffer order.
    pub fn find_all(&self, buffer: &dyn TextBuffer) -> Result<Vec<usize>, SearchError> {
        let needle: Vec<char> = self.settings.text.chars().collect();
        if needle.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        let haystack: Vec<char> = buffer.slice(0, buffer.len_chars()).chars().collect();
        let case_sensitive = self.settings.case_sensitive;
        let same = |a: char, b: char| {
            a == b || (!case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
        };
        let is_word = |c: Option<&char>| c.is_some_and(|&c| CharClass::of(c) == CharClass::Word);

        let mut matches = Vec::new();
        let mut at = 0;
        while at + needle.len() <= haystack.len() {
            let end = at + needle.len();
            let hit = haystack[at..end].iter().zip(&needle).all(|(&a, &b)| same(a, b));
            let bounded = !self.settings.at_word_boundaries
                || ((at == 0 || !is_word(haystack.get(at - 1))) && !is_word(haystack.get(end)));
            if hit && bounded {
                matches.push(at);
                at = end;
            } else {
                at += 1;
            }
        }
        Ok(matches)
    }

    fn locate(&self, buffer: &dyn TextBuffer, from: usize, forward: bool) -> SearchOutcome {
        let matches = self.find_all(buffer)?;
        let width = self.settings.text.chars().count();
        let found = if forward {
            matches
                .iter()
                .find(|&&begin| begin >= from)
                .or_else(|| matches.first().filter(|_| self.settings.wrap_around))
        } else {
            matches
                .iter()
                .rev()
                .find(|&&begin| begin < from)
                .or_else(|| matches.last().filter(|_| self.settings.wrap_around))
        };
        Ok(found.map(|&begin| SearchMatch {
            begin,
            end: begin + width,
        }))
    }
}

impl SearchProvider for BufferSearch {
    fn set_settings(&mut self, settings: SearchSettings) {
        self.settings = settings;
    }

    fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    fn set_highlight(&mut self, enabled: bool) {
        self.highlight = enabled;
    }

    fn highlight(&self) -> bool {
        self.highlight
    }

    fn forward_async(&mut self, buffer: &dyn TextBuffer, from: usize, ticket: SearchTicket) {
        let outcome = self.locate(buffer, from, true);
        self.completed.push_back((ticket, outcome));
    }

    fn backward_async(&mut self, buffer: &dyn TextBuffer, from: usize, ticket: SearchTicket) {
        let outcome = self.locate(buffer, from, false);
        self.completed.push_back((ticket, outcome));
    }

    fn cancel(&mut self, ticket: SearchTicket) {
        self.completed.retain(|(pending, _)| *pending != ticket);
    }

    fn poll(&mut self) -> Option<(SearchTicket, SearchOutcome)> {
        self.completed.pop_front()
    }

    fn replace_all(
        &mut self,
        buffer: &mut dyn TextBuffer,
        replacement: &str,
    ) -> Result<usize, SearchError> {
        let matches = self.find_all(buffer)?;
        let width = self.settings.text.chars().count();
        buffer.begin_user_action();
        for &begin in matches.iter().rev() {
            buffer.delete(begin, begin + width);
            buffer.insert(begin, replacement);
        }
        buffer.end_user_action();
        tracing::debug!(count = matches.len(), "replaced matches");
        Ok(matches.len())
    }
}
