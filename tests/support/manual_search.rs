use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use vim_core::{
    SearchError, SearchOutcome, SearchProvider, SearchSettings, SearchTicket, TextBuffer,
};

#[derive(Debug, Default)]
pub struct SearchLog {
    /// `(ticket, from, forward)` for every request.
    pub requests: Vec<(SearchTicket, usize, bool)>,
    pub cancelled: Vec<SearchTicket>,
    /// Results handed out by `poll`, pushed by the test.
    pub ready: VecDeque<(SearchTicket, SearchOutcome)>,
}

/// A search provider whose results arrive only when the test says so.
/// Cancelling records the ticket but leaves queued results in place.
#[derive(Debug, Default)]
pub struct ManualSearch {
    log: Rc<RefCell<SearchLog>>,
    settings: SearchSettings,
    highlight: bool,
}

impl ManualSearch {
    pub fn new() -> (Self, Rc<RefCell<SearchLog>>) {
        let search = Self::default();
        let log = Rc::clone(&search.log);
        (search, log)
    }
}

impl SearchProvider for ManualSearch {
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

    fn forward_async(&mut self, _buffer: &dyn TextBuffer, from: usize, ticket: SearchTicket) {
        self.log.borrow_mut().requests.push((ticket, from, true));
    }

    fn backward_async(&mut self, _buffer: &dyn TextBuffer, from: usize, ticket: SearchTicket) {
        self.log.borrow_mut().requests.push((ticket, from, false));
    }

    fn cancel(&mut self, ticket: SearchTicket) {
        self.log.borrow_mut().cancelled.push(ticket);
    }

    fn poll(&mut self) -> Option<(SearchTicket, SearchOutcome)> {
        self.log.borrow_mut().ready.pop_front()
    }

    fn replace_all(
        &mut self,
        _buffer: &mut dyn TextBuffer,
        _replacement: &str,
    ) -> Result<usize, SearchError> {
        Ok(0)
    }
}
