use crate::anchor::SelectionAnchor;
use crate::clipboard::LocalClipboard;
use crate::config::EngineConfig;
use crate::ex::{self, ExCommandParser};
use crate::iter::OffsetIter;
use crate::key::{KeyCode, KeyEvent};
use crate::motion::PageDirection;
use crate::phrase::{Phrase, PhraseParser, PhraseStatus};
use crate::registry;
use crate::search::BufferSearch;
use crate::traits::{AutoIndenter, Clipboard, SearchProvider, SearchTicket, TextBuffer};
use crate::types::{EngineEvent, KeyResult, Mode, Position, Viewport};

#[derive(Debug, Default)]
pub(crate) struct EngineState {
    pub(crate) mode: Mode,
    pub(crate) phrase: String,
    pub(crate) target_column: usize,
    pub(crate) stash: Position,
    pub(crate) anchor: Option<SelectionAnchor>,
    pub(crate) viewport: Option<Viewport>,
    pub(crate) pending_search: Option<SearchTicket>,
    pub(crate) next_ticket: u64,
    pub(crate) command_line: String,
}

/// Everything a command handler may touch while one key is processed.
pub(crate) struct Vim<'a> {
    pub(crate) buf: &'a mut dyn TextBuffer,
    pub(crate) state: &'a mut EngineState,
    pub(crate) config: &'a mut EngineConfig,
    pub(crate) clipboard: &'a mut dyn Clipboard,
    pub(crate) search: &'a mut dyn SearchProvider,
    pub(crate) indenter: Option<&'a mut dyn AutoIndenter>,
    pub(crate) events: &'a mut Vec<EngineEvent>,
}

impl Vim<'_> {
    pub(crate) fn emit(&mut self, event: EngineEvent) {
        tracing::trace!(?event, "engine event");
        self.events.push(event);
    }

    pub(crate) fn clear_phrase(&mut self) {
        if !self.state.phrase.is_empty() {
            self.state.phrase.clear();
            self.emit(EngineEvent::PhraseChanged(String::new()));
        }
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        let previous = self.state.mode;
        if mode == previous {
            return;
        }

        // One insert session is one undo step.
        if mode == Mode::Insert {
            self.buf.begin_user_action();
        } else if previous == Mode::Insert {
            self.buf.end_user_action();
        }

        self.state.mode = mode;
        tracing::debug!(from = ?previous, to = ?mode, "mode changed");

        self.emit(EngineEvent::Overwrite(mode != Mode::Insert));
        self.clear_phrase();

        if mode == Mode::Normal {
            self.update_target_column();
        }
        if mode != Mode::Command {
            self.clear_selection();
        }
        if mode == Mode::Command || previous == Mode::Command {
            self.state.command_line.clear();
            self.emit(EngineEvent::CommandBarVisibility(mode == Mode::Command));
        }
        self.emit(EngineEvent::ModeChanged(mode));
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        tracing::trace!(?key, mode = ?self.state.mode, "key");
        let result = match self.state.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Insert => self.handle_insert(key),
            Mode::Command => self.handle_command(key),
        };
        self.poll_search();
        if self.state.mode == Mode::Normal {
            self.normalize_cursor();
        }
        result
    }

    /// In normal mode the cursor rests on a character, never after the last
    /// one of a non-empty line.
    fn normalize_cursor(&mut self) {
        if self.buf.has_selection() {
            return;
        }
        let cursor = self.buf.cursor();
        if self.buf.ends_line(cursor) && !self.buf.starts_line(cursor) {
            let column = self.buf.line_offset(cursor);
            self.buf.place_cursor(cursor - 1);
            if self.state.target_column == column {
                self.state.target_column = column - 1;
            }
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) -> KeyResult {
        if key.is_escape() {
            self.clear_selection();
            self.clear_phrase();
            return KeyResult::Handled;
        }

        match key.code {
            KeyCode::Enter => {
                self.clear_phrase();
                self.move_down();
                return KeyResult::Handled;
            }
            KeyCode::Backspace => {
                if self.state.phrase.is_empty() {
                    self.move_backward();
                } else {
                    self.clear_phrase();
                }
                return KeyResult::Handled;
            }
            KeyCode::Char(c) if key.is_ctrl() => return self.handle_normal_chord(c),
            _ => {}
        }

        let Some(ch) = key.text() else {
            return KeyResult::Ignored;
        };

        if ch == ':' && self.state.phrase.is_empty() {
            self.set_mode(Mode::Command);
            return KeyResult::Handled;
        }

        self.state.phrase.push(ch);
        let phrase = self.state.phrase.clone();
        self.emit(EngineEvent::PhraseChanged(phrase));

        let status = PhraseParser::parse(&self.state.phrase, self.buf.has_selection());
        tracing::trace!(phrase = %self.state.phrase, ?status, "parsed phrase");
        match status {
            PhraseStatus::Success(phrase) => self.dispatch(phrase),
            PhraseStatus::NeedMore => {}
            PhraseStatus::Failed => {
                tracing::debug!(phrase = %self.state.phrase, "discarding invalid phrase");
                self.clear_phrase();
            }
        }
        KeyResult::Handled
    }

    /// Control chords act immediately and never join a phrase.
    fn handle_normal_chord(&mut self, c: char) -> KeyResult {
        match c {
            'a' | 'x' => {
                self.clear_phrase();
                self.clear_selection();
                self.increment(if c == 'a' { 1 } else { -1 });
            }
            'b' => {
                self.clear_phrase();
                self.move_page(PageDirection::Up);
            }
            'f' => {
                self.clear_phrase();
                self.move_page(PageDirection::Down);
            }
            'd' => {
                self.clear_phrase();
                self.move_page(PageDirection::HalfDown);
            }
            'u' => {
                self.clear_phrase();
                self.move_page(PageDirection::HalfUp);
            }
            'r' => {
                self.clear_phrase();
                self.redo();
            }
            _ => return KeyResult::Ignored,
        }
        KeyResult::Handled
    }

    fn dispatch(&mut self, phrase: Phrase) {
        let Some(command) = registry::lookup(phrase.key) else {
            self.clear_phrase();
            return;
        };
        self.clear_phrase();
        tracing::debug!(
            key = %phrase.key,
            count = phrase.count,
            modifier = ?phrase.modifier,
            "dispatching command"
        );
        (command.handler)(self, phrase.count, phrase.modifier);
        if command.is_visual() {
            self.clear_selection();
        }
    }

    fn handle_insert(&mut self, key: KeyEvent) -> KeyResult {
        if key.is_escape() {
            // Back onto the last character typed, then leave insert mode.
            self.move_backward();
            self.set_mode(Mode::Normal);
            return KeyResult::Handled;
        }
        if key.is_ctrl() && key.code == KeyCode::Char('u') {
            self.delete_to_line_start();
            return KeyResult::Handled;
        }
        KeyResult::Ignored
    }

    fn handle_command(&mut self, key: KeyEvent) -> KeyResult {
        if key.is_escape() {
            self.set_mode(Mode::Normal);
            return KeyResult::Handled;
        }

        match key.code {
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.state.command_line);
                if !self.execute_command(&line) {
                    tracing::debug!(command = %line, "not an editor command");
                    self.set_mode(Mode::Normal);
                }
            }
            KeyCode::Backspace => {
                if self.state.command_line.pop().is_some() {
                    let line = self.state.command_line.clone();
                    self.emit(EngineEvent::CommandLineChanged(line));
                } else {
                    self.set_mode(Mode::Normal);
                }
            }
            KeyCode::Tab => {
                if let [only] = ExCommandParser::complete(&self.state.command_line).as_slice() {
                    self.state.command_line = only.clone();
                    let line = self.state.command_line.clone();
                    self.emit(EngineEvent::CommandLineChanged(line));
                }
            }
            _ => {
                if let Some(ch) = key.text() {
                    self.state.command_line.push(ch);
                    let line = self.state.command_line.clone();
                    self.emit(EngineEvent::CommandLineChanged(line));
                }
            }
        }
        KeyResult::Handled
    }

    pub(crate) fn execute_command(&mut self, text: &str) -> bool {
        let text = text.trim();
        if !ExCommandParser::is_command(text) {
            return false;
        }

        match ExCommandParser::parse(text) {
            Ok(command) => {
                tracing::debug!(?command, "executing ex command");
                ex::execute(self, command);
            }
            Err(err) => tracing::debug!(%err, command = text, "ex command rejected"),
        }

        self.clear_selection();
        self.set_mode(Mode::Normal);
        true
    }

    /// Starts a search, superseding any search still in flight.
    pub(crate) fn issue_search(&mut self, from: usize, forward: bool) {
        if let Some(previous) = self.state.pending_search.take() {
            self.search.cancel(previous);
        }
        self.state.next_ticket += 1;
        let ticket = SearchTicket(self.state.next_ticket);
        self.state.pending_search = Some(ticket);

        if forward {
            self.search.forward_async(&*self.buf, from, ticket);
        } else {
            self.search.backward_async(&*self.buf, from, ticket);
        }
    }

    pub(crate) fn poll_search(&mut self) {
        while let Some((ticket, outcome)) = self.search.poll() {
            if self.state.pending_search != Some(ticket) {
                tracing::trace!(?ticket, "dropping stale search result");
                continue;
            }
            self.state.pending_search = None;

            match outcome {
                Ok(Some(found)) => {
                    self.buf.place_cursor(found.begin);
                    self.clear_selection();
                    self.emit(EngineEvent::ScrollTo {
                        offset: found.begin,
                        yalign: 0.5,
                    });
                }
                Ok(None) => tracing::debug!(?ticket, "search found no match"),
                Err(err) => tracing::warn!(%err, "search failed"),
            }
        }
    }
}

/// The modal editing engine.
///
/// The engine owns its state and collaborators; the buffer is lent to it for
/// each call. Hosts feed every key press to [`Engine::handle_key`] and insert
/// the typed text themselves whenever it returns [`KeyResult::Ignored`].
pub struct Engine {
    state: EngineState,
    config: EngineConfig,
    clipboard: Box<dyn Clipboard>,
    search: Box<dyn SearchProvider>,
    indenter: Option<Box<dyn AutoIndenter>>,
    observers: Vec<Box<dyn FnMut(&EngineEvent)>>,
    events: Vec<EngineEvent>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub phrase: String,
    pub target_column: usize,
    pub command_line: String,
    pub has_anchor: bool,
    pub search_pending: bool,
}

pub struct EngineBuilder {
    config: EngineConfig,
    clipboard: Box<dyn Clipboard>,
    search: Box<dyn SearchProvider>,
    indenter: Option<Box<dyn AutoIndenter>>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            clipboard: Box::new(LocalClipboard::new()),
            search: Box::new(BufferSearch::new()),
            indenter: None,
        }
    }
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn search_provider(mut self, search: impl SearchProvider + 'static) -> Self {
        self.search = Box::new(search);
        self
    }

    pub fn auto_indenter(mut self, indenter: impl AutoIndenter + 'static) -> Self {
        self.indenter = Some(Box::new(indenter));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            state: EngineState::default(),
            config: self.config,
            clipboard: self.clipboard,
            search: self.search,
            indenter: self.indenter,
            observers: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn phrase(&self) -> &str {
        &self.state.phrase
    }

    /// The column vertical motions aim for.
    pub fn target_column(&self) -> usize {
        self.state.target_column
    }

    pub fn command_line(&self) -> &str {
        &self.state.command_line
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn clipboard_mut(&mut self) -> &mut dyn Clipboard {
        self.clipboard.as_mut()
    }

    pub fn search_provider(&self) -> &dyn SearchProvider {
        self.search.as_ref()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.state.mode,
            phrase: self.state.phrase.clone(),
            target_column: self.state.target_column,
            command_line: self.state.command_line.clone(),
            has_anchor: self.state.anchor.is_some(),
            search_pending: self.state.pending_search.is_some(),
        }
    }

    /// Registers a callback for every [`EngineEvent`].
    pub fn subscribe(&mut self, observer: impl FnMut(&EngineEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Reports which lines the host currently shows, for paging.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.state.viewport = Some(viewport);
    }

    pub fn handle_key<B: TextBuffer>(&mut self, buffer: &mut B, key: KeyEvent) -> KeyResult {
        self.with_vim(buffer, |vim| vim.handle_key(key))
    }

    pub fn set_mode<B: TextBuffer>(&mut self, buffer: &mut B, mode: Mode) {
        self.with_vim(buffer, |vim| vim.set_mode(mode));
    }

    /// Runs an ex-command line (without the leading `:`). Returns `false`
    /// and changes nothing if the text is not a command.
    pub fn execute_command<B: TextBuffer>(&mut self, buffer: &mut B, text: &str) -> bool {
        self.with_vim(buffer, |vim| vim.execute_command(text))
    }

    pub fn is_command(text: &str) -> bool {
        ExCommandParser::is_command(text.trim())
    }

    /// Applies a finished search, if the provider has one for the request
    /// still outstanding.
    pub fn poll_search<B: TextBuffer>(&mut self, buffer: &mut B) {
        self.with_vim(buffer, |vim| vim.poll_search());
    }

    /// The host view regained focus; an abandoned command line is closed.
    pub fn focus_in<B: TextBuffer>(&mut self, buffer: &mut B) {
        self.with_vim(buffer, |vim| {
            if vim.state.mode == Mode::Command {
                vim.set_mode(Mode::Normal);
            }
        });
    }

    /// The buffer the engine was editing is gone: forget its marks and any
    /// search still running against it.
    pub fn buffer_destroyed(&mut self) {
        if let Some(ticket) = self.state.pending_search.take() {
            self.search.cancel(ticket);
        }
        let previous = self.state.mode;
        self.state = EngineState {
            next_ticket: self.state.next_ticket,
            viewport: self.state.viewport,
            ..EngineState::default()
        };
        tracing::debug!("buffer destroyed; engine state reset");
        if previous != Mode::Normal {
            self.events.push(EngineEvent::ModeChanged(Mode::Normal));
        }
        self.flush_events();
    }

    fn with_vim<R>(
        &mut self,
        buffer: &mut dyn TextBuffer,
        f: impl FnOnce(&mut Vim<'_>) -> R,
    ) -> R {
        let indenter: Option<&mut dyn AutoIndenter> = match self.indenter.as_mut() {
            Some(indenter) => Some(indenter.as_mut()),
            None => None,
        };
        let mut vim = Vim {
            buf: buffer,
            state: &mut self.state,
            config: &mut self.config,
            clipboard: self.clipboard.as_mut(),
            search: self.search.as_mut(),
            indenter,
            events: &mut self.events,
        };
        let result = f(&mut vim);
        self.flush_events();
        result
    }

    fn flush_events(&mut self) {
        for event in self.events.drain(..) {
            for observer in &mut self.observers {
                observer(&event);
            }
        }
    }
}
