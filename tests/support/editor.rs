use std::cell::RefCell;
use std::rc::Rc;

use vim_core::{
    Clipboard, Engine, EngineEvent, KeyCode, KeyEvent, KeyResult, Mode, RopeBuffer, TextBuffer,
};

/// An engine wired to a rope buffer, acting as the host would: keys the
/// engine ignores in insert mode are inserted at the cursor.
pub struct Editor {
    pub engine: Engine,
    pub buf: RopeBuffer,
    events: Rc<RefCell<Vec<EngineEvent>>>,
}

impl Editor {
    /// `text` may contain one `|` marking the cursor (offset 0 otherwise).
    pub fn new(text: &str) -> Self {
        Self::with_engine(Engine::new(), text)
    }

    pub fn with_engine(mut engine: Engine, text: &str) -> Self {
        let (text, cursor) = split_cursor(text);
        let mut buf = RopeBuffer::from_text(&text);
        buf.place_cursor(cursor);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Self {
            engine,
            buf,
            events,
        }
    }

    pub fn key(&mut self, key: KeyEvent) -> KeyResult {
        self.engine.handle_key(&mut self.buf, key)
    }

    /// Feeds keys written in `<Esc>`, `<CR>`, `<BS>`, `<Tab>`, `<C-x>` notation.
    pub fn keys(&mut self, keys: &str) -> Vec<KeyResult> {
        parse_keys(keys).into_iter().map(|key| self.key(key)).collect()
    }

    /// Types text the way a host does: whatever the engine ignores is inserted.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            if !self.key(KeyEvent::char(c)).is_handled() {
                let at = self.buf.cursor();
                self.buf.insert(at, &c.to_string());
            }
        }
    }

    pub fn text(&self) -> String {
        self.buf.text()
    }

    pub fn cursor(&self) -> usize {
        self.buf.cursor()
    }

    /// The text with `|` inserted at the cursor.
    pub fn render(&self) -> String {
        let mut chars: Vec<char> = self.text().chars().collect();
        chars.insert(self.cursor().min(chars.len()), '|');
        chars.into_iter().collect()
    }

    pub fn selected(&self) -> String {
        let (begin, end) = self.buf.selection();
        self.buf.slice(begin, end)
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn clipboard(&mut self) -> Option<String> {
        self.engine.clipboard_mut().get()
    }

    pub fn set_clipboard(&mut self, text: &str) {
        self.engine.clipboard_mut().set(text.to_owned());
    }

    /// Events received since the last call.
    pub fn take_events(&self) -> Vec<EngineEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

fn split_cursor(marked: &str) -> (String, usize) {
    match marked.find('|') {
        Some(at) => {
            let cursor = marked[..at].chars().count();
            let text = format!("{}{}", &marked[..at], &marked[at + 1..]);
            (text, cursor)
        }
        None => (marked.to_owned(), 0),
    }
}

pub fn parse_keys(keys: &str) -> Vec<KeyEvent> {
    let mut parsed = Vec::new();
    let mut rest = keys;
    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(close) = rest.find('>')
            && let Some(key) = named_key(&rest[1..close])
        {
            parsed.push(key);
            rest = &rest[close + 1..];
            continue;
        }
        parsed.push(KeyEvent::char(c));
        rest = &rest[c.len_utf8()..];
    }
    parsed
}

fn named_key(name: &str) -> Option<KeyEvent> {
    match name {
        "Esc" => Some(KeyEvent::new(KeyCode::Esc)),
        "CR" => Some(KeyEvent::new(KeyCode::Enter)),
        "BS" => Some(KeyEvent::new(KeyCode::Backspace)),
        "Tab" => Some(KeyEvent::new(KeyCode::Tab)),
        _ => {
            let mut chars = name.strip_prefix("C-")?.chars();
            let c = chars.next()?;
            chars.next().is_none().then(|| KeyEvent::ctrl(c))
        }
    }
}
