//! Terminal UI example using crossterm and ratatui.
//!
//! This example demonstrates how to host vim_core in a terminal application:
//! the app owns the buffer, feeds keys to the engine and inserts whatever the
//! engine leaves alone. Engine logs go to `vim_core_demo.log`.
//! Run with: cargo run --example tui_crossterm

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::rc::Rc;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use vim_core::{
    CopyIndent, Engine, EngineConfig, EngineEvent, KeyCode, KeyEvent, KeyResult, Mode,
    RopeBuffer, TextBuffer, Viewport,
};

const WELCOME: &str = "Welcome to vim_core!\n\nPress 'i' to enter insert mode.\nPress 'Esc' to return to normal mode.\nType ':q<Enter>' to quit.\n\nTry vim commands like:\n- hjkl, w, b, e for movement\n- dd to delete a line\n- yy to yank (copy) a line\n- p to paste\n- v or V to select, then d, y, > or gU\n- * to search for the word under the cursor\n- :sort or :s/old/new/g\n";

struct App {
    engine: Engine,
    buffer: RopeBuffer,
    events: Rc<RefCell<Vec<EngineEvent>>>,
    overwrite: bool,
    top_line: usize,
    height: usize,
    message: String,
    should_quit: bool,
}

impl App {
    fn new(config: EngineConfig) -> Self {
        let mut engine = Engine::builder()
            .config(config)
            .auto_indenter(CopyIndent)
            .build();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Self {
            engine,
            buffer: RopeBuffer::from_text(WELCOME),
            events,
            overwrite: true,
            top_line: 0,
            height: 1,
            message: String::new(),
            should_quit: false,
        }
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        let Some(key) = convert_crossterm_event(event) else {
            return;
        };
        self.engine.set_viewport(Viewport {
            top_line: self.top_line,
            bottom_line: self.top_line + self.height,
        });

        if self.engine.handle_key(&mut self.buffer, key) == KeyResult::Ignored
            && self.engine.mode() == Mode::Insert
        {
            self.insert_key(key);
        }

        let events: Vec<EngineEvent> = self.events.borrow_mut().drain(..).collect();
        for event in events {
            self.apply_event(event);
        }
        self.scroll_to_cursor();
    }

    /// Default handling for keys the engine leaves to the host.
    fn insert_key(&mut self, key: KeyEvent) {
        let cursor = self.buffer.cursor();
        match key.code {
            KeyCode::Char(c) if key.mods.is_empty() => {
                if self.overwrite && !matches!(self.buffer.char_at(cursor), None | Some('\n')) {
                    self.buffer.delete(cursor, cursor + 1);
                }
                self.buffer.insert(cursor, c.encode_utf8(&mut [0; 4]));
            }
            KeyCode::Enter => self.buffer.insert(cursor, "\n"),
            KeyCode::Tab => self.buffer.insert(cursor, "\t"),
            KeyCode::Backspace if cursor > 0 => self.buffer.delete(cursor - 1, cursor),
            _ => {}
        }
    }

    fn apply_event(&mut self, event: EngineEvent) {
        tracing::debug!(?event, "engine event");
        match event {
            EngineEvent::Overwrite(enabled) => self.overwrite = enabled,
            EngineEvent::ScrollTo { offset, yalign } => {
                let line = self.buffer.line_of(offset);
                let above = (self.height.saturating_sub(1) as f32 * yalign) as usize;
                self.top_line = line.saturating_sub(above);
            }
            EngineEvent::Quit => self.should_quit = true,
            EngineEvent::Write => self.message = "write is not supported in this demo".to_owned(),
            EngineEvent::BeginSearch(_) => {
                self.message = "use * or # to search for the word under the cursor".to_owned()
            }
            EngineEvent::JumpToDoc(word) => self.message = format!("no documentation for {word}"),
            EngineEvent::ModeChanged(_) => self.message.clear(),
            _ => {}
        }
    }

    fn scroll_to_cursor(&mut self) {
        let line = self.buffer.line_of(self.buffer.cursor());
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + self.height {
            self.top_line = line + 1 - self.height;
        }
    }

    fn status_line(&self) -> String {
        match self.engine.mode() {
            Mode::Command => format!(":{}", self.engine.command_line()),
            mode if !self.message.is_empty() => format!("{mode:?}  {}", self.message),
            Mode::Insert if !self.overwrite => "-- INSERT --".to_owned(),
            Mode::Insert => "-- REPLACE --".to_owned(),
            Mode::Normal if self.buffer.has_selection() => "-- VISUAL --".to_owned(),
            Mode::Normal => format!("-- NORMAL --  {}", self.engine.phrase()),
        }
    }
}

fn convert_crossterm_event(event: CKeyEvent) -> Option<KeyEvent> {
    let key = match event.code {
        CKeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => KeyEvent::ctrl(c),
        CKeyCode::Char(c) => KeyEvent::char(c),
        CKeyCode::Esc => KeyEvent::new(KeyCode::Esc),
        CKeyCode::Enter => KeyEvent::new(KeyCode::Enter),
        CKeyCode::Backspace => KeyEvent::new(KeyCode::Backspace),
        CKeyCode::Tab => KeyEvent::new(KeyCode::Tab),
        _ => return None,
    };
    Some(key)
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());
    app.height = chunks[0].height.saturating_sub(2).max(1) as usize;

    // Main text area, selected characters highlighted
    let (sel_begin, sel_end) = app.buffer.selection();
    let selected = Style::default().bg(Color::Blue);
    let mut lines = vec![];
    for n in app.top_line..(app.top_line + app.height).min(app.buffer.line_count()) {
        let start = app.buffer.line_start(n);
        let spans: Vec<Span> = app
            .buffer
            .rope()
            .line(n)
            .chars()
            .filter(|&c| c != '\n')
            .enumerate()
            .map(|(col, c)| {
                let offset = start + col;
                if (sel_begin..sel_end).contains(&offset) {
                    Span::styled(c.to_string(), selected)
                } else {
                    Span::raw(c.to_string())
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("vim_core demo"),
    );
    f.render_widget(text, chunks[0]);

    // Status line
    let status = Paragraph::new(app.status_line())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    // Set cursor position
    let cursor = app.buffer.cursor();
    let line = app.buffer.line_of(cursor);
    let col = cursor - app.buffer.line_start(line);
    f.set_cursor(
        chunks[0].x + 1 + col as u16,
        chunks[0].y + 1 + line.saturating_sub(app.top_line) as u16,
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = File::create("vim_core_demo.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            app.handle_crossterm_event(key);

            if app.should_quit {
                break;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
