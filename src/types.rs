use serde::{Deserialize, Serialize};

/// A position within a text buffer.
///
/// Positions are zero-indexed; `col` counts characters from the start of
/// the line, the same unit the buffer uses for offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column in characters.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { line: 0, col: 0 };

    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// The current mode of the vim engine.
///
/// Vim is a modal editor where the same keys perform different
/// actions depending on the current mode. Visual selections are not a mode
/// of their own: they are an active buffer selection while in Normal mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Normal mode - keystrokes are phrases for navigation and operators.
    #[default]
    Normal,
    /// Insert mode - keystrokes are text for the host to insert.
    Insert,
    /// Command mode - an ex-command line is being typed.
    Command,
}

/// The type of visual selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VisualKind {
    /// Character-wise selection (v).
    #[default]
    CharWise,
    /// Line-wise selection (V).
    LineWise,
}

/// Whether the engine consumed a key.
///
/// `Ignored` tells the host to run its default handling, which in insert
/// mode means inserting the typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Handled,
    Ignored,
}

impl KeyResult {
    pub fn is_handled(self) -> bool {
        matches!(self, KeyResult::Handled)
    }
}

/// The lines currently visible in the host's view.
///
/// `bottom_line` is the first line past the visible area. Paging commands
/// need this; until the host reports one the engine assumes a page of
/// [`EngineConfig::page_lines`](crate::EngineConfig::page_lines) starting at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top_line: usize,
    pub bottom_line: usize,
}

/// Notifications emitted to subscribers of the engine.
///
/// The engine never draws anything itself: mode indicators, the command bar,
/// scrolling and the ex-commands that concern the surrounding editor
/// (filetype, line numbers, saving...) all reach the host through here.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The mode changed.
    ModeChanged(Mode),
    /// The pending phrase changed (empty when cleared).
    PhraseChanged(String),
    /// The command bar should be shown or hidden.
    CommandBarVisibility(bool),
    /// The text typed on the built-in command line changed.
    CommandLineChanged(String),
    /// `/` was pressed; the host should open its search entry, seeded with
    /// the selected text if there was a selection.
    BeginSearch(Option<String>),
    /// `K` was pressed on a word.
    JumpToDoc(String),
    /// Typed text should overwrite (block cursor) rather than insert.
    Overwrite(bool),
    /// Scroll so that `offset` sits at `yalign` of the view height
    /// (0.0 top, 0.5 center, 1.0 bottom).
    ScrollTo { offset: usize, yalign: f32 },
    /// `:set filetype=<name>`
    SetFiletype(String),
    /// `:syntax on|off`
    SetSyntax(bool),
    /// `:set nu` / `:set nonu`
    SetLineNumbers(bool),
    /// `:colorscheme <name>`
    SetColorscheme(String),
    /// `:w`
    Write,
    /// `:q`
    Quit,
    /// `:e [path]`
    Edit(Option<String>),
    /// `:split` / `:vsplit`
    Split { vertical: bool },
}
