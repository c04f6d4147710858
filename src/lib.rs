pub mod anchor;
pub mod buffer;
pub mod classify;
pub mod clipboard;
mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod ex;
pub mod indent;
mod iter;
pub mod key;
mod motion;
pub mod phrase;
pub mod registry;
pub mod search;
pub mod traits;
pub mod types;

pub use crate::anchor::{SelectionAnchor, clamp_to_anchor};
pub use crate::buffer::{DEFAULT_UNDO_LIMIT, RopeBuffer};
pub use crate::classify::CharClass;
#[cfg(feature = "clipboard")]
pub use crate::clipboard::SystemClipboard;
pub use crate::clipboard::LocalClipboard;
pub use crate::config::EngineConfig;
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot};
#[cfg(feature = "clipboard")]
pub use crate::error::ClipboardError;
pub use crate::error::{ConfigError, ExError, SearchError};
pub use crate::ex::{ExCommand, ExCommandParser, SetOption, Substitution};
pub use crate::indent::CopyIndent;
pub use crate::key::{KeyCode, KeyEvent, Modifiers};
pub use crate::phrase::{Phrase, PhraseParser, PhraseStatus};
pub use crate::registry::{Command, CommandFlags, CommandKind};
pub use crate::search::BufferSearch;
pub use crate::traits::{
    AutoIndenter, Clipboard, Gravity, IndentEdit, MarkId, SearchMatch, SearchOutcome,
    SearchProvider, SearchSettings, SearchTicket, TextBuffer,
};
pub use crate::types::{EngineEvent, KeyResult, Mode, Position, Viewport, VisualKind};
