use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Engine options. Most of them can also be changed at runtime with `:set`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Lines kept between the cursor and the view edge when paging.
    pub scroll_off: usize,
    /// Columns added or removed by `>` and `<`.
    pub shift_width: usize,
    /// Display width of a tab character.
    pub tab_width: usize,
    /// Indent with spaces instead of tabs.
    pub expand_tab: bool,
    /// Run the auto-indenter when opening lines with `o`, `O` and `cc`.
    pub auto_indent: bool,
    /// Page height assumed before the host reports a viewport.
    pub page_lines: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scroll_off: 3,
            shift_width: 4,
            tab_width: 8,
            expand_tab: true,
            auto_indent: true,
            page_lines: 24,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `shift_width`, where 0 means "follow `tab_width`".
    pub fn effective_shift_width(&self) -> usize {
        match self.shift_width {
            0 => self.tab_width.max(1),
            n => n,
        }
    }

    /// The text inserted by one level of indentation.
    pub fn indent_unit(&self) -> String {
        if self.expand_tab {
            " ".repeat(self.effective_shift_width())
        } else {
            "\t".to_string()
        }
    }
}
