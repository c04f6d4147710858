//! Ex-command lines (`:sort`, `:%s/a/b/g`, `:set ts=4`, ...).

use std::ops::RangeInclusive;
use std::str::Chars;

use crate::engine::Vim;
use crate::error::ExError;
use crate::iter::OffsetIter;
use crate::traits::SearchSettings;
use crate::types::EngineEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommand {
    /// Sort the selected lines, or the whole buffer.
    Sort,
    /// Turn search highlighting off.
    NoHighlight,
    SetFiletype(String),
    Syntax(bool),
    LineNumbers(bool),
    Colorscheme(String),
    Substitute(Substitution),
    Set(Vec<SetOption>),
    Write,
    Quit,
    WriteQuit,
    Edit(Option<String>),
    Split { vertical: bool },
}

/// A parsed `%s<d>pattern<d>replacement<d>flags`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
    pub global: bool,
}

/// One assignment of a `:set` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOption {
    AutoIndent(bool),
    ExpandTab(bool),
    Filetype(String),
    Number(bool),
    ScrollOff(usize),
    ShiftWidth(usize),
    TabStop(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Head {
    Sort,
    NoHighlight,
    Filetype,
    Syntax,
    Number,
    Colorscheme,
    Substitute,
    Set,
    Write,
    Quit,
    WriteQuit,
    Edit,
    Split,
    VSplit,
}

const COMMAND_NAMES: &[&str] = &[
    "colorscheme ",
    "edit",
    "nohl",
    "quit",
    "set ",
    "sort",
    "split",
    "syntax ",
    "vsplit",
    "wq",
    "write",
];

const OPTION_NAMES: &[&str] = &[
    "autoindent",
    "expandtab",
    "filetype=",
    "noautoindent",
    "noexpandtab",
    "nonumber",
    "number",
    "scrolloff=",
    "shiftwidth=",
    "tabstop=",
];

/// Recognizes and parses command-line text (without the leading `:`).
///
/// | text                         | command                          |
/// |------------------------------|----------------------------------|
/// | `sort`                       | sort lines                       |
/// | `nohl`                       | clear search highlight           |
/// | `set filetype=rust`          | filetype event                   |
/// | `syntax on` / `syntax off`   | syntax event                     |
/// | `set nu` / `set nonu`        | line-number event                |
/// | `colorscheme dark`           | colorscheme event                |
/// | `%s/foo/bar/g`               | substitution                     |
/// | `set ts=4 sw=4 et`           | engine options                   |
/// | `w` `q` `wq` `x` `e [path]`  | host events                      |
/// | `sp` `split` `vs` `vsplit`   | split events                     |
pub struct ExCommandParser;

impl ExCommandParser {
    /// Whether `text` names a command. A recognised command may still fail
    /// to [`parse`](Self::parse).
    pub fn is_command(text: &str) -> bool {
        Self::recognize(text).is_some()
    }

    pub fn parse(text: &str) -> Result<ExCommand, ExError> {
        let text = text.trim();
        let Some(head) = Self::recognize(text) else {
            return Err(ExError::NotACommand(text.to_owned()));
        };
        let argument = text.split_once(' ').map_or("", |(_, rest)| rest.trim());

        match head {
            Head::Sort => Ok(ExCommand::Sort),
            Head::NoHighlight => Ok(ExCommand::NoHighlight),
            Head::Filetype => {
                let name = text["set filetype=".len()..].trim();
                if name.is_empty() {
                    return Err(ExError::MissingArgument("filetype"));
                }
                Ok(ExCommand::SetFiletype(name.to_owned()))
            }
            Head::Syntax => match argument {
                "on" => Ok(ExCommand::Syntax(true)),
                "off" => Ok(ExCommand::Syntax(false)),
                _ => Err(ExError::InvalidArgument {
                    command: "syntax",
                    argument: argument.to_owned(),
                }),
            },
            Head::Number => Ok(ExCommand::LineNumbers(text == "set nu")),
            Head::Colorscheme => {
                if argument.is_empty() {
                    return Err(ExError::MissingArgument("colorscheme"));
                }
                Ok(ExCommand::Colorscheme(argument.to_owned()))
            }
            Head::Substitute => parse_substitution(&text["%s".len()..]).map(ExCommand::Substitute),
            Head::Set => parse_set(argument).map(ExCommand::Set),
            Head::Write => Ok(ExCommand::Write),
            Head::Quit => Ok(ExCommand::Quit),
            Head::WriteQuit => Ok(ExCommand::WriteQuit),
            Head::Edit => Ok(ExCommand::Edit(
                (!argument.is_empty()).then(|| argument.to_owned()),
            )),
            Head::Split => Ok(ExCommand::Split { vertical: false }),
            Head::VSplit => Ok(ExCommand::Split { vertical: true }),
        }
    }

    /// Candidates for completing `line`: command names, option names after
    /// `set `, and `on`/`off` after `syntax `. Each candidate is a whole
    /// replacement line.
    pub fn complete(line: &str) -> Vec<String> {
        if let Some(rest) = line.strip_prefix("set ") {
            let (done, partial) = match rest.rfind(' ') {
                Some(at) => rest.split_at(at + 1),
                None => ("", rest),
            };
            return OPTION_NAMES
                .iter()
                .filter(|name| name.starts_with(partial))
                .map(|name| format!("set {done}{name}"))
                .collect();
        }
        if let Some(partial) = line.strip_prefix("syntax ") {
            return ["on", "off"]
                .iter()
                .filter(|arg| arg.starts_with(partial))
                .map(|arg| format!("syntax {arg}"))
                .collect();
        }
        if line.contains(' ') {
            return Vec::new();
        }
        COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(line))
            .map(|name| (*name).to_owned())
            .collect()
    }

    fn recognize(text: &str) -> Option<Head> {
        if text == "sort" {
            return Some(Head::Sort);
        } else if text == "nohl" {
            return Some(Head::NoHighlight);
        } else if text.starts_with("set filetype=") {
            return Some(Head::Filetype);
        } else if text.starts_with("syntax ") {
            return Some(Head::Syntax);
        } else if text == "set nu" || text == "set nonu" {
            return Some(Head::Number);
        } else if text.starts_with("colorscheme ") {
            return Some(Head::Colorscheme);
        } else if text.starts_with("%s") {
            return Some(Head::Substitute);
        } else if text.starts_with("set ") {
            return Some(Head::Set);
        }

        let (name, argument) = match text.split_once(' ') {
            Some((name, argument)) => (name, argument.trim()),
            None => (text, ""),
        };
        let head = match name {
            "w" | "write" => Head::Write,
            "q" | "quit" => Head::Quit,
            "wq" | "x" => Head::WriteQuit,
            "e" | "edit" => return Some(Head::Edit),
            "sp" | "split" => Head::Split,
            "vs" | "vsplit" => Head::VSplit,
            _ => return None,
        };
        argument.is_empty().then_some(head)
    }
}

fn parse_substitution(body: &str) -> Result<Substitution, ExError> {
    let mut chars = body.chars();
    let Some(delimiter) = chars.next() else {
        return Err(ExError::MissingArgument("substitute"));
    };
    let pattern = scan_field(&mut chars, delimiter, false)?;
    let replacement = scan_field(&mut chars, delimiter, true)?;
    let global = chars.any(|flag| flag == 'g');
    Ok(Substitution {
        pattern,
        replacement,
        global,
    })
}

/// Reads up to the next unescaped `delimiter`. `\<delimiter>` and `\\` stand
/// for the character itself; other escapes are kept as written.
fn scan_field(chars: &mut Chars<'_>, delimiter: char, may_end: bool) -> Result<String, ExError> {
    let mut field = String::new();
    loop {
        match chars.next() {
            None if may_end => return Ok(field),
            None => return Err(ExError::UnterminatedPattern),
            Some(c) if c == delimiter => return Ok(field),
            Some('\\') => match chars.next() {
                None => return Err(ExError::UnterminatedPattern),
                Some(c) if c == delimiter || c == '\\' => field.push(c),
                Some(c) => {
                    field.push('\\');
                    field.push(c);
                }
            },
            Some(c) => field.push(c),
        }
    }
}

fn parse_set(arguments: &str) -> Result<Vec<SetOption>, ExError> {
    if arguments.is_empty() {
        return Err(ExError::MissingArgument("set"));
    }
    arguments.split_whitespace().map(parse_option).collect()
}

fn parse_option(token: &str) -> Result<SetOption, ExError> {
    let (name, value) = match token.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (token, None),
    };

    let option = match (name, value) {
        ("autoindent" | "ai", None) => SetOption::AutoIndent(true),
        ("noautoindent" | "noai", None) => SetOption::AutoIndent(false),
        ("expandtab" | "et", None) => SetOption::ExpandTab(true),
        ("noexpandtab" | "noet", None) => SetOption::ExpandTab(false),
        ("number" | "nu", None) => SetOption::Number(true),
        ("nonumber" | "nonu", None) => SetOption::Number(false),
        ("filetype" | "ft", Some(value)) if !value.is_empty() => SetOption::Filetype(value.to_owned()),
        ("filetype" | "ft", _) => return Err(ExError::MissingArgument("filetype")),
        ("scrolloff" | "so", value) => SetOption::ScrollOff(number("scrolloff", token, value, 0..=999)?),
        ("shiftwidth" | "sw", value) => SetOption::ShiftWidth(number("shiftwidth", token, value, 0..=999)?),
        ("tabstop" | "ts", value) => SetOption::TabStop(number("tabstop", token, value, 1..=32)?),
        _ => return Err(ExError::UnknownOption(token.to_owned())),
    };
    Ok(option)
}

fn number(
    option: &'static str,
    token: &str,
    value: Option<&str>,
    range: RangeInclusive<i64>,
) -> Result<usize, ExError> {
    let value = value
        .and_then(|value| value.parse::<i64>().ok())
        .ok_or_else(|| ExError::NumberRequired(token.to_owned()))?;
    if !range.contains(&value) {
        return Err(ExError::OutOfRange { option, value });
    }
    Ok(value as usize)
}

pub(crate) fn execute(vim: &mut Vim<'_>, command: ExCommand) {
    match command {
        ExCommand::Sort => vim.sort_lines(),
        ExCommand::NoHighlight => vim.search.set_highlight(false),
        ExCommand::SetFiletype(name) => vim.emit(EngineEvent::SetFiletype(name)),
        ExCommand::Syntax(enabled) => vim.emit(EngineEvent::SetSyntax(enabled)),
        ExCommand::LineNumbers(enabled) => vim.emit(EngineEvent::SetLineNumbers(enabled)),
        ExCommand::Colorscheme(name) => vim.emit(EngineEvent::SetColorscheme(name)),
        ExCommand::Substitute(substitution) => vim.substitute(substitution),
        ExCommand::Set(options) => {
            for option in options {
                vim.apply_option(option);
            }
        }
        ExCommand::Write => vim.emit(EngineEvent::Write),
        ExCommand::Quit => vim.emit(EngineEvent::Quit),
        ExCommand::WriteQuit => {
            vim.emit(EngineEvent::Write);
            vim.emit(EngineEvent::Quit);
        }
        ExCommand::Edit(path) => vim.emit(EngineEvent::Edit(path)),
        ExCommand::Split { vertical } => vim.emit(EngineEvent::Split { vertical }),
    }
}

impl Vim<'_> {
    /// Sorts the selected lines (the whole buffer without a selection) by
    /// plain string comparison. The cursor keeps its offset.
    fn sort_lines(&mut self) {
        let (begin, mut end) = if self.buf.has_selection() {
            self.ordered_selection()
        } else {
            (0, self.buf.len_chars())
        };
        if end > begin && self.buf.starts_line(end) {
            end -= 1;
        }

        let cursor = self.buf.cursor();
        let text = self.buf.slice(begin, end);
        let mut lines: Vec<&str> = text.split('\n').collect();
        lines.sort_unstable();
        let sorted = lines.join("\n");
        if sorted == text {
            return;
        }

        self.buf.begin_user_action();
        self.buf.delete(begin, end);
        self.buf.insert(begin, &sorted);
        self.buf.end_user_action();

        self.buf.place_cursor(cursor.min(self.buf.len_chars()));
        tracing::debug!(lines = lines.len(), "sorted lines");
    }

    fn substitute(&mut self, substitution: Substitution) {
        let Substitution {
            pattern,
            replacement,
            global,
        } = substitution;

        // TODO: limit the replacement to the selected range.
        if !global && self.buf.has_selection() {
            tracing::warn!(%pattern, "substitution within a selection is not supported");
            return;
        }

        self.search.set_settings(SearchSettings {
            text: pattern,
            at_word_boundaries: false,
            case_sensitive: true,
            wrap_around: true,
        });
        let cursor = self.buf.cursor();
        match self.search.replace_all(&mut *self.buf, &replacement) {
            Ok(count) => tracing::debug!(count, "substituted"),
            Err(err) => tracing::warn!(%err, "substitution failed"),
        }
        self.buf.place_cursor(cursor.min(self.buf.len_chars()));
    }

    fn apply_option(&mut self, option: SetOption) {
        tracing::debug!(?option, "set option");
        match option {
            SetOption::AutoIndent(enabled) => self.config.auto_indent = enabled,
            SetOption::ExpandTab(enabled) => self.config.expand_tab = enabled,
            SetOption::Filetype(name) => self.emit(EngineEvent::SetFiletype(name)),
            SetOption::Number(enabled) => self.emit(EngineEvent::SetLineNumbers(enabled)),
            SetOption::ScrollOff(lines) => self.config.scroll_off = lines,
            SetOption::ShiftWidth(width) => self.config.shift_width = width,
            SetOption::TabStop(width) => self.config.tab_width = width,
        }
    }
}
