/// Character classes that delimit words for `w`, `b` and `e`.
///
/// A word motion stops wherever the class changes; runs of `Space` are
/// skipped between words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Space, tab and newline.
    Space,
    /// Punctuation and operators.
    Special,
    /// Everything else, including `_`, digits and non-ASCII letters.
    Word,
}

impl CharClass {
    pub fn of(ch: char) -> Self {
        match ch {
            ' ' | '\t' | '\n' => CharClass::Space,
            '"' | '\'' | '(' | ')' | '{' | '}' | '[' | ']' | '<' | '>' | '-' | '+' | '*' | '/'
            | '!' | '@' | '#' | '$' | '%' | '^' | '&' | ':' | ';' | '?' | '|' | '=' | '\\'
            | '.' | ',' => CharClass::Special,
            _ => CharClass::Word,
        }
    }
}

/// The class of the character at an offset; the end of the buffer counts as a word character.
pub(crate) fn class_at(ch: Option<char>) -> CharClass {
    ch.map_or(CharClass::Word, CharClass::of)
}
