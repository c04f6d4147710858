use unicode_segmentation::UnicodeSegmentation;

use crate::classify::{CharClass, class_at};
use crate::traits::TextBuffer;

/// Offset arithmetic over a [`TextBuffer`].
///
/// The stepping functions mirror a classic text-iterator API: they move the
/// offset in place and report whether it still points at a character.
/// `forward_char` moves onto the end of the buffer but then returns `false`.
pub(crate) trait OffsetIter {
    fn char_or_nul(&self, offset: usize) -> char;
    fn class_at(&self, offset: usize) -> CharClass;

    fn starts_line(&self, offset: usize) -> bool;
    fn ends_line(&self, offset: usize) -> bool;
    fn is_empty_line(&self, offset: usize) -> bool {
        self.starts_line(offset) && self.ends_line(offset)
    }
    fn line_offset(&self, offset: usize) -> usize;
    fn line_end(&self, line: usize) -> usize;
    fn line_end_at(&self, offset: usize) -> usize;
    fn iter_at_line_offset(&self, line: usize, column: usize) -> usize;
    fn first_non_blank(&self, line: usize) -> usize;

    fn forward_char(&self, offset: &mut usize) -> bool;
    fn backward_char(&self, offset: &mut usize) -> bool;
    fn forward_line(&self, offset: &mut usize) -> bool;
    fn backward_line(&self, offset: &mut usize) -> bool;
    fn forward_find_char(&self, offset: &mut usize, pred: impl FnMut(char) -> bool) -> bool;
    fn backward_find_char(&self, offset: &mut usize, pred: impl FnMut(char) -> bool) -> bool;

    fn grapheme_forward(&self, offset: usize) -> usize;
    fn grapheme_backward(&self, offset: usize) -> Option<usize>;

    fn forward_vim_word(&self, offset: &mut usize) -> bool;
    fn forward_vim_word_end(&self, offset: &mut usize) -> bool;
    fn backward_vim_word(&self, offset: &mut usize) -> bool;
    fn word_bounds_at(&self, offset: usize) -> Option<(usize, usize)>;
}

impl<T: TextBuffer + ?Sized> OffsetIter for T {
    fn char_or_nul(&self, offset: usize) -> char {
        self.char_at(offset).unwrap_or('\0')
    }

    fn class_at(&self, offset: usize) -> CharClass {
        class_at(self.char_at(offset))
    }

    fn starts_line(&self, offset: usize) -> bool {
        offset == 0 || self.char_at(offset - 1) == Some('\n')
    }

    fn ends_line(&self, offset: usize) -> bool {
        offset >= self.len_chars() || self.char_at(offset) == Some('\n')
    }

    fn line_offset(&self, offset: usize) -> usize {
        offset - self.line_start(self.line_of(offset))
    }

    fn line_end(&self, line: usize) -> usize {
        if line + 1 < self.line_count() {
            self.line_start(line + 1) - 1
        } else {
            self.len_chars()
        }
    }

    fn line_end_at(&self, offset: usize) -> usize {
        self.line_end(self.line_of(offset))
    }

    fn iter_at_line_offset(&self, line: usize, column: usize) -> usize {
        let start = self.line_start(line);
        let end = self.line_end(self.line_of(start));
        start + column.min(end - start)
    }

    fn first_non_blank(&self, line: usize) -> usize {
        let mut offset = self.line_start(line);
        while !self.ends_line(offset) && self.char_or_nul(offset).is_whitespace() {
            offset += 1;
        }
        offset
    }

    fn forward_char(&self, offset: &mut usize) -> bool {
        let len = self.len_chars();
        if *offset >= len {
            return false;
        }
        *offset += 1;
        *offset != len
    }

    fn backward_char(&self, offset: &mut usize) -> bool {
        if *offset == 0 {
            return false;
        }
        *offset -= 1;
        true
    }

    fn forward_line(&self, offset: &mut usize) -> bool {
        let line = self.line_of(*offset);
        if line + 1 < self.line_count() {
            *offset = self.line_start(line + 1);
            *offset != self.len_chars()
        } else {
            *offset = self.len_chars();
            false
        }
    }

    fn backward_line(&self, offset: &mut usize) -> bool {
        let line = self.line_of(*offset);
        if line == 0 {
            let moved = *offset != 0;
            *offset = 0;
            return moved;
        }
        *offset = self.line_start(line - 1);
        true
    }

    fn forward_find_char(&self, offset: &mut usize, mut pred: impl FnMut(char) -> bool) -> bool {
        while self.forward_char(offset) {
            if pred(self.char_or_nul(*offset)) {
                return true;
            }
        }
        false
    }

    fn backward_find_char(&self, offset: &mut usize, mut pred: impl FnMut(char) -> bool) -> bool {
        while self.backward_char(offset) {
            if pred(self.char_or_nul(*offset)) {
                return true;
            }
        }
        false
    }

    fn grapheme_forward(&self, offset: usize) -> usize {
        let len = self.len_chars();
        if self.ends_line(offset) {
            return (offset + 1).min(len);
        }
        let start = self.line_start(self.line_of(offset));
        let text = self.slice(start, self.line_end_at(offset));
        let mut boundary = start;
        for grapheme in text.graphemes(true) {
            boundary += grapheme.chars().count();
            if boundary > offset {
                return boundary;
            }
        }
        (offset + 1).min(len)
    }

    fn grapheme_backward(&self, offset: usize) -> Option<usize> {
        if offset == 0 {
            return None;
        }
        if self.starts_line(offset) {
            return Some(offset - 1);
        }
        let start = self.line_start(self.line_of(offset));
        let text = self.slice(start, offset);
        let last = text.graphemes(true).next_back()?;
        Some(offset - last.chars().count())
    }

    fn forward_vim_word(&self, offset: &mut usize) -> bool {
        let mut begin = Some(self.class_at(*offset));

        // Move to the first non-space character if necessary.
        if begin == Some(CharClass::Space) {
            loop {
                if !self.forward_char(offset) {
                    return false;
                }
                if self.class_at(*offset) != CharClass::Space {
                    return true;
                }
            }
        }

        while self.forward_char(offset) {
            let current = self.class_at(*offset);
            if current == CharClass::Space {
                begin = None;
                continue;
            }
            if Some(current) != begin {
                return true;
            }
        }
        false
    }

    fn forward_vim_word_end(&self, offset: &mut usize) -> bool {
        if !self.forward_char(offset) {
            return false;
        }
        if self.class_at(*offset) == CharClass::Space && !self.forward_vim_word(offset) {
            return false;
        }

        let begin = self.class_at(*offset);
        loop {
            if !self.forward_char(offset) {
                return false;
            }
            if self.class_at(*offset) != begin {
                self.backward_char(offset);
                return true;
            }
        }
    }

    fn backward_vim_word(&self, offset: &mut usize) -> bool {
        if !self.backward_char(offset) {
            return false;
        }

        // On space, walk back to the previous word first.
        if self.class_at(*offset) == CharClass::Space {
            loop {
                if !self.backward_char(offset) {
                    return false;
                }
                if self.class_at(*offset) != CharClass::Space {
                    break;
                }
            }
        }

        let begin = self.class_at(*offset);
        loop {
            if !self.backward_char(offset) {
                return false;
            }
            if self.class_at(*offset) != begin {
                self.forward_char(offset);
                return true;
            }
        }
    }

    /// The word under `offset`, or the next word on the same line when
    /// `offset` sits on blanks.
    fn word_bounds_at(&self, offset: usize) -> Option<(usize, usize)> {
        let mut at = offset;
        while matches!(self.char_at(at), Some(' ' | '\t')) {
            at += 1;
        }
        let class = CharClass::of(self.char_at(at)?);
        if class == CharClass::Space {
            return None;
        }

        let mut begin = at;
        while begin > 0 && self.char_at(begin - 1).map(CharClass::of) == Some(class) {
            begin -= 1;
        }
        let mut end = at + 1;
        while self.char_at(end).map(CharClass::of) == Some(class) {
            end += 1;
        }
        Some((begin, end))
    }
}
