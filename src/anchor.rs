use crate::traits::{Gravity, MarkId, TextBuffer};
use crate::types::VisualKind;

/// The range a visual selection started from.
///
/// Motions move only the live end of a selection; the anchor keeps the
/// originally selected character or line inside it. Both ends are buffer
/// marks, so the anchor follows edits made elsewhere in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionAnchor {
    begin: MarkId,
    end: MarkId,
    pub kind: VisualKind,
}

impl SelectionAnchor {
    /// Pins `[min(a, b), max(a, b)]`. The left mark keeps left gravity and the
    /// right mark right gravity, so text typed at either edge stays inside.
    pub fn set(buffer: &mut dyn TextBuffer, a: usize, b: usize, kind: VisualKind) -> Self {
        let (left, right) = (a.min(b), a.max(b));
        Self {
            begin: buffer.create_mark(left, Gravity::Left),
            end: buffer.create_mark(right, Gravity::Right),
            kind,
        }
    }

    /// Re-pins an existing anchor, reusing its marks.
    pub fn reset(&mut self, buffer: &mut dyn TextBuffer, a: usize, b: usize, kind: VisualKind) {
        buffer.move_mark(self.begin, a.min(b));
        buffer.move_mark(self.end, a.max(b));
        self.kind = kind;
    }

    /// Current `(begin, end)` offsets, or `None` if the buffer dropped the marks.
    pub fn bounds(&self, buffer: &dyn TextBuffer) -> Option<(usize, usize)> {
        Some((buffer.mark_offset(self.begin)?, buffer.mark_offset(self.end)?))
    }

    /// The `(insert, bound)` selection to apply so the anchor stays selected,
    /// or `None` when the current one already covers it.
    pub fn clamp(&self, buffer: &dyn TextBuffer, insert: usize, bound: usize) -> Option<(usize, usize)> {
        let (begin, end) = self.bounds(buffer)?;
        clamp_to_anchor(begin, end, insert, bound)
    }

    pub fn release(self, buffer: &mut dyn TextBuffer) {
        buffer.delete_mark(self.begin);
        buffer.delete_mark(self.end);
    }
}

/// Grows a selection whose live end crossed back over the anchor `[begin, end]`.
pub fn clamp_to_anchor(begin: usize, end: usize, insert: usize, bound: usize) -> Option<(usize, usize)> {
    if bound < end && insert < end {
        Some(if insert < bound { (insert, end) } else { (end, bound) })
    } else if bound > begin && insert > begin {
        Some(if insert < bound { (begin, bound) } else { (insert, begin) })
    } else {
        None
    }
}
