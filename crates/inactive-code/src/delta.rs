//! Structured text change deltas and position conversion.
//!
//! Inactive ranges are computed against the text a parser saw, which may be older than the
//! text in the editor by the time results are delivered. A [`PositionConverter`] maps such
//! "historic" ranges onto the current text. [`TextDelta`] is the built-in converter: it replays
//! the edits made since the analysed version.

use crate::extract::InactiveRange;

/// Maps ranges valid at analysis time onto the current document.
pub trait PositionConverter {
    /// Convert a range from the analysed ("historic") text to the current ("actual") text.
    fn historic_to_actual(&self, range: InactiveRange) -> InactiveRange;
}

/// A single text edit expressed in character offsets.
///
/// Semantics:
/// - `start` is a character offset in the document **at the time this edit is applied**.
/// - The deleted range is defined by the length (in `char`s) of `deleted_text`.
/// - Edits inside a [`TextDelta`] must be applied **in order** to transform the "before" document
///   into the "after" document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Create an edit that replaces `deleted_text` at `start` with `inserted_text`.
    pub fn new(
        start: usize,
        deleted_text: impl Into<String>,
        inserted_text: impl Into<String>,
    ) -> Self {
        Self {
            start,
            deleted_text: deleted_text.into(),
            inserted_text: inserted_text.into(),
        }
    }

    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }

    /// Map an offset in the pre-edit document to the post-edit document.
    ///
    /// Text inserted exactly at a range boundary stays outside the range. Offsets inside the
    /// deleted span collapse onto the edit: to its start when `at_end` is false, past the
    /// inserted text otherwise.
    fn map_offset(&self, offset: usize, at_end: bool) -> usize {
        let before = if at_end {
            offset <= self.start
        } else {
            offset < self.start
        };
        if before {
            offset
        } else if offset >= self.end() {
            (offset - self.deleted_len()).saturating_add(self.inserted_len())
        } else if at_end {
            self.start.saturating_add(self.inserted_len())
        } else {
            self.start
        }
    }
}

/// A structured description of a document text change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDelta {
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Ordered list of edits that transforms the "before" document into the "after" document.
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// Build a delta from a list of edits applied to a document of `before_char_count` chars.
    pub fn new(before_char_count: usize, edits: Vec<TextDeltaEdit>) -> Self {
        let after_char_count = edits.iter().fold(before_char_count, |count, edit| {
            count
                .saturating_sub(edit.deleted_len())
                .saturating_add(edit.inserted_len())
        });
        Self {
            before_char_count,
            after_char_count,
            edits,
        }
    }

    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

impl PositionConverter for TextDelta {
    fn historic_to_actual(&self, range: InactiveRange) -> InactiveRange {
        let (start, end) = self
            .edits
            .iter()
            .fold((range.offset, range.end()), |(start, end), edit| {
                (edit.map_offset(start, false), edit.map_offset(end, true))
            });
        InactiveRange::new(start, end.saturating_sub(start))
    }
}

impl<F> PositionConverter for F
where
    F: Fn(InactiveRange) -> InactiveRange,
{
    fn historic_to_actual(&self, range: InactiveRange) -> InactiveRange {
        self(range)
    }
}
