//! Inactive region extraction.
//!
//! Walks the conditional directives of one file in source order and produces the spans that the
//! preprocessor excluded. A region starts at the directive that opens an untaken branch and ends
//! at the end of the directive that closes it (`#else`/`#elif` of a taken branch, or the
//! `#endif` of the outermost inactive group). Inactive groups nested in an already inactive
//! region are subsumed by it.
//!
//! Malformed traces never fail: a spurious `#endif` is ignored, and a conditional left open at
//! the end of the trace does not produce a trailing region.

use crate::directive::{DirectiveKind, DirectiveRecord, FileId};
use crate::intervals::{Interval, StyleId};
use serde::{Deserialize, Serialize};

/// A contiguous span of preprocessor-excluded source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InactiveRange {
    /// Start offset.
    pub offset: usize,
    /// Length, always greater than zero for extracted ranges.
    pub length: usize,
}

impl InactiveRange {
    /// Create a range from an offset and a length.
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Create a range from half-open bounds; `None` if `end <= start`.
    pub fn from_bounds(start: usize, end: usize) -> Option<Self> {
        (end > start).then(|| Self::new(start, end - start))
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// Convert into a style interval.
    pub fn to_interval(&self, style_id: StyleId) -> Interval {
        Interval::new(self.offset, self.end(), style_id)
    }
}

/// Fold state threaded through the directive trace.
#[derive(Debug, Default)]
struct ExtractState {
    in_inactive: bool,
    inactive_start: usize,
    /// One entry per open conditional group: whether the enclosing context was inactive.
    nesting: Vec<bool>,
    ranges: Vec<InactiveRange>,
}

impl ExtractState {
    fn step(self, record: &DirectiveRecord) -> Self {
        match record.kind {
            DirectiveKind::If | DirectiveKind::Ifdef | DirectiveKind::Ifndef => {
                self.open_group(record)
            }
            DirectiveKind::Elif | DirectiveKind::Else => self.switch_branch(record),
            DirectiveKind::Endif => self.close_group(record),
        }
    }

    fn open_group(mut self, record: &DirectiveRecord) -> Self {
        self.nesting.push(self.in_inactive);
        if !record.taken && !self.in_inactive {
            self.begin(record.offset)
        } else {
            self
        }
    }

    fn switch_branch(self, record: &DirectiveRecord) -> Self {
        match (record.taken, self.in_inactive) {
            (false, false) => self.begin(record.offset),
            (true, true) => self.finish(record.end()),
            _ => self,
        }
    }

    fn close_group(mut self, record: &DirectiveRecord) -> Self {
        let Some(was_inactive) = self.nesting.pop() else {
            return self;
        };
        if self.in_inactive && !was_inactive {
            self = self.finish(record.end());
        } else if was_inactive && !self.in_inactive {
            // A taken branch inside an inactive group ended; the enclosing region resumes here.
            self.inactive_start = record.offset;
        }
        self.in_inactive = was_inactive;
        self
    }

    fn begin(mut self, offset: usize) -> Self {
        self.inactive_start = offset;
        self.in_inactive = true;
        self
    }

    fn finish(mut self, end: usize) -> Self {
        if let Some(range) = InactiveRange::from_bounds(self.inactive_start, end) {
            self.ranges.push(range);
        }
        self.in_inactive = false;
        self
    }
}

/// Compute the inactive ranges of `file` from a directive trace.
///
/// Records from other files are skipped. Records must be in source order; they are not re-sorted.
/// The result is sorted by offset, non-overlapping, and every range is non-empty.
///
/// When a taken branch nested in an inactive group closes, the enclosing region restarts at that
/// `#endif` rather than at its first opening directive, so inconsistent traces cannot yield
/// overlapping ranges.
pub fn extract_inactive_ranges<'a, I>(directives: I, file: &FileId) -> Vec<InactiveRange>
where
    I: IntoIterator<Item = &'a DirectiveRecord>,
{
    let state = directives
        .into_iter()
        .filter(|record| &record.file == file)
        .fold(ExtractState::default(), ExtractState::step);

    if state.in_inactive {
        tracing::trace!(
            file = %file,
            start = state.inactive_start,
            "dangling conditional at end of directive trace"
        );
    }
    tracing::trace!(file = %file, ranges = state.ranges.len(), "extracted inactive ranges");
    state.ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(kind: DirectiveKind, offset: usize, length: usize, taken: bool) -> DirectiveRecord {
        DirectiveRecord::new(kind, FileId::new("main.c"), offset, length, taken)
    }

    fn extract(records: &[DirectiveRecord]) -> Vec<InactiveRange> {
        extract_inactive_ranges(records, &FileId::new("main.c"))
    }

    #[test]
    fn test_empty_trace() {
        assert!(extract(&[]).is_empty());
    }

    #[test]
    fn test_untaken_if_spans_to_end_of_endif() {
        let ranges = extract(&[
            rec(DirectiveKind::If, 0, 10, false),
            rec(DirectiveKind::Endif, 50, 4, false),
        ]);
        assert_eq!(ranges, vec![InactiveRange::new(0, 54)]);
    }

    #[test]
    fn test_taken_if_with_untaken_else() {
        let ranges = extract(&[
            rec(DirectiveKind::If, 0, 10, true),
            rec(DirectiveKind::Else, 40, 6, false),
            rec(DirectiveKind::Endif, 80, 4, false),
        ]);
        assert_eq!(ranges, vec![InactiveRange::new(40, 44)]);
    }

    #[test]
    fn test_untaken_if_closed_by_taken_else_includes_else_text() {
        let ranges = extract(&[
            rec(DirectiveKind::Ifdef, 0, 12, false),
            rec(DirectiveKind::Else, 30, 5, true),
            rec(DirectiveKind::Endif, 60, 6, false),
        ]);
        assert_eq!(ranges, vec![InactiveRange::new(0, 35)]);
    }

    #[test]
    fn test_nested_group_is_subsumed() {
        let ranges = extract(&[
            rec(DirectiveKind::Ifdef, 0, 12, false),
            rec(DirectiveKind::If, 20, 6, true),
            rec(DirectiveKind::Endif, 30, 4, false),
            rec(DirectiveKind::Endif, 60, 4, false),
        ]);
        assert_eq!(ranges, vec![InactiveRange::new(0, 64)]);
    }

    #[test]
    fn test_elif_chain() {
        // #if 0 / #elif 1 / #elif 0 / #else / #endif
        let ranges = extract(&[
            rec(DirectiveKind::If, 0, 5, false),
            rec(DirectiveKind::Elif, 20, 7, true),
            rec(DirectiveKind::Elif, 40, 7, false),
            rec(DirectiveKind::Else, 60, 5, false),
            rec(DirectiveKind::Endif, 80, 6, false),
        ]);
        assert_eq!(
            ranges,
            vec![InactiveRange::new(0, 27), InactiveRange::new(40, 46)]
        );
    }

    #[test]
    fn test_lone_endif_is_ignored() {
        assert!(extract(&[rec(DirectiveKind::Endif, 0, 4, false)]).is_empty());
    }

    #[test]
    fn test_spurious_endif_does_not_disturb_later_groups() {
        let ranges = extract(&[
            rec(DirectiveKind::Endif, 0, 6, false),
            rec(DirectiveKind::Ifndef, 10, 9, false),
            rec(DirectiveKind::Endif, 30, 6, false),
        ]);
        assert_eq!(ranges, vec![InactiveRange::new(10, 26)]);
    }

    #[test]
    fn test_dangling_if_produces_nothing() {
        assert!(extract(&[rec(DirectiveKind::If, 0, 10, false)]).is_empty());
    }

    #[test]
    fn test_dangling_inner_group_keeps_closed_outer_ranges() {
        let ranges = extract(&[
            rec(DirectiveKind::If, 0, 5, false),
            rec(DirectiveKind::Endif, 10, 6, false),
            rec(DirectiveKind::If, 20, 5, true),
            rec(DirectiveKind::Else, 30, 5, false),
        ]);
        assert_eq!(ranges, vec![InactiveRange::new(0, 16)]);
    }

    #[test]
    fn test_taken_branch_inside_inactive_group_does_not_overlap() {
        // Inconsistent trace: a taken #else nested in an untaken #if.
        let ranges = extract(&[
            rec(DirectiveKind::If, 0, 5, false),
            rec(DirectiveKind::If, 10, 5, false),
            rec(DirectiveKind::Else, 20, 5, true),
            rec(DirectiveKind::Endif, 30, 6, false),
            rec(DirectiveKind::Endif, 50, 6, false),
        ]);
        assert_eq!(
            ranges,
            vec![InactiveRange::new(0, 25), InactiveRange::new(30, 26)]
        );
    }

    #[test]
    fn test_other_files_are_ignored() {
        let header = FileId::new("config.h");
        let records = vec![
            rec(DirectiveKind::If, 0, 5, true),
            DirectiveRecord::new(DirectiveKind::If, header.clone(), 0, 5, false),
            rec(DirectiveKind::Else, 10, 5, false),
            DirectiveRecord::new(DirectiveKind::Endif, header.clone(), 40, 6, false),
            DirectiveRecord::new(DirectiveKind::Else, header, 50, 5, true),
            rec(DirectiveKind::Endif, 90, 6, false),
        ];

        assert_eq!(extract(&records), vec![InactiveRange::new(10, 86)]);
        assert_eq!(
            extract_inactive_ranges(&records, &FileId::new("config.h")),
            vec![InactiveRange::new(0, 46)]
        );
    }

    #[test]
    fn test_zero_length_candidate_is_dropped() {
        let ranges = extract(&[
            rec(DirectiveKind::If, 7, 0, false),
            rec(DirectiveKind::Endif, 7, 0, false),
        ]);
        assert!(ranges.is_empty());
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let records = vec![
            rec(DirectiveKind::If, 0, 5, false),
            rec(DirectiveKind::Elif, 20, 7, true),
            rec(DirectiveKind::Endif, 80, 6, false),
        ];
        assert_eq!(extract(&records), extract(&records));
    }

    #[test]
    fn test_range_to_interval() {
        let interval = InactiveRange::new(4, 6).to_interval(9);
        assert_eq!(interval, Interval::new(4, 10, 9));
        assert_eq!(InactiveRange::from_bounds(5, 5), None);
    }
}
