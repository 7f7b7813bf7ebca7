//! Style intervals and style layers.
//!
//! Highlight consumers keep one set of intervals per [`StyleLayerId`], so inactive-code results
//! can be replaced or cleared without affecting syntax or diagnostic styling.

/// Style ID type
pub type StyleId = u32;

/// Built-in style id for preprocessor-inactive code.
///
/// Consumers should map this to a muted background or foreground.
pub const INACTIVE_CODE_STYLE_ID: StyleId = 0x0500_0001;

/// Style layer ID
///
/// Used to distinguish style sources (e.g., semantic highlighting, inactive code, diagnostics),
/// allowing replacement/clearing of one layer without affecting other style layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StyleLayerId(pub u32);

impl StyleLayerId {
    /// Create a style layer id from a raw numeric identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Preprocessor-inactive code layer.
    pub const INACTIVE_CODE: Self = Self(6);
}

/// Interval structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Start offset
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Style ID
    pub style_id: StyleId,
}

impl Interval {
    /// Create a new interval with `[start, end)` offsets and a style id.
    pub fn new(start: usize, end: usize, style_id: StyleId) -> Self {
        Self {
            start,
            end,
            style_id,
        }
    }

    /// Check if interval contains a specific position
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if two intervals overlap
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns `true` if the interval covers no offsets.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Interval tree - holds the intervals of one style layer.
///
/// Uses a sorted vector with binary search for point queries.
/// Query complexity: O(log n + k), where k is the number of overlapping intervals.
#[derive(Debug, Clone, Default)]
pub struct IntervalTree {
    /// List of intervals (kept sorted by start position)
    intervals: Vec<Interval>,
    /// Prefix maximum end position: `prefix_max_end[i] = max(intervals[0..=i].end)`
    prefix_max_end: Vec<usize>,
}

impl IntervalTree {
    /// Create an empty interval tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from an unordered set of intervals. Empty intervals are dropped.
    pub fn from_intervals(mut intervals: Vec<Interval>) -> Self {
        intervals.retain(|i| !i.is_empty());
        intervals.sort_by_key(|i| (i.start, i.end, i.style_id));
        intervals.dedup();

        let mut max_end = 0;
        let prefix_max_end = intervals
            .iter()
            .map(|interval| {
                max_end = max_end.max(interval.end);
                max_end
            })
            .collect();

        Self {
            intervals,
            prefix_max_end,
        }
    }

    /// Query all intervals containing a specific position
    pub fn query_point(&self, pos: usize) -> Vec<&Interval> {
        let mut result = Vec::new();

        // All intervals with start <= pos are before idx.
        let idx = self.intervals.partition_point(|i| i.start <= pos);
        for i in (0..idx).rev() {
            // If maximum end of `intervals[0..=i]` is <= pos, earlier intervals cannot contain pos.
            if self.prefix_max_end[i] <= pos {
                break;
            }
            let interval = &self.intervals[i];
            if interval.contains(pos) {
                result.push(interval);
            }
        }

        result.reverse();
        result
    }

    /// All intervals, sorted by start.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if the tree holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}
