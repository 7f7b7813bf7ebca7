//! Derived highlighting edits.
//!
//! Inactive-code results are expressed as [`ProcessingEdit`] values: a full replacement of one
//! style layer. Consumers such as [`HighlightLayers`](crate::highlights::HighlightLayers) apply
//! them without knowing where they came from.

use crate::config::InactiveCodeConfig;
use crate::delta::PositionConverter;
use crate::directive::{DirectiveRecord, FileId};
use crate::extract::{InactiveRange, extract_inactive_ranges};
use crate::intervals::{Interval, StyleLayerId};

/// A change to derived highlighting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingEdit {
    /// Replace an entire style layer with the given intervals (half-open offsets).
    ReplaceStyleLayer {
        /// The style layer being replaced.
        layer: StyleLayerId,
        /// The full set of style intervals for the layer.
        intervals: Vec<Interval>,
    },
    /// Clear a style layer.
    ClearStyleLayer {
        /// The style layer being cleared.
        layer: StyleLayerId,
    },
}

impl ProcessingEdit {
    /// The style layer this edit targets.
    pub fn layer(&self) -> StyleLayerId {
        match self {
            Self::ReplaceStyleLayer { layer, .. } | Self::ClearStyleLayer { layer } => *layer,
        }
    }
}

/// Turns directive traces into replacements of the inactive-code style layer.
#[derive(Debug, Clone, Default)]
pub struct InactiveCodeProcessor {
    config: InactiveCodeConfig,
}

impl InactiveCodeProcessor {
    /// Create a processor with the given configuration.
    pub fn new(config: InactiveCodeConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &InactiveCodeConfig {
        &self.config
    }

    /// Compute inactive ranges for `file`, mapped through `converter` when given.
    ///
    /// A missing trace (`None`) yields no ranges. Ranges that collapse to nothing after
    /// conversion are dropped, and ranges that overlap after conversion are merged.
    pub fn inactive_ranges(
        &self,
        directives: Option<&[DirectiveRecord]>,
        file: &FileId,
        converter: Option<&dyn PositionConverter>,
    ) -> Vec<InactiveRange> {
        let ranges = extract_inactive_ranges(directives.unwrap_or_default(), file);
        match converter {
            Some(converter) => merge_overlapping(
                ranges
                    .into_iter()
                    .map(|range| converter.historic_to_actual(range))
                    .filter(|range| range.length > 0),
            ),
            None => ranges,
        }
    }

    /// Compute the edit that replaces the configured layer with the inactive ranges of `file`.
    pub fn process(
        &self,
        directives: Option<&[DirectiveRecord]>,
        file: &FileId,
        converter: Option<&dyn PositionConverter>,
    ) -> ProcessingEdit {
        let intervals: Vec<Interval> = self
            .inactive_ranges(directives, file, converter)
            .iter()
            .map(|range| range.to_interval(self.config.style_id))
            .collect();
        tracing::debug!(file = %file, intervals = intervals.len(), "inactive code layer computed");

        ProcessingEdit::ReplaceStyleLayer {
            layer: self.config.style_layer,
            intervals,
        }
    }

    /// The edit that removes every inactive-code highlight.
    pub fn clear(&self) -> ProcessingEdit {
        ProcessingEdit::ClearStyleLayer {
            layer: self.config.style_layer,
        }
    }
}

/// Merge ranges that overlap after conversion.
///
/// Conversion is monotonic, so the input is still sorted by offset.
fn merge_overlapping(ranges: impl Iterator<Item = InactiveRange>) -> Vec<InactiveRange> {
    let mut merged: Vec<InactiveRange> = Vec::new();
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.offset < last.end() => {
                last.length = last.end().max(range.end()) - last.offset;
            }
            _ => merged.push(range),
        }
    }
    merged
}
