//! Highlight layer store.
//!
//! [`HighlightLayers`] is the consumer side of [`ProcessingEdit`]s: it keeps one normalized
//! [`IntervalTree`] per [`StyleLayerId`] and swaps whole layers on replacement, the way a
//! line-background painter swaps its set of highlighted positions.

use crate::intervals::{Interval, IntervalTree, StyleId, StyleLayerId};
use crate::processing::ProcessingEdit;
use std::collections::BTreeMap;

/// Per-layer highlighted ranges.
#[derive(Debug, Clone, Default)]
pub struct HighlightLayers {
    layers: BTreeMap<StyleLayerId, IntervalTree>,
    version: u64,
}

impl HighlightLayers {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a batch of edits in order.
    pub fn apply_processing_edits<I>(&mut self, edits: I)
    where
        I: IntoIterator<Item = ProcessingEdit>,
    {
        for edit in edits {
            match edit {
                ProcessingEdit::ReplaceStyleLayer { layer, intervals } => {
                    self.replace_style_layer(layer, intervals);
                }
                ProcessingEdit::ClearStyleLayer { layer } => {
                    self.clear_style_layer(layer);
                }
            }
        }
    }

    /// Replace all intervals of `layer`. An empty set removes the layer.
    pub fn replace_style_layer(&mut self, layer: StyleLayerId, intervals: Vec<Interval>) {
        let tree = IntervalTree::from_intervals(intervals);
        if tree.is_empty() {
            self.layers.remove(&layer);
        } else {
            self.layers.insert(layer, tree);
        }
        self.version += 1;
    }

    /// Remove all intervals of `layer`.
    pub fn clear_style_layer(&mut self, layer: StyleLayerId) {
        self.layers.remove(&layer);
        self.version += 1;
    }

    /// Intervals of `layer`, sorted by start. Empty if the layer is absent.
    pub fn layer(&self, layer: StyleLayerId) -> &[Interval] {
        self.layers
            .get(&layer)
            .map(IntervalTree::intervals)
            .unwrap_or_default()
    }

    /// Returns `true` if `offset` is covered by an interval of `layer`.
    pub fn is_styled(&self, layer: StyleLayerId, offset: usize) -> bool {
        self.layers
            .get(&layer)
            .is_some_and(|tree| !tree.query_point(offset).is_empty())
    }

    /// Style ids applied at `offset`, across all layers, in layer order.
    pub fn styles_at(&self, offset: usize) -> Vec<StyleId> {
        self.layers
            .values()
            .flat_map(|tree| tree.query_point(offset))
            .map(|interval| interval.style_id)
            .collect()
    }

    /// Number of non-empty layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Incremented once per applied edit.
    pub fn version(&self) -> u64 {
        self.version
    }
}
