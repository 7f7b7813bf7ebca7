use crate::highlighting::Shared;
use inactive_code::{HighlightLayers, ProcessingEdit};
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

/// One published result, tagged with the installation it was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightUpdate {
    pub(crate) generation: u64,
    pub(crate) edit: ProcessingEdit,
}

impl HighlightUpdate {
    /// Installation generation the update was computed for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The layer edit to apply.
    pub fn edit(&self) -> &ProcessingEdit {
        &self.edit
    }
}

/// Receiving end of published highlight updates.
///
/// Owned by the thread that owns the highlight consumer. Layer replacements computed for an
/// earlier installation (before an `install`/`uninstall`) are discarded on application, so late
/// results never resurrect highlights. Clears are always applied.
pub struct HighlightUpdates {
    rx: mpsc::Receiver<HighlightUpdate>,
    shared: Arc<Shared>,
}

impl HighlightUpdates {
    pub(crate) fn new(rx: mpsc::Receiver<HighlightUpdate>, shared: Arc<Shared>) -> Self {
        Self { rx, shared }
    }

    /// Try to receive the next update without blocking.
    pub fn try_recv(&self) -> Option<HighlightUpdate> {
        self.rx.try_recv().ok()
    }

    /// Block until an update arrives or `timeout` elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<HighlightUpdate> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Returns `true` if `update` belongs to the current installation.
    pub fn is_current(&self, update: &HighlightUpdate) -> bool {
        update.generation == self.shared.generation()
    }

    /// Apply `update` to `layers` unless it is a stale replacement. Returns whether it was
    /// applied.
    pub fn apply(&self, update: HighlightUpdate, layers: &mut HighlightLayers) -> bool {
        // A clear queued by `uninstall` must land even if a new file was installed since.
        let is_clear = matches!(update.edit, ProcessingEdit::ClearStyleLayer { .. });
        if !is_clear && !self.is_current(&update) {
            tracing::debug!(
                generation = update.generation,
                "discarding stale inactive code update"
            );
            return false;
        }
        layers.apply_processing_edits([update.edit]);
        true
    }

    /// Apply every queued update. Returns the number applied.
    pub fn apply_pending(&self, layers: &mut HighlightLayers) -> usize {
        let mut applied = 0;
        while let Some(update) = self.try_recv() {
            if self.apply(update, layers) {
                applied += 1;
            }
        }
        applied
    }
}
