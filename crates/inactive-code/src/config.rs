//! Inactive code highlighting configuration.

use crate::intervals::{INACTIVE_CODE_STYLE_ID, StyleId, StyleLayerId};
use serde::Deserialize;

/// Where and how inactive ranges are published.
///
/// Deserializes from host settings, e.g. `{"style_layer": 6, "style_id": 83886081}`; missing
/// fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InactiveCodeConfig {
    /// Style layer replaced on every update.
    #[serde(with = "layer_id")]
    pub style_layer: StyleLayerId,
    /// Style id attached to every inactive interval.
    pub style_id: StyleId,
}

impl Default for InactiveCodeConfig {
    fn default() -> Self {
        Self {
            style_layer: StyleLayerId::INACTIVE_CODE,
            style_id: INACTIVE_CODE_STYLE_ID,
        }
    }
}

impl InactiveCodeConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish into a different style layer.
    pub fn with_style_layer(mut self, layer: StyleLayerId) -> Self {
        self.style_layer = layer;
        self
    }

    /// Tag intervals with a different style id.
    pub fn with_style_id(mut self, style_id: StyleId) -> Self {
        self.style_id = style_id;
        self
    }
}

mod layer_id {
    use crate::intervals::StyleLayerId;
    use serde::{Deserialize, Deserializer};

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<StyleLayerId, D::Error>
    where
        D: Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(StyleLayerId::new)
    }
}
