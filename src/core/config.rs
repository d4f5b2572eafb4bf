//! Optional viewport defaults
//!
//! Hosts usually keep display density, the initial rotation and the anchor
//! of the geographic center in their own settings. `ViewportOptions` carries
//! those values into a [`ViewportBoxBuilder`](crate::core::builder::ViewportBoxBuilder)
//! and can be read from JSON.

use crate::core::constants::{DEFAULT_ANCHOR, DEFAULT_DENSITY};
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    /// Device-independent-pixel scale factor
    pub density: f64,
    /// Initial rotation in degrees
    pub rotation: f64,
    /// Horizontal anchor ratio of the geographic center
    pub anchor_x: f64,
    /// Vertical anchor ratio of the geographic center
    pub anchor_y: f64,
}

impl ViewportOptions {
    /// Parses options from a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Anchor pinned to a given ratio, e.g. `(0.5, 0.75)` for a
    /// navigation view that shows more of the road ahead.
    pub fn with_anchor(mut self, anchor_x: f64, anchor_y: f64) -> Self {
        self.anchor_x = anchor_x;
        self.anchor_y = anchor_y;
        self
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            rotation: 0.0,
            anchor_x: DEFAULT_ANCHOR,
            anchor_y: DEFAULT_ANCHOR,
        }
    }
}
