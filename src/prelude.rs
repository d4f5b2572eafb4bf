//! Prelude module for common tilebox types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tilebox::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    builder::{ConfigGroup, ViewportBoxBuilder},
    config::ViewportOptions,
    geo::{LatLng, LatLngBounds, Point, WebMercator},
    viewport::ViewportBox,
};

pub use crate::traits::GeoProjection;

pub use crate::{Result, ViewportError};
