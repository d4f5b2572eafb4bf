//! # tilebox
//!
//! A rotated map viewport model. A [`ViewportBox`] knows the geographic
//! center, zoom, rotation and pixel size of a map view and converts between
//! screen pixels, tile space of the slippy-map pyramid and latitude/longitude.
//!
//! Boxes are built once through [`ViewportBoxBuilder`], then mutated and
//! queried per frame or input event. A box is meant for a single writer;
//! clone it before handing it to another thread.

pub mod core;
pub mod prelude;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    builder::{ConfigGroup, ViewportBoxBuilder},
    config::ViewportOptions,
    geo::{LatLng, LatLngBounds, Point, WebMercator},
    viewport::ViewportBox,
};

pub use traits::GeoProjection;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ViewportError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error("Please specify {0}")]
    MissingConfiguration(ConfigGroup),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Viewports are not comparable: expected zoom {expected}, found {found}")]
    IncompatibleViewport { expected: u8, found: u8 },

    #[error("Builder was already used to build a viewport")]
    BuilderConsumed,

    #[error("Options error: {0}")]
    Options(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = ViewportError;

/// Installs `env_logger` as the `log` backend. Calling it again is harmless.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
