//! Viewport builder for fluent configuration
//!
//! A [`ViewportBoxBuilder`] collects the three required groups (pixel
//! dimensions, zoom, location) plus optional density, rotation and anchor,
//! validates them and hands out one fully initialised [`ViewportBox`].

use crate::{
    core::{
        config::ViewportOptions,
        geo::LatLng,
        viewport::{ViewportBox, ViewportParams},
    },
    Result, ViewportError,
};
use std::fmt;

/// Configuration groups a builder cannot default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigGroup {
    PixelDimensions,
    Zoom,
    Location,
}

impl fmt::Display for ConfigGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PixelDimensions => "pixel dimensions",
            Self::Zoom => "zoom",
            Self::Location => "location",
        };
        f.write_str(name)
    }
}

/// Builder for creating validated ViewportBox instances
///
/// A builder yields a single box; once `build` succeeded, further calls fail
/// with [`ViewportError::BuilderConsumed`]. It cannot be cloned, so the
/// single-use rule cannot be sidestepped by duplicating a configured builder:
///
/// ```compile_fail
/// let builder = tilebox::ViewportBoxBuilder::new();
/// let _copy = builder.clone();
/// ```
#[derive(Debug)]
pub struct ViewportBoxBuilder {
    options: ViewportOptions,
    pixel_dimensions: Option<(u32, u32)>,
    anchor: Option<(f64, f64)>,
    zoom: Option<(u8, f64)>,
    location: Option<LatLng>,
    consumed: bool,
}

impl ViewportBoxBuilder {
    /// Create a new builder with density 1 and no rotation
    pub fn new() -> Self {
        Self {
            options: ViewportOptions::default(),
            pixel_dimensions: None,
            anchor: None,
            zoom: None,
            location: None,
            consumed: false,
        }
    }

    /// Seed density, rotation and the default anchor from stored options
    pub fn with_options(mut self, options: &ViewportOptions) -> Self {
        self.options = *options;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.options.density = density;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.options.rotation = degrees;
        self
    }

    /// Set the integer zoom level and the fractional zoom scale
    pub fn with_zoom_and_scale(mut self, zoom: u8, zoom_scale: f64) -> Self {
        self.zoom = Some((zoom, zoom_scale));
        self
    }

    /// Set the geographic center
    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.location = Some(LatLng::new(lat, lon));
        self
    }

    /// Set the pixel size; the anchor comes from the options (center by default)
    pub fn with_pixel_dimensions(mut self, width: u32, height: u32) -> Self {
        self.pixel_dimensions = Some((width, height));
        self.anchor = None;
        self
    }

    /// Set the pixel size and the ratios locating the geographic center on screen
    pub fn with_pixel_dimensions_and_anchor(
        mut self,
        width: u32,
        height: u32,
        anchor_x: f64,
        anchor_y: f64,
    ) -> Self {
        self.pixel_dimensions = Some((width, height));
        self.anchor = Some((anchor_x, anchor_y));
        self
    }

    /// Validate the collected configuration and produce the viewport.
    ///
    /// On failure the builder is left as it was and can be completed and
    /// built again.
    pub fn build(&mut self) -> Result<ViewportBox> {
        if self.consumed {
            return Err(ViewportError::BuilderConsumed);
        }
        let (width, height) = self
            .pixel_dimensions
            .ok_or(ViewportError::MissingConfiguration(ConfigGroup::PixelDimensions))?;
        let (zoom, zoom_scale) = self
            .zoom
            .ok_or(ViewportError::MissingConfiguration(ConfigGroup::Zoom))?;
        let center = self
            .location
            .ok_or(ViewportError::MissingConfiguration(ConfigGroup::Location))?;
        let (anchor_x, anchor_y) = self
            .anchor
            .unwrap_or((self.options.anchor_x, self.options.anchor_y));

        let params = ViewportParams {
            center,
            zoom,
            zoom_scale,
            rotation: self.options.rotation,
            density: self.options.density,
            width,
            height,
            anchor_x,
            anchor_y,
        };
        validate(&params)?;

        let viewport = ViewportBox::from_params(params);
        self.consumed = true;
        log::debug!(
            "built viewport {}x{} at ({:.6}, {:.6}) zoom {} scale {} rotation {}",
            width,
            height,
            center.lat,
            center.lng,
            zoom,
            zoom_scale,
            viewport.rotation()
        );
        Ok(viewport)
    }
}

impl Default for ViewportBoxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(params: &ViewportParams) -> Result<()> {
    if !params.density.is_finite() || params.density <= 0.0 {
        return Err(ViewportError::InvalidOption(format!(
            "density must be positive, got {}",
            params.density
        )));
    }
    if !params.anchor_x.is_finite() || !params.anchor_y.is_finite() {
        return Err(ViewportError::InvalidOption(format!(
            "anchor ratios must be finite, got ({}, {})",
            params.anchor_x, params.anchor_y
        )));
    }
    if !params.center.lat.is_finite() || !params.center.lng.is_finite() {
        return Err(ViewportError::InvalidOption(format!(
            "location must be finite, got ({}, {})",
            params.center.lat, params.center.lng
        )));
    }
    if !params.zoom_scale.is_finite() {
        return Err(ViewportError::InvalidOption(format!(
            "zoom scale must be finite, got {}",
            params.zoom_scale
        )));
    }
    if !params.rotation.is_finite() {
        return Err(ViewportError::InvalidOption(format!(
            "rotation must be finite, got {}",
            params.rotation
        )));
    }
    Ok(())
}
