use crate::core::bounds::Bounds;
use crate::core::constants::{DEFAULT_ANCHOR, FULL_TURN, MAX_ZOOM_EXPONENT, TILE_SIZE};
use crate::core::geo::{LatLng, LatLngBounds, Point, WebMercator};
use crate::traits::GeoProjection;
use crate::{Result, ViewportError};
use std::cell::Cell;

/// Slack allowed on the pixel rectangle edges when testing containment, so a
/// point that lands on an edge after a round trip through tile space still counts.
const PIXEL_EPSILON: f64 = 1e-6;

/// Primary configuration a viewport is assembled from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ViewportParams {
    pub center: LatLng,
    pub zoom: u8,
    pub zoom_scale: f64,
    pub rotation: f64,
    pub density: f64,
    pub width: u32,
    pub height: u32,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

/// Tile-space geometry of the pixel rectangle, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Geometry {
    /// Left-top, right-top, right-bottom, left-bottom
    corners: [Point; 4],
    tile_bounds: Bounds,
    geo_bounds: LatLngBounds,
}

/// A rotated, zoomable view onto the tile pyramid.
///
/// All transform math runs in tile space of the integer `zoom`. The zoom factor
/// `2^(zoom_scale + zoom_animation) * 256` converts tile-space deltas into pixels,
/// and the pixel `(cx, cy)` shows the geographic center.
///
/// Bounding geometry is cached lazily behind a `Cell`, so a box is `Send` but
/// not `Sync`: share it across threads by cloning.
#[derive(Debug, Clone)]
pub struct ViewportBox {
    center: LatLng,
    rotation: f64,
    density: f64,
    zoom: u8,
    zoom_scale: f64,
    zoom_animation: f64,
    cx: i32,
    cy: i32,
    width: u32,
    height: u32,

    // derived, recomputed on every mutation
    zoom_factor: f64,
    rotate_cos: f64,
    rotate_sin: f64,
    origin_tile: Point,

    // lazy, `None` until first queried after a mutation
    geometry: Cell<Option<Geometry>>,
}

impl ViewportBox {
    pub(crate) fn from_params(params: ViewportParams) -> Self {
        let mut viewport = Self {
            center: params.center,
            rotation: params.rotation,
            density: params.density,
            zoom: params.zoom,
            zoom_scale: params.zoom_scale,
            zoom_animation: 0.0,
            cx: anchor_offset(params.width, params.anchor_x),
            cy: anchor_offset(params.height, params.anchor_y),
            width: params.width,
            height: params.height,
            zoom_factor: 0.0,
            rotate_cos: 1.0,
            rotate_sin: 0.0,
            origin_tile: Point::default(),
            geometry: Cell::new(None),
        };
        viewport.calculate_derived_fields();
        viewport
    }

    fn calculate_derived_fields(&mut self) {
        self.rotation = normalize_rotation(self.rotation);
        let exponent = (self.zoom_scale + self.zoom_animation)
            .clamp(-MAX_ZOOM_EXPONENT, MAX_ZOOM_EXPONENT);
        self.zoom_factor = 2_f64.powf(exponent) * TILE_SIZE;
        let rad = self.rotation.to_radians();
        self.rotate_cos = rad.cos();
        self.rotate_sin = rad.sin();
        self.origin_tile = Point::new(
            WebMercator::tile_x(self.zoom, self.center.lng),
            WebMercator::tile_y(self.zoom, self.center.lat),
        );
        self.geometry.set(None);
    }

    fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }

    /// Converts a screen pixel into tile space of the current zoom
    pub fn pixel_to_tile(&self, x: f64, y: f64) -> Point {
        let dx = x - f64::from(self.cx);
        let dy = y - f64::from(self.cy);
        let (dtx, dty) = if self.is_rotated() {
            (
                self.rotate_cos * dx + self.rotate_sin * dy,
                -self.rotate_sin * dx + self.rotate_cos * dy,
            )
        } else {
            (dx, dy)
        };
        Point::new(
            dtx / self.zoom_factor + self.origin_tile.x,
            dty / self.zoom_factor + self.origin_tile.y,
        )
    }

    /// Converts a tile-space position of the current zoom into a screen pixel
    pub fn tile_to_pixel(&self, tile_x: f64, tile_y: f64) -> Point {
        let dtx = tile_x - self.origin_tile.x;
        let dty = tile_y - self.origin_tile.y;
        let (rx, ry) = if self.is_rotated() {
            (
                self.rotate_cos * dtx - self.rotate_sin * dty,
                self.rotate_sin * dtx + self.rotate_cos * dty,
            )
        } else {
            (dtx, dty)
        };
        Point::new(
            rx * self.zoom_factor + f64::from(self.cx),
            ry * self.zoom_factor + f64::from(self.cy),
        )
    }

    /// Geographic position shown at a screen pixel
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> LatLng {
        let tile = self.pixel_to_tile(x, y);
        self.tile_to_geo(&tile)
    }

    /// Screen pixel showing a geographic position
    pub fn geo_to_pixel(&self, lat: f64, lon: f64) -> Point {
        self.tile_to_pixel(
            WebMercator::tile_x(self.zoom, lon),
            WebMercator::tile_y(self.zoom, lat),
        )
    }

    fn tile_to_geo(&self, tile: &Point) -> LatLng {
        LatLng::new(
            WebMercator::latitude(self.zoom, tile.y),
            WebMercator::longitude(self.zoom, tile.x),
        )
    }

    /// Pixel x of a longitude, ignoring rotation
    pub fn pixel_x_from_lon_no_rotation(&self, lon: f64) -> f64 {
        self.pixel_x_from_tile_x_no_rotation(WebMercator::tile_x(self.zoom, lon))
    }

    /// Pixel y of a latitude, ignoring rotation
    pub fn pixel_y_from_lat_no_rotation(&self, lat: f64) -> f64 {
        self.pixel_y_from_tile_y_no_rotation(WebMercator::tile_y(self.zoom, lat))
    }

    pub fn pixel_x_from_tile_x_no_rotation(&self, tile_x: f64) -> f64 {
        (tile_x - self.origin_tile.x) * self.zoom_factor + f64::from(self.cx)
    }

    pub fn pixel_y_from_tile_y_no_rotation(&self, tile_y: f64) -> f64 {
        (tile_y - self.origin_tile.y) * self.zoom_factor + f64::from(self.cy)
    }

    fn geometry(&self) -> Geometry {
        if let Some(geometry) = self.geometry.get() {
            return geometry;
        }
        let geometry = self.compute_geometry();
        self.geometry.set(Some(geometry));
        geometry
    }

    fn compute_geometry(&self) -> Geometry {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let corners = [
            self.pixel_to_tile(0.0, 0.0),
            self.pixel_to_tile(w, 0.0),
            self.pixel_to_tile(w, h),
            self.pixel_to_tile(0.0, h),
        ];
        let tile_bounds = Bounds::enclosing(&corners);
        let geo_bounds = LatLngBounds::from_coords(
            WebMercator::latitude(self.zoom, tile_bounds.bottom()),
            WebMercator::longitude(self.zoom, tile_bounds.left()),
            WebMercator::latitude(self.zoom, tile_bounds.top()),
            WebMercator::longitude(self.zoom, tile_bounds.right()),
        );
        log::trace!(
            "viewport geometry recomputed: zoom {} tiles ({:.4}, {:.4})-({:.4}, {:.4})",
            self.zoom,
            tile_bounds.left(),
            tile_bounds.top(),
            tile_bounds.right(),
            tile_bounds.bottom()
        );
        Geometry {
            corners,
            tile_bounds,
            geo_bounds,
        }
    }

    /// Whether the bounding geometry is currently cached
    pub fn is_geometry_cached(&self) -> bool {
        self.geometry.get().is_some()
    }

    /// Axis-aligned tile-space rectangle enclosing the (possibly rotated) view
    pub fn tile_bounds(&self) -> Bounds {
        self.geometry().tile_bounds
    }

    /// Geographic rectangle of [`tile_bounds`](Self::tile_bounds)
    pub fn geo_bounds(&self) -> LatLngBounds {
        self.geometry().geo_bounds
    }

    /// Tile-space positions of the pixel corners: left-top, right-top,
    /// right-bottom, left-bottom.
    pub fn tile_corners(&self) -> [Point; 4] {
        self.geometry().corners
    }

    pub fn top_left_tile(&self) -> Point {
        self.geometry().corners[0]
    }

    /// Geographic position of the top-left pixel corner
    pub fn top_left_geo(&self) -> LatLng {
        let corner = self.geometry().corners[0];
        self.tile_to_geo(&corner)
    }

    /// Geographic position of the bottom-right pixel corner
    pub fn bottom_right_geo(&self) -> LatLng {
        let corner = self.geometry().corners[2];
        self.tile_to_geo(&corner)
    }

    fn contains_pixel(&self, pixel: &Point) -> bool {
        pixel.x >= -PIXEL_EPSILON
            && pixel.x <= f64::from(self.width) + PIXEL_EPSILON
            && pixel.y >= -PIXEL_EPSILON
            && pixel.y <= f64::from(self.height) + PIXEL_EPSILON
    }

    /// Whether the position projects inside the pixel rectangle. Points up to
    /// 1e-6 px outside an edge count as inside.
    pub fn contains_geo_point(&self, lat: f64, lon: f64) -> bool {
        self.contains_pixel(&self.geo_to_pixel(lat, lon))
    }

    /// Same as [`Self::contains_geo_point`] for a tile-space point, with the
    /// same 1e-6 px edge slack.
    pub fn contains_tile_point(&self, tile_x: f64, tile_y: f64) -> bool {
        self.contains_pixel(&self.tile_to_pixel(tile_x, tile_y))
    }

    /// Whether all four corners of `other` fall inside this view.
    ///
    /// Both boxes must share the integer zoom, since tile-space units differ
    /// between levels. `other` is left untouched, its geometry is computed on
    /// a private copy.
    pub fn contains_viewport(&self, other: &ViewportBox) -> Result<bool> {
        if other.zoom != self.zoom {
            return Err(ViewportError::IncompatibleViewport {
                expected: self.zoom,
                found: other.zoom,
            });
        }
        let snapshot = other.clone();
        Ok(snapshot
            .tile_corners()
            .iter()
            .all(|corner| self.contains_tile_point(corner.x, corner.y)))
    }

    /// Great-circle distance in meters between the positions shown at two pixels
    pub fn distance_between_pixels(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        let from = self.pixel_to_geo(x1, y1);
        let to = self.pixel_to_geo(x2, y2);
        WebMercator::distance(from.lat, from.lng, to.lat, to.lng)
    }

    pub fn set_center(&mut self, lat: f64, lon: f64) {
        self.center = LatLng::new(lat, lon);
        self.calculate_derived_fields();
    }

    /// Sets the rotation in degrees; any finite angle is folded into `[0, 360)`.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
        self.calculate_derived_fields();
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom;
        self.calculate_derived_fields();
    }

    pub fn set_zoom_and_scale(&mut self, zoom: u8, zoom_scale: f64) {
        self.zoom = zoom;
        self.zoom_scale = zoom_scale;
        self.calculate_derived_fields();
    }

    pub fn set_zoom_scale_and_animation(&mut self, zoom: u8, zoom_scale: f64, zoom_animation: f64) {
        self.zoom = zoom;
        self.zoom_scale = zoom_scale;
        self.zoom_animation = zoom_animation;
        self.calculate_derived_fields();
    }

    pub fn set_zoom_and_animation(&mut self, zoom: u8, zoom_animation: f64) {
        self.zoom = zoom;
        self.zoom_animation = zoom_animation;
        self.calculate_derived_fields();
    }

    pub fn set_zoom_animation(&mut self, zoom_animation: f64) {
        self.zoom_animation = zoom_animation;
        self.calculate_derived_fields();
    }

    /// Resizes the view and re-centers the anchor in the middle
    pub fn set_pixel_dimensions(&mut self, width: u32, height: u32) {
        self.set_pixel_dimensions_with_anchor(width, height, DEFAULT_ANCHOR, DEFAULT_ANCHOR);
    }

    pub fn set_pixel_dimensions_with_anchor(
        &mut self,
        width: u32,
        height: u32,
        anchor_x: f64,
        anchor_y: f64,
    ) {
        self.width = width;
        self.height = height;
        self.cx = anchor_offset(width, anchor_x);
        self.cy = anchor_offset(height, anchor_y);
        self.calculate_derived_fields();
    }

    /// Pads the view by `dw` pixels left and right and `dh` pixels top and
    /// bottom. The anchor keeps showing the same position.
    ///
    /// Negative values shrink, but never past the anchor: the view collapses
    /// onto it instead of leaving it outside the rectangle.
    pub fn grow_pixel_dimensions(&mut self, dw: i32, dh: i32) {
        let dw = dw.max(max_shrink(self.width, self.cx));
        let dh = dh.max(max_shrink(self.height, self.cy));
        self.width = self.width.saturating_add_signed(dw.saturating_mul(2));
        self.height = self.height.saturating_add_signed(dh.saturating_mul(2));
        self.cx = self.cx.saturating_add(dw);
        self.cy = self.cy.saturating_add(dh);
        self.calculate_derived_fields();
    }

    /// Moves the anchor to a new ratio of the current dimensions
    pub fn set_center_anchor(&mut self, anchor_x: f64, anchor_y: f64) {
        self.cx = anchor_offset(self.width, anchor_x);
        self.cy = anchor_offset(self.height, anchor_y);
        self.calculate_derived_fields();
    }

    pub fn set_density(&mut self, density: f64) {
        self.density = density;
        self.calculate_derived_fields();
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn latitude(&self) -> f64 {
        self.center.lat
    }

    pub fn longitude(&self) -> f64 {
        self.center.lng
    }

    pub fn center_pixel(&self) -> Point {
        Point::new(f64::from(self.cx), f64::from(self.cy))
    }

    pub fn center_pixel_x(&self) -> i32 {
        self.cx
    }

    pub fn center_pixel_y(&self) -> i32 {
        self.cy
    }

    /// Tile-space position of the geographic center at the current zoom
    pub fn center_tile(&self) -> Point {
        self.origin_tile
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn rotate_cos(&self) -> f64 {
        self.rotate_cos
    }

    pub fn rotate_sin(&self) -> f64 {
        self.rotate_sin
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    pub fn zoom_animation(&self) -> f64 {
        self.zoom_animation
    }

    pub fn is_zoom_animated(&self) -> bool {
        self.zoom_animation != 0.0
    }

    /// Pixels per tile-space unit
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn pixel_width(&self) -> u32 {
        self.width
    }

    pub fn pixel_height(&self) -> u32 {
        self.height
    }
}

impl PartialEq for ViewportBox {
    /// Compares the primary configuration; cache state is irrelevant.
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center
            && self.rotation == other.rotation
            && self.density == other.density
            && self.zoom == other.zoom
            && self.zoom_scale == other.zoom_scale
            && self.zoom_animation == other.zoom_animation
            && self.cx == other.cx
            && self.cy == other.cy
            && self.width == other.width
            && self.height == other.height
    }
}

fn anchor_offset(dimension: u32, ratio: f64) -> i32 {
    (f64::from(dimension) * ratio) as i32
}

/// Most negative per-side pad that keeps `anchor` within `[0, dimension]`.
/// An anchor already outside the rectangle only keeps the dimension non-negative.
fn max_shrink(dimension: u32, anchor: i32) -> i32 {
    let dimension = i64::from(dimension);
    let anchor = i64::from(anchor);
    let limit = if (0..=dimension).contains(&anchor) {
        (-anchor).max(anchor - dimension)
    } else {
        -(dimension / 2)
    };
    i32::try_from(limit).unwrap_or(i32::MIN)
}

fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        log::warn!("non-finite rotation {degrees} replaced by 0");
        return 0.0;
    }
    let rotation = degrees.rem_euclid(FULL_TURN);
    // tiny negative inputs round up to a full turn; `+ 0.0` folds -0.0
    if rotation >= FULL_TURN {
        0.0
    } else {
        rotation + 0.0
    }
}
