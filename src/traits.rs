//! Shared trait abstractions
//!
//! `GeoProjection` is the contract the viewport expects from the geography
//! utility.

/// Stateless conversions between tile space and geographic coordinates.
///
/// Tile coordinates are continuous: the integer part names the tile in the
/// power-of-two pyramid at `zoom`, the fractional part the position inside it.
pub trait GeoProjection {
    /// Tile-space x of `longitude` at `zoom`
    fn tile_x(zoom: u8, longitude: f64) -> f64;

    /// Tile-space y of `latitude` at `zoom`
    fn tile_y(zoom: u8, latitude: f64) -> f64;

    /// Longitude of tile-space x at `zoom`
    fn longitude(zoom: u8, tile_x: f64) -> f64;

    /// Latitude of tile-space y at `zoom`
    fn latitude(zoom: u8, tile_y: f64) -> f64;

    /// Great-circle distance in meters between two positions
    fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64;
}
