use crate::core::constants::MAX_LATITUDE;
use crate::traits::GeoProjection;
use geo::HaversineDistance;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Clamps latitude to the range covered by the tile pyramid
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::Point::new(lat_lng.lng, lat_lng.lat)
    }
}

/// Represents a point in screen or tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }
}

/// The standard slippy-map tile pyramid (EPSG:3857 tiling)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebMercator;

impl WebMercator {
    fn tile_count(zoom: u8) -> f64 {
        2_f64.powi(i32::from(zoom))
    }
}

impl GeoProjection for WebMercator {
    fn tile_x(zoom: u8, longitude: f64) -> f64 {
        (longitude + 180.0) / 360.0 * Self::tile_count(zoom)
    }

    fn tile_y(zoom: u8, latitude: f64) -> f64 {
        let lat_rad = LatLng::clamp_lat(latitude).to_radians();
        (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * Self::tile_count(zoom)
    }

    fn longitude(zoom: u8, tile_x: f64) -> f64 {
        tile_x / Self::tile_count(zoom) * 360.0 - 180.0
    }

    fn latitude(zoom: u8, tile_y: f64) -> f64 {
        let n = PI * (1.0 - 2.0 * tile_y / Self::tile_count(zoom));
        n.sinh().atan().to_degrees()
    }

    fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let from: geo_types::Point<f64> = LatLng::new(lat1, lon1).into();
        let to: geo_types::Point<f64> = LatLng::new(lat2, lon2).into();
        from.haversine_distance(&to)
    }
}
