//! Core constants shared by the projection and viewport code.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels. One tile-space unit spans this many
/// pixels when the zoom scale and animation offset are both zero.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the web-mercator tile pyramid, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Display density used when none is configured.
pub const DEFAULT_DENSITY: f64 = 1.0;

/// Anchor ratio placing the geographic center in the middle of the pixel rectangle.
pub const DEFAULT_ANCHOR: f64 = 0.5;

/// Full turn, in degrees. Rotations are kept in `[0, FULL_TURN)`.
pub const FULL_TURN: f64 = 360.0;

/// Bound on the zoom exponent `scale + animation`. `2^±1000` stays finite and
/// non-zero in double precision.
pub const MAX_ZOOM_EXPONENT: f64 = 1000.0;
