#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Great-circle distance on a spherical Earth.
//!
//! Distances use the spherical law of cosines with a fixed radius of
//! [`EARTH_RADIUS_KM`]. Coordinates are decimal degrees. Points are
//! [`geo::Point`] values with `x` = longitude and `y` = latitude.

pub use geo::Point;

/// Mean Earth radius used for every distance in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6373.0;

/// Anything with a fixed position on the map.
pub trait Located {
    /// Position of this item (`x` = longitude, `y` = latitude).
    fn position(&self) -> Point<f64>;
}

impl Located for Point<f64> {
    fn position(&self) -> Point<f64> {
        *self
    }
}

/// Great-circle distance in kilometers between two points given as
/// latitude/longitude pairs in decimal degrees.
///
/// Coincident and antipodal points are handled: the cosine of the central
/// angle is clamped to `[-1, 1]` before `acos`, so floating-point overshoot
/// never produces `NaN`.
#[must_use]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // Colatitudes, measured from the north pole.
    let phi1 = (90.0 - lat1).to_radians();
    let phi2 = (90.0 - lat2).to_radians();
    let delta_theta = (lon1 - lon2).to_radians();

    let cos_angle = phi1
        .sin()
        .mul_add(phi2.sin() * delta_theta.cos(), phi1.cos() * phi2.cos());

    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
}

/// Great-circle distance in kilometers between two [`Point`]s.
#[must_use]
pub fn distance_between(a: Point<f64>, b: Point<f64>) -> f64 {
    distance(a.y(), a.x(), b.y(), b.x())
}

/// Great-circle distance in kilometers between two located items.
#[must_use]
pub fn distance_to<A: Located + ?Sized, B: Located + ?Sized>(a: &A, b: &B) -> f64 {
    distance_between(a.position(), b.position())
}
