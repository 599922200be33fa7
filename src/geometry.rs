//! Street geometry: which part of a street a sign covers.
//!
//! Coordinates are planar `(x = longitude, y = latitude)` pairs held in `geo`
//! types. Arc-lengths along a street are measured in the same units.
//!
//! ## Responsibilities by module
//!
//! - `distance.rs`: great-circle distance and radius filtering.
//! - `interval.rs`: sign projection and interval construction.
//! - `street.rs`: the street lookup seam plus an in-memory implementation.

#[path = "geometry/distance.rs"]
mod distance;
#[path = "geometry/interval.rs"]
mod interval;
#[path = "geometry/street.rs"]
mod street;

pub use distance::{EARTH_RADIUS_KM, filter_by_distance, haversine_km};
pub use interval::{Direction, StreetInterval, build_intervals, build_intervals_with};
pub use street::{StaticStreets, Street, StreetLookup};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("street needs at least 2 vertices, got {vertices}")]
    InvalidGeometry { vertices: usize },
}
