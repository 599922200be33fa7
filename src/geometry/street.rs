use super::haversine_km;
use geo::{Closest, ClosestPoint, EuclideanDistance, LineString, Point};

/// A street as returned by a lookup service.
#[derive(Debug, Clone, PartialEq)]
pub struct Street {
    pub id: i64,
    pub name: String,
    /// Road classification, e.g. `residential` or `secondary`.
    pub highway: String,
    pub geometry: LineString<f64>,
}

/// Finds the street a sign stands on.
///
/// Implementations may talk to the network; failures are reported as `None`
/// and retrying is up to the implementation or its caller.
pub trait StreetLookup {
    fn nearest_street(&self, lat: f64, lon: f64, radius_m: f64) -> Option<Street>;
}

/// In-memory lookup over a fixed set of streets.
#[derive(Debug, Clone, Default)]
pub struct StaticStreets {
    streets: Vec<Street>,
}

impl StaticStreets {
    pub fn new(streets: Vec<Street>) -> Self {
        Self { streets }
    }

    pub fn len(&self) -> usize {
        self.streets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streets.is_empty()
    }
}

impl StreetLookup for StaticStreets {
    fn nearest_street(&self, lat: f64, lon: f64, radius_m: f64) -> Option<Street> {
        let query = Point::new(lon, lat);

        self.streets
            .iter()
            .filter(|street| street.geometry.0.len() >= 2)
            .filter_map(|street| {
                let nearest = match street.geometry.closest_point(&query) {
                    Closest::Intersection(pt) | Closest::SinglePoint(pt) => pt,
                    Closest::Indeterminate => return None,
                };
                if haversine_km(query, nearest) * 1000.0 > radius_m {
                    return None;
                }
                Some((query.euclidean_distance(&street.geometry), street))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(dist, street)| {
                log::debug!("[street_lookup] lat={} lon={} street={} dist={}", lat, lon, street.id, dist);
                street.clone()
            })
    }
}
