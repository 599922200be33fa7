use geo::Point;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two `(lon, lat)` points.
pub fn haversine_km(a: Point<f64>, b: Point<f64>) -> f64 {
    let lon1 = a.x().to_radians();
    let lon2 = b.x().to_radians();
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();

    let delta_lat = lat2 - lat1;
    let delta_lon = lon2 - lon1;

    let h = (delta_lat / 2.0).sin().powi(2) + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Points within `radius_km` of `center`, boundary included, in input order.
pub fn filter_by_distance(points: &[Point<f64>], center: Point<f64>, radius_km: f64) -> Vec<Point<f64>> {
    points.iter().copied().filter(|pt| haversine_km(center, *pt) <= radius_km).collect()
}
