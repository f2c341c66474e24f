use crate::entities::city::Coordinate;

/// Mean radius of the Earth in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.0;

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in miles
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Check if a point lies within `max_distance` miles of a centre, boundary included
pub fn is_within_radius(point: Coordinate, centre: Coordinate, max_distance: f64) -> bool {
    haversine_distance(point, centre) <= max_distance
}
