//! Shared fixtures for the microlp integration tests.

use salesman_core::Point;

/// Eight Indian cities with their WGS84 coordinates.
pub const INDIAN_CITIES: [(&str, f64, f64); 8] = [
    ("Delhi", 28.6139, 77.2090),
    ("Mumbai", 19.0760, 72.8777),
    ("Kolkata", 22.5726, 88.3639),
    ("Chennai", 13.0827, 80.2707),
    ("Bengaluru", 12.9716, 77.5946),
    ("Hyderabad", 17.3850, 78.4867),
    ("Jaipur", 26.9124, 75.7873),
    ("Lucknow", 26.8467, 80.9462),
];

/// The first `count` entries of [`INDIAN_CITIES`] as points.
pub fn indian_cities(count: usize) -> Vec<Point> {
    INDIAN_CITIES
        .iter()
        .take(count)
        .zip(1_u64..)
        .map(|(&(name, lat, lon), id)| {
            Point::new(id, name, lat, lon, format!("{name}, India"))
                .unwrap_or_else(|err| panic!("{name} is invalid: {err}"))
        })
        .collect()
}
