//! Map-drawing request derived from a tour.
//!
//! The request is plain data for an external renderer: one marker per stop,
//! the closing polyline as labelled segments, and padded map bounds.

use geo::{Coord, Rect};

use crate::{Tour, format_leg};

/// Degrees added on every side of the stops' bounding box.
pub const BOUNDS_PADDING_DEG: f64 = 2.0;

/// A labelled pin on the map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Marker {
    /// Stop name shown on the pin.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Long-form label, typically a geocoder display name.
    pub label: String,
}

/// One leg of the polyline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Segment {
    /// Name of the departure stop.
    pub from_name: String,
    /// Name of the arrival stop.
    pub to_name: String,
    /// Departure position, `x = longitude`.
    pub from: Coord<f64>,
    /// Arrival position, `x = longitude`.
    pub to: Coord<f64>,
    /// Leg distance in kilometres.
    pub distance_km: f64,
    /// Leg distance formatted for display, e.g. `"12.35 K.M."`.
    pub label: String,
}

/// Everything a map renderer needs to draw a tour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderRequest {
    /// One marker per distinct stop, in visiting order.
    pub markers: Vec<Marker>,
    /// Closed polyline, one segment per leg.
    pub segments: Vec<Segment>,
    /// Padded bounding box, `x = longitude`.
    pub bounds: Rect<f64>,
    /// Total tour length in kilometres.
    pub total_km: f64,
}

impl RenderRequest {
    /// Build the request for `tour`.
    ///
    /// # Examples
    /// ```
    /// use salesman_core::test_support::square_tour;
    /// use salesman_core::RenderRequest;
    ///
    /// let request = RenderRequest::from_tour(&square_tour());
    /// assert_eq!(request.markers.len(), 4);
    /// assert_eq!(request.segments.len(), 4);
    /// assert!(request.segments[0].label.ends_with(" K.M."));
    /// ```
    #[must_use]
    pub fn from_tour(tour: &Tour) -> Self {
        let stops = tour.stops();
        let markers = stops
            .iter()
            .take(tour.len())
            .map(|point| Marker {
                name: point.name().to_owned(),
                latitude: point.latitude(),
                longitude: point.longitude(),
                label: point.display_label().to_owned(),
            })
            .collect();
        let segments = stops
            .windows(2)
            .zip(tour.legs())
            .map(|(pair, &km)| Segment {
                from_name: pair[0].name().to_owned(),
                to_name: pair[1].name().to_owned(),
                from: pair[0].location(),
                to: pair[1].location(),
                distance_km: km,
                label: format_leg(km),
            })
            .collect();
        Self {
            markers,
            segments,
            bounds: padded_bounds(stops.iter().map(crate::Point::location)),
            total_km: tour.total_km(),
        }
    }
}

/// Bounding box of `coords` widened by [`BOUNDS_PADDING_DEG`] and clamped
/// to valid WGS84 ranges. An empty input yields a box around the origin.
#[must_use]
pub fn padded_bounds(coords: impl IntoIterator<Item = Coord<f64>>) -> Rect<f64> {
    let mut coords = coords.into_iter();
    let Some(first) = coords.next() else {
        return Rect::new(
            Coord {
                x: -BOUNDS_PADDING_DEG,
                y: -BOUNDS_PADDING_DEG,
            },
            Coord {
                x: BOUNDS_PADDING_DEG,
                y: BOUNDS_PADDING_DEG,
            },
        );
    };
    let (min, max) = coords.fold((first, first), |(min, max), c| {
        (
            Coord {
                x: min.x.min(c.x),
                y: min.y.min(c.y),
            },
            Coord {
                x: max.x.max(c.x),
                y: max.y.max(c.y),
            },
        )
    });
    Rect::new(
        Coord {
            x: (min.x - BOUNDS_PADDING_DEG).max(-180.0),
            y: (min.y - BOUNDS_PADDING_DEG).max(-90.0),
        },
        Coord {
            x: (max.x + BOUNDS_PADDING_DEG).min(180.0),
            y: (max.y + BOUNDS_PADDING_DEG).min(90.0),
        },
    )
}

/// Draws a [`RenderRequest`] with some external technology.
///
/// Implementations decide what "drawing" means: writing a file, calling a
/// tile service, returning a string.
pub trait PathRenderer {
    /// What a successful render yields.
    type Output;
    /// Rendering failure.
    type Error: std::error::Error;

    /// Render `request`.
    fn render(&self, request: &RenderRequest) -> Result<Self::Output, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::square_tour;
    use rstest::rstest;

    #[rstest]
    fn bounds_are_padded_by_two_degrees() {
        let rect = padded_bounds([Coord { x: 10.0, y: 20.0 }, Coord { x: 12.0, y: 25.0 }]);
        assert_eq!(rect.min(), Coord { x: 8.0, y: 18.0 });
        assert_eq!(rect.max(), Coord { x: 14.0, y: 27.0 });
    }

    #[rstest]
    fn bounds_are_clamped_to_the_globe() {
        let rect = padded_bounds([Coord { x: 179.5, y: 89.0 }, Coord { x: -179.0, y: -89.5 }]);
        assert_eq!(rect.min(), Coord { x: -180.0, y: -90.0 });
        assert_eq!(rect.max(), Coord { x: 180.0, y: 90.0 });
    }

    #[rstest]
    fn segments_follow_the_tour_and_close_it() {
        let tour = square_tour();
        let request = RenderRequest::from_tour(&tour);
        let first = request.segments.first().expect("first segment");
        let last = request.segments.last().expect("last segment");
        assert_eq!(first.from_name, tour.stop_names()[0]);
        assert_eq!(last.to_name, tour.stop_names()[0]);
        for (segment, &km) in request.segments.iter().zip(tour.legs()) {
            assert_eq!(segment.label, format_leg(km));
        }
        assert!((request.total_km - tour.total_km()).abs() < f64::EPSILON);
    }

    #[rstest]
    fn markers_skip_the_closing_repeat() {
        let tour = square_tour();
        let request = RenderRequest::from_tour(&tour);
        let names: Vec<&str> = request.markers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, tour.stop_names()[..4].to_vec());
    }
}
