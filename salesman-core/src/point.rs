//! Geocoded stops.

use geo::Coord;

use crate::InvalidInputError;

/// A geocoded place the tour must visit.
///
/// Coordinates are WGS84 degrees stored with `x = longitude` and
/// `y = latitude`. Points are validated on construction and never change
/// afterwards.
///
/// # Examples
/// ```
/// use salesman_core::Point;
///
/// let delhi = Point::new(1, "Delhi", 28.6139, 77.2090, "Delhi, India")?;
/// assert_eq!(delhi.name(), "Delhi");
/// assert_eq!(delhi.latitude(), 28.6139);
/// # Ok::<(), salesman_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    id: u64,
    name: String,
    location: Coord<f64>,
    display_label: String,
}

impl Point {
    /// Validate coordinates and construct a [`Point`].
    ///
    /// Rejects latitudes outside `[-90, 90]`, longitudes outside
    /// `[-180, 180]` and non-finite values.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        display_label: impl Into<String>,
    ) -> Result<Self, InvalidInputError> {
        let name = name.into();
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidInputError::LatitudeOutOfRange { name, latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidInputError::LongitudeOutOfRange { name, longitude });
        }
        Ok(Self {
            id,
            name,
            location: Coord {
                x: longitude,
                y: latitude,
            },
            display_label: display_label.into(),
        })
    }

    /// Identifier assigned by the geocoding collaborator.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Short name used for matrix labels and reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Position as a `geo` coordinate.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Long-form label, typically the geocoder's display name.
    #[must_use]
    pub fn display_label(&self) -> &str {
        &self.display_label
    }
}
